//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────┐
//! │  1. Environment Variables (WEFT_*)      │  Runtime override
//! ├─────────────────────────────────────────┤
//! │  2. Project Config (.weft/config.toml)  │  Project-specific
//! ├─────────────────────────────────────────┤
//! │  3. Global Config (~/.weft/config.toml) │  User defaults
//! ├─────────────────────────────────────────┤
//! │  4. Default Values (compile-time)       │  Fallback
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `WEFT_DEBUG` | `debug` | bool |
//! | `WEFT_MODE` | `mode.initial` | String |
//! | `WEFT_LOG_LEVEL` | `logging.level` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! debug = false
//!
//! [mode]
//! initial = "review"
//!
//! [[modes]]
//! name = "review"
//! editor_read_only = { ui_enabled = true }
//!
//! [[components]]
//! id = "builtin::drawer"
//!
//! [[components.behaviours]]
//! name = "sliding"
//! config = { dimension = "height" }
//!
//! [logging]
//! level = "warn"
//! ```

mod error;
mod loader;
mod types;

pub use error::{ConfigError, ConfigValidationError};
pub use loader::ConfigLoader;
pub use types::{
    BehaviourDef, ComponentDef, ConfigLayer, LoggingConfig, LoggingLayer, ModeConfig, ModeDef,
    ModeLayer, WeftConfig,
};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".weft")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join(PROJECT_CONFIG_FILE)
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".weft";

/// Config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
