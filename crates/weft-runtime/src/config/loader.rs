//! Configuration loader with hierarchical merging.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Global config (`~/.weft/config.toml`)
//! 3. Project config (`<root>/.weft/config.toml`)
//! 4. Environment variables (`WEFT_*`)
//!
//! Each layer overrides the previous.

use super::{
    default_config_path, ConfigError, ConfigLayer, WeftConfig, PROJECT_CONFIG_DIR,
    PROJECT_CONFIG_FILE,
};
use std::path::{Path, PathBuf};
use tracing::debug;

macro_rules! parse_env_bool {
    ($field:expr, $var:literal) => {
        if let Ok(val) = std::env::var($var) {
            $field = parse_bool(&val)
                .ok_or_else(|| ConfigError::invalid_env_var($var, "expected bool"))?;
        }
    };
}

/// Configuration loader with builder pattern.
///
/// # Example
///
/// ```no_run
/// use weft_runtime::config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_project_root("/path/to/project")
///     .skip_env_vars()
///     .load()?;
/// # Ok::<(), weft_runtime::config::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_config_path: Option<PathBuf>,
    project_root: Option<PathBuf>,
    skip_env: bool,
    skip_global: bool,
    skip_project: bool,
}

impl ConfigLoader {
    /// Creates a loader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom global config path.
    #[must_use]
    pub fn with_global_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.global_config_path = Some(path.into());
        self
    }

    /// Sets the project root directory.
    ///
    /// Project config is read from `<project_root>/.weft/config.toml`.
    #[must_use]
    pub fn with_project_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_root = Some(path.into());
        self
    }

    /// Skips environment variable loading.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Skips global config loading.
    #[must_use]
    pub fn skip_global_config(mut self) -> Self {
        self.skip_global = true;
        self
    }

    /// Skips project config loading.
    #[must_use]
    pub fn skip_project_config(mut self) -> Self {
        self.skip_project = true;
        self
    }

    /// Loads and merges configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read
    /// or parsed, or an environment variable is malformed. Missing files
    /// are skipped.
    pub fn load(&self) -> Result<WeftConfig, ConfigError> {
        let mut config = WeftConfig::default();

        if !self.skip_global {
            let global_path = self
                .global_config_path
                .clone()
                .unwrap_or_else(default_config_path);

            if let Some(global) = load_file(&global_path)? {
                debug!(path = %global_path.display(), "loaded global config");
                config.merge(&global);
            }
        }

        if !self.skip_project {
            if let Some(ref root) = self.project_root {
                let path = root.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILE);
                if let Some(project) = load_file(&path)? {
                    debug!(
                        path = %path.display(),
                        project = %root.display(),
                        "loaded project config"
                    );
                    config.merge(&project);
                }
            }
        }

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        Ok(config)
    }
}

fn load_file(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let layer = ConfigLayer::from_toml(&content).map_err(|e| ConfigError::parse_toml(path, e))?;
    Ok(Some(layer))
}

fn apply_env_vars(config: &mut WeftConfig) -> Result<(), ConfigError> {
    parse_env_bool!(config.debug, "WEFT_DEBUG");

    if let Ok(val) = std::env::var("WEFT_MODE") {
        config.mode.initial = val;
    }
    if let Ok(val) = std::env::var("WEFT_LOG_LEVEL") {
        config.logging.level = val;
    }
    Ok(())
}

/// Parses a boolean.
///
/// Accepts true/false, 1/0, yes/no, on/off (case-insensitive).
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
