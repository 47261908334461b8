//! Editor host runtime for weft.
//!
//! Wires the behaviour and mode engines into a host:
//!
//! - [`config`]: layered TOML configuration ([`WeftConfig`], [`ConfigLoader`])
//! - [`HostComponent`]: a component with its bound behaviours and event table
//! - [`Editor`]: mode state plus hosted components, built from config
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use weft_behaviour::{BehaviourRegistry, BehaviourSpec, FieldSpec};
//! use weft_runtime::config::WeftConfig;
//! use weft_runtime::Editor;
//!
//! let mut behaviours = BehaviourRegistry::new();
//! behaviours.register(
//!     BehaviourSpec::new("focusing")
//!         .fields([FieldSpec::defaulted("tabstop", true)])
//!         .api("tabstop", |ctx, _| Ok(ctx.config.get("tabstop").cloned().unwrap_or_default()))
//!         .create(),
//! );
//!
//! let config = WeftConfig::from_toml(r#"
//! [[components]]
//! id = "button"
//!
//! [[components.behaviours]]
//! name = "focusing"
//! "#).unwrap();
//!
//! let mut editor = Editor::from_config(config, behaviours).unwrap();
//! assert_eq!(editor.call("button", "focusing", "tabstop", &[]).unwrap(), json!(true));
//!
//! editor.set_read_only(true).unwrap();
//! assert_eq!(editor.mode(), "readonly");
//! ```
//!
//! [`WeftConfig`]: config::WeftConfig
//! [`ConfigLoader`]: config::ConfigLoader

pub mod config;
mod editor;
mod error;
mod host;

pub use editor::{Editor, EditorBuilder};
pub use error::EditorError;
pub use host::HostComponent;
