//! Core definitions shared by the document, the widgets and the runtime.

pub mod config;
pub mod error;
pub mod event;

pub use config::{load_config, load_config_or_default, ConfigError, MenuConfig};
pub use error::MenuError;
pub use event::KeyCode;
