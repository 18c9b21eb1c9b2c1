//! Widget configuration, loadable from a JSON file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Delay between a mouseout/blur and the close attempt it schedules.
    pub close_delay_ms: u64,
    /// Attribute on the trigger naming the id of its menu container.
    pub controls_attribute: String,
    /// Value of the `role` attribute that marks a container child as an item.
    pub item_role: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: 300,
            controls_attribute: "aria-controls".to_string(),
            item_role: "menuitem".to_string(),
        }
    }
}

impl MenuConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

pub fn load_config(path: &Path) -> Result<MenuConfig, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&data)?;
    Ok(config)
}

/// Missing files are silent; unreadable or malformed files are logged.
pub fn load_config_or_default(path: &Path) -> MenuConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => MenuConfig::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default menu config");
            MenuConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/config.rs"]
mod tests;
