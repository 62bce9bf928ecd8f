//! Interpreter configuration.
//!
//! ## TOML Format
//!
//! ```toml
//! max_steps = 1000      # rule applications per reduce call
//! max_depth = 256       # nested interpret calls
//! load_stdlib = true    # load the prelude on startup
//! default_space = "self"
//! ```
//!
//! Every key is optional and falls back to its default.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_MAX_STEPS: usize = 1000;
pub const DEFAULT_MAX_DEPTH: usize = 256;
pub const DEFAULT_SPACE: &str = "self";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpreterConfig {
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub load_stdlib: bool,

    #[serde(default = "default_space")]
    pub default_space: String,
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_space() -> String {
    DEFAULT_SPACE.to_string()
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_steps: DEFAULT_MAX_STEPS,
            max_depth: DEFAULT_MAX_DEPTH,
            load_stdlib: false,
            default_space: default_space(),
        }
    }
}

impl InterpreterConfig {
    /// Parse a configuration from TOML text
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: InterpreterConfig = toml::from_str(content)?;
        if config.default_space.is_empty() {
            return Err(ConfigError::Invalid(
                "default_space must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Toml(e) => write!(f, "Invalid config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Toml(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}
