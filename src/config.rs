use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseGateError, Result};

const CONFIG_FILE_NAME: &str = "release-gate.toml";

/// Optional file-based configuration for release-gate.
///
/// Supplies transport defaults and the comment texts. The allow-list never
/// comes from here, only from the `users` step input.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    /// API base URL, overriding `GITHUB_API_URL`
    #[serde(default)]
    pub api_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default)]
    pub messages: MessagesConfig,
}

fn default_started() -> String {
    "Starting deployment".to_string()
}

fn default_success() -> String {
    "Deployment successful".to_string()
}

fn default_failure() -> String {
    "Deployment failed".to_string()
}

fn default_canceled() -> String {
    "Deployment canceled".to_string()
}

/// Comment bodies posted by each handler.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MessagesConfig {
    #[serde(default = "default_started")]
    pub started: String,

    #[serde(default = "default_success")]
    pub success: String,

    #[serde(default = "default_failure")]
    pub failure: String,

    #[serde(default = "default_canceled")]
    pub canceled: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        MessagesConfig {
            started: default_started(),
            success: default_success(),
            failure: default_failure(),
            canceled: default_canceled(),
        }
    }
}

/// Parses configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| ReleaseGateError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-gate.toml` in current directory
/// 3. `release-gate.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
