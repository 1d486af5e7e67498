//! Configuration file loading and validation.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::ResimConfig;

/// File name looked up when no explicit configuration path is given.
pub const CONFIG_FILE_NAME: &str = "resim.toml";

/// Loads the configuration for a replay run.
///
/// With an explicit `path` the file must exist. Otherwise `./resim.toml` is
/// used if present, and the built-in defaults if not.
pub fn load_config(path: Option<&Path>) -> Result<ResimConfig, ConfigError> {
    match path {
        Some(p) => load_config_file(p),
        None => {
            let local = Path::new(CONFIG_FILE_NAME);
            if local.is_file() {
                load_config_file(local)
            } else {
                Ok(ResimConfig::default())
            }
        }
    }
}

fn load_config_file(path: &Path) -> Result<ResimConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `resim.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ResimConfig, ConfigError> {
    let config: ResimConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and record codes are distinct.
fn validate_config(config: &ResimConfig) -> Result<(), ConfigError> {
    if config.replay.reset_signal.trim().is_empty() {
        return Err(ConfigError::MissingField("replay.reset_signal".to_string()));
    }
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for (name, code) in config.records.entries() {
        if let Some(other) = seen.insert(code, name) {
            return Err(ConfigError::ValidationError(format!(
                "record code {code} is assigned to both '{other}' and '{name}'"
            )));
        }
    }
    Ok(())
}
