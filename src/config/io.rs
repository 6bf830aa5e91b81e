//! Reading `lazytok.toml` and applying environment overrides.

use std::fs;
use std::path::Path;

use super::types::{EncoderConfig, FailurePolicy, LazytokToml};
use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "lazytok.toml";

/// Reads the config file at `path`. A missing file yields defaults.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_toml_config(path: &Path) -> Result<LazytokToml, ConfigError> {
    if !path.exists() {
        return Ok(LazytokToml::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    parse_toml(&content).map_err(|source| ConfigError::Toml {
        source,
        path: path.to_path_buf(),
    })
}

/// Parses config text.
///
/// # Errors
/// Returns the TOML deserialization error.
pub fn parse_toml(content: &str) -> Result<LazytokToml, toml::de::Error> {
    toml::from_str(content)
}

/// Applies overrides from `lookup`, which maps an env var name to its value.
///
/// # Errors
/// Returns error if a variable is set to a value that cannot be interpreted.
pub fn apply_env_overrides<F>(config: &mut EncoderConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(id) = lookup("LAZYTOK_IDENTIFIER").filter(|v| !v.trim().is_empty()) {
        config.identifier = id.trim().to_string();
    }
    if let Some(v) = lookup("LAZYTOK_EAGER") {
        config.eager = parse_flag("LAZYTOK_EAGER", &v)?;
    }
    if let Some(v) = lookup("LAZYTOK_ON_FAILURE") {
        config.on_failure = FailurePolicy::parse(&v).ok_or(ConfigError::InvalidEnv {
            key: "LAZYTOK_ON_FAILURE",
            value: v.clone(),
        })?;
    }
    if let Some(v) = lookup("LAZYTOK_REMOTE_TIMEOUT_SECS") {
        let secs = v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
            key: "LAZYTOK_REMOTE_TIMEOUT_SECS",
            value: v.clone(),
        })?;
        config.remote_timeout_secs = Some(secs);
    }
    // Same switch the hub tooling honours.
    if let Some(v) = lookup("HF_HUB_OFFLINE") {
        config.offline = parse_flag("HF_HUB_OFFLINE", &v)?;
    }
    Ok(())
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}
