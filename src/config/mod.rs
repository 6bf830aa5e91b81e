// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{BudgetConfig, EncoderConfig, FailurePolicy, LazytokToml, DEFAULT_IDENTIFIER};

use crate::error::ConfigError;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub encoder: EncoderConfig,
    pub budget: BudgetConfig,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `lazytok.toml` from the working directory, then applies
    /// environment overrides.
    ///
    /// # Errors
    /// Returns error if the file is malformed or an override is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), |k| std::env::var(k).ok())
    }

    /// Same as [`Config::load`] with an explicit file and env lookup.
    ///
    /// # Errors
    /// Returns error if the file is malformed or an override is invalid.
    pub fn load_from<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = io::load_toml_config(path)?;
        let mut config = Self {
            encoder: file.encoder,
            budget: file.budget,
        };
        io::apply_env_overrides(&mut config.encoder, lookup)?;
        Ok(config)
    }
}
