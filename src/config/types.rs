use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// What the facade does once every acquisition step has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Switch to code-point encoding and keep serving calls.
    #[default]
    Fallback,
    /// Record the error and fail every subsequent call with it.
    FailFast,
}

impl FailurePolicy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fallback" => Some(Self::Fallback),
            "fail-fast" | "failfast" | "fail_fast" => Some(Self::FailFast),
            _ => None,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    #[serde(default = "default_identifier")]
    pub identifier: String,
    #[serde(default)]
    pub eager: bool,
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// Upper bound on the network-fetch step. `None` waits for the provider.
    #[serde(default)]
    pub remote_timeout_secs: Option<u64>,
    /// Overrides the `HF_HOME`-derived cache root.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default)]
    pub offline: bool,
    #[serde(default = "default_true")]
    pub add_special_tokens: bool,
    #[serde(default = "default_true")]
    pub skip_special_tokens: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            identifier: default_identifier(),
            eager: false,
            on_failure: FailurePolicy::default(),
            remote_timeout_secs: None,
            cache_dir: None,
            offline: false,
            add_special_tokens: true,
            skip_special_tokens: true,
        }
    }
}

impl EncoderConfig {
    #[must_use]
    pub fn remote_timeout(&self) -> Option<Duration> {
        self.remote_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
        }
    }
}

/// On-disk shape of `lazytok.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LazytokToml {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub budget: BudgetConfig,
}

pub const DEFAULT_IDENTIFIER: &str = "Xenova/claude-tokenizer";

fn default_identifier() -> String {
    DEFAULT_IDENTIFIER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_tokens() -> usize {
    8000
}
