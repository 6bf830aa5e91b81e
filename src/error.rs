// src/error.rs
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single acquisition step.
///
/// Only the last one is kept once every step has been tried; the others are
/// logged and dropped.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("no cached tokenizer found for '{identifier}'")]
    NotCached { identifier: String },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to parse tokenizer definition at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("hub request for '{identifier}' failed: {message}")]
    Hub { identifier: String, message: String },

    #[error("network fetch of '{identifier}' timed out after {after:?}")]
    Timeout { identifier: String, after: Duration },

    #[error("network fetch of '{identifier}' refused: offline mode is enabled")]
    Offline { identifier: String },

    #[error("{0}")]
    Other(String),
}

/// Errors surfaced to callers of `encode` / `decode`.
#[derive(Debug, Clone, Error)]
pub enum EncoderError {
    /// Acquisition failed and the facade runs with `FailurePolicy::FailFast`.
    #[error("tokenizer initialization failed: {0}")]
    Initialization(#[source] Arc<ResourceLoadError>),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("decode failed: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid config in {path}: {source}")]
    Toml {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, EncoderError>;
