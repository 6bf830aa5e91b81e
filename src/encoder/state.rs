// src/encoder/state.rs
//! Terminal states of the acquisition protocol.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ResourceLoadError;

/// The outcome published once acquisition finishes. Never replaced.
pub enum Terminal<R> {
    Ready(R),
    /// Degraded mode. Keeps the error that caused it for diagnostics.
    Fallback(Arc<ResourceLoadError>),
    Failed(Arc<ResourceLoadError>),
}

impl<R> Terminal<R> {
    #[must_use]
    pub fn status(&self) -> EncoderStatus {
        match self {
            Self::Ready(_) => EncoderStatus::Ready,
            Self::Fallback(_) => EncoderStatus::Fallback,
            Self::Failed(_) => EncoderStatus::Failed,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&Arc<ResourceLoadError>> {
        match self {
            Self::Ready(_) => None,
            Self::Fallback(e) | Self::Failed(e) => Some(e),
        }
    }
}

/// Observable lifecycle of a facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderStatus {
    Uninitialized,
    Initializing,
    Ready,
    Fallback,
    Failed,
}

impl EncoderStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Fallback | Self::Failed)
    }
}

impl fmt::Display for EncoderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Fallback => "fallback",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}
