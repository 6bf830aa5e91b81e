// src/encoder/mod.rs
//! Lazily-initialized tokenizer facade.
//!
//! The tokenizer is loaded at most once per [`LazyEncoder`], on first use (or
//! on a background thread at construction when `eager` is set). Callers that
//! arrive while loading is in flight block until it finishes and then see the
//! same outcome. When every load step fails the facade either degrades to
//! code-point encoding or fails every call, depending on [`FailurePolicy`].
//!
//! In fallback mode `encode` returns one id per character, so anything that
//! uses token counts as a size budget is measuring characters instead.

pub mod acquire;
pub mod fallback;
pub mod state;

pub use acquire::Source;
pub use state::{EncoderStatus, Terminal};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};
use std::thread;
use std::time::Duration;

use crate::config::{Config, EncoderConfig, FailurePolicy};
use crate::error::{EncoderError, ResourceLoadError, Result};
use crate::provider::{HubProvider, ResourceProvider, TokenizerResource};

/// Text to ids and back. Object safe so callers can hold `&dyn EncoderDecoder`.
pub trait EncoderDecoder: Send + Sync {
    /// # Errors
    /// Returns error if the tokenizer is unavailable or rejects the input.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// # Errors
    /// Returns error if the tokenizer is unavailable or rejects the ids.
    fn decode(&self, tokens: &[u32]) -> Result<String>;
}

struct Shared<P: ResourceProvider> {
    provider: Arc<P>,
    identifier: String,
    policy: FailurePolicy,
    remote_timeout: Option<Duration>,
    started: AtomicBool,
    terminal: OnceLock<Terminal<P::Resource>>,
}

impl<P: ResourceProvider> Shared<P> {
    /// Single-flight entry point. `OnceLock` runs the closure on exactly one
    /// thread; every other caller parks until the value is published.
    fn ensure(&self) -> &Terminal<P::Resource> {
        self.terminal.get_or_init(|| self.initialize())
    }

    /// Runs acquisition once. A panicking provider counts as a failed load so
    /// the cell still gets a terminal value.
    fn initialize(&self) -> Terminal<P::Resource> {
        self.started.store(true, Ordering::Release);
        tracing::info!(identifier = %self.identifier, "initializing tokenizer");

        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            acquire::acquire(&self.provider, &self.identifier, self.remote_timeout)
        }));
        let outcome = attempt.unwrap_or_else(|payload| {
            Err(ResourceLoadError::Other(format!(
                "tokenizer provider panicked: {}",
                panic_message(payload.as_ref())
            )))
        });

        match outcome {
            Ok((resource, source)) => {
                tracing::info!(identifier = %self.identifier, ?source, "tokenizer loaded");
                Terminal::Ready(resource)
            }
            Err(e) => self.settle_failure(e),
        }
    }

    fn settle_failure(&self, error: ResourceLoadError) -> Terminal<P::Resource> {
        tracing::error!(
            identifier = %self.identifier,
            error = %error,
            "failed to initialize tokenizer"
        );
        let error = Arc::new(error);
        match self.policy {
            FailurePolicy::Fallback => {
                tracing::warn!(
                    "using fallback character encoding; token counts are code-point counts"
                );
                Terminal::Fallback(error)
            }
            FailurePolicy::FailFast => Terminal::Failed(error),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// The facade. Cheap to construct; the tokenizer is loaded on first use.
pub struct LazyEncoder<P: ResourceProvider> {
    shared: Arc<Shared<P>>,
}

impl<P: ResourceProvider> LazyEncoder<P> {
    /// Creates a facade over `provider`. Never fails. With `config.eager`
    /// acquisition starts right away on a background thread.
    #[must_use]
    pub fn new(provider: P, config: &EncoderConfig) -> Self {
        let shared = Arc::new(Shared {
            provider: Arc::new(provider),
            identifier: config.identifier.clone(),
            policy: config.on_failure,
            remote_timeout: config.remote_timeout(),
            started: AtomicBool::new(false),
            terminal: OnceLock::new(),
        });
        let encoder = Self { shared };
        if config.eager {
            encoder.spawn_background();
        }
        encoder
    }

    fn spawn_background(&self) {
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("lazytok-init".to_string())
            .spawn(move || {
                shared.ensure();
            });
        if let Err(e) = spawned {
            // Still correct: the first caller will initialize instead.
            tracing::warn!(error = %e, "could not start background initialization");
        }
    }

    /// Current lifecycle state. Does not trigger acquisition.
    #[must_use]
    pub fn status(&self) -> EncoderStatus {
        match self.shared.terminal.get() {
            Some(t) => t.status(),
            None if self.shared.started.load(Ordering::Acquire) => EncoderStatus::Initializing,
            None => EncoderStatus::Uninitialized,
        }
    }

    /// Blocks until acquisition has finished and returns the terminal status.
    pub fn wait(&self) -> EncoderStatus {
        self.shared.ensure().status()
    }

    /// The error that led to fallback or failure, once known.
    #[must_use]
    pub fn acquisition_error(&self) -> Option<Arc<ResourceLoadError>> {
        self.shared.terminal.get().and_then(|t| t.error().cloned())
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.shared.identifier
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.shared.policy
    }

    /// # Errors
    /// Returns [`EncoderError::Initialization`] under `FailFast` after a failed
    /// acquisition, or the resource's own encode error.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        match self.shared.ensure() {
            Terminal::Ready(r) => r.encode(text),
            Terminal::Fallback(_) => {
                tracing::debug!("fallback encode");
                Ok(fallback::encode(text))
            }
            Terminal::Failed(e) => Err(EncoderError::Initialization(Arc::clone(e))),
        }
    }

    /// # Errors
    /// Same conditions as [`LazyEncoder::encode`].
    pub fn decode(&self, tokens: &[u32]) -> Result<String> {
        match self.shared.ensure() {
            Terminal::Ready(r) => r.decode(tokens),
            Terminal::Fallback(_) => {
                tracing::debug!("fallback decode");
                Ok(fallback::decode(tokens))
            }
            Terminal::Failed(e) => Err(EncoderError::Initialization(Arc::clone(e))),
        }
    }
}

impl<P: ResourceProvider> EncoderDecoder for LazyEncoder<P> {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        LazyEncoder::encode(self, text)
    }

    fn decode(&self, tokens: &[u32]) -> Result<String> {
        LazyEncoder::decode(self, tokens)
    }
}

impl LazyEncoder<HubProvider> {
    /// Facade over the Hugging Face hub provider.
    #[must_use]
    pub fn from_config(config: &EncoderConfig) -> Self {
        Self::new(HubProvider::from_config(config), config)
    }
}

static DEFAULT: LazyLock<LazyEncoder<HubProvider>> = LazyLock::new(|| {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring invalid lazytok config, using defaults");
        Config::default()
    });
    LazyEncoder::from_config(&config.encoder)
});

/// Process-wide facade configured from `lazytok.toml` and the environment.
/// Build independent instances with [`LazyEncoder::new`] instead when sharing
/// the cache is not wanted.
#[must_use]
pub fn default_encoder() -> &'static LazyEncoder<HubProvider> {
    &DEFAULT
}
