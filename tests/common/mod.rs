// tests/common/mod.rs
//! Stub provider that counts and orders every call it receives.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use lazytok_core::config::{EncoderConfig, FailurePolicy};
use lazytok_core::provider::{ResourceProvider, TokenizerResource};
use lazytok_core::{EncoderError, ResourceLoadError};

/// Encodes to `fixed` when set, otherwise to the input's bytes.
#[derive(Debug)]
pub struct StubResource {
    pub fixed: Option<Vec<u32>>,
}

impl TokenizerResource for StubResource {
    fn encode(&self, text: &str) -> Result<Vec<u32>, EncoderError> {
        Ok(self
            .fixed
            .clone()
            .unwrap_or_else(|| text.bytes().map(u32::from).collect()))
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, EncoderError> {
        let bytes: Vec<u8> = tokens
            .iter()
            .map(|&t| {
                u8::try_from(t).map_err(|_| EncoderError::Decode(format!("id {t} out of range")))
            })
            .collect::<Result<_, _>>()?;
        String::from_utf8(bytes).map_err(|e| EncoderError::Decode(e.to_string()))
    }
}

#[derive(Default)]
pub struct StubProvider {
    pub paths: Vec<PathBuf>,
    pub path_ok: bool,
    pub local_ok: bool,
    pub remote_ok: bool,
    pub fixed: Option<Vec<u32>>,
    /// Sleep inside every load step, to widen the in-flight window.
    pub delay: Duration,
    /// Extra sleep inside `load_remote` only.
    pub remote_delay: Duration,
    /// Step that panics instead of returning.
    pub panic_in: Option<&'static str>,
    pub path_calls: AtomicUsize,
    pub local_calls: AtomicUsize,
    pub remote_calls: AtomicUsize,
    pub order: Mutex<Vec<&'static str>>,
}

impl StubProvider {
    pub fn failing() -> Self {
        Self {
            paths: vec![PathBuf::from("/nonexistent/tokenizer.json")],
            ..Self::default()
        }
    }

    pub fn path_only() -> Self {
        Self {
            path_ok: true,
            ..Self::failing()
        }
    }

    pub fn remote_only() -> Self {
        Self {
            remote_ok: true,
            ..Self::failing()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.path_calls.load(Ordering::SeqCst)
            + self.local_calls.load(Ordering::SeqCst)
            + self.remote_calls.load(Ordering::SeqCst)
    }

    pub fn order(&self) -> Vec<&'static str> {
        self.order.lock().unwrap().clone()
    }

    fn step(
        &self,
        name: &'static str,
        counter: &AtomicUsize,
        ok: bool,
    ) -> Result<StubResource, ResourceLoadError> {
        if self.panic_in == Some(name) {
            counter.fetch_add(1, Ordering::SeqCst);
            self.order.lock().unwrap().push(name);
            panic!("{name} blew up");
        }
        counter.fetch_add(1, Ordering::SeqCst);
        self.order.lock().unwrap().push(name);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if ok {
            Ok(StubResource {
                fixed: self.fixed.clone(),
            })
        } else {
            Err(ResourceLoadError::Other(format!("{name} failed")))
        }
    }
}

impl ResourceProvider for StubProvider {
    type Resource = StubResource;

    fn cached_paths(&self, _identifier: &str) -> Vec<PathBuf> {
        self.paths.clone()
    }

    fn load_from_path(&self, _path: &Path) -> Result<StubResource, ResourceLoadError> {
        self.step("path", &self.path_calls, self.path_ok)
    }

    fn load_local_only(&self, _identifier: &str) -> Result<StubResource, ResourceLoadError> {
        self.step("local", &self.local_calls, self.local_ok)
    }

    fn load_remote(&self, _identifier: &str) -> Result<StubResource, ResourceLoadError> {
        if !self.remote_delay.is_zero() {
            thread::sleep(self.remote_delay);
        }
        self.step("remote", &self.remote_calls, self.remote_ok)
    }
}

/// Shares one stub between the facade and the test body.
pub struct SharedStub(pub std::sync::Arc<StubProvider>);

impl ResourceProvider for SharedStub {
    type Resource = StubResource;

    fn cached_paths(&self, identifier: &str) -> Vec<PathBuf> {
        self.0.cached_paths(identifier)
    }

    fn load_from_path(&self, path: &Path) -> Result<StubResource, ResourceLoadError> {
        self.0.load_from_path(path)
    }

    fn load_local_only(&self, identifier: &str) -> Result<StubResource, ResourceLoadError> {
        self.0.load_local_only(identifier)
    }

    fn load_remote(&self, identifier: &str) -> Result<StubResource, ResourceLoadError> {
        self.0.load_remote(identifier)
    }
}

pub fn config(policy: FailurePolicy, eager: bool) -> EncoderConfig {
    EncoderConfig {
        on_failure: policy,
        eager,
        ..EncoderConfig::default()
    }
}
