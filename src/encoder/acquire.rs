// src/encoder/acquire.rs
//! Ordered acquisition: cached file, offline load, network fetch.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::error::ResourceLoadError;
use crate::provider::ResourceProvider;

/// Which step produced the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    CachedFile,
    LocalOnly,
    Remote,
}

/// Tries each step in turn and returns the first resource obtained.
/// Step failures are logged, only the last one is returned.
///
/// # Errors
/// Returns the error of the final step when all of them fail.
pub fn acquire<P: ResourceProvider>(
    provider: &Arc<P>,
    identifier: &str,
    remote_timeout: Option<Duration>,
) -> Result<(P::Resource, Source), ResourceLoadError> {
    match load_cached_file(provider.as_ref(), identifier) {
        Ok(r) => return Ok((r, Source::CachedFile)),
        Err(e) => tracing::debug!(identifier, error = %e, "direct cache file load failed"),
    }

    match provider.load_local_only(identifier) {
        Ok(r) => return Ok((r, Source::LocalOnly)),
        Err(e) => tracing::info!(identifier, error = %e, "local-only load failed, trying network"),
    }

    load_remote_bounded(provider, identifier, remote_timeout).map(|r| (r, Source::Remote))
}

fn load_cached_file<P: ResourceProvider>(
    provider: &P,
    identifier: &str,
) -> Result<P::Resource, ResourceLoadError> {
    let mut last = ResourceLoadError::NotCached {
        identifier: identifier.to_string(),
    };
    for path in provider.cached_paths(identifier) {
        tracing::info!(path = %path.display(), "found cached tokenizer file");
        match provider.load_from_path(&path) {
            Ok(r) => return Ok(r),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "direct file load failed");
                last = e;
            }
        }
    }
    Err(last)
}

/// Runs the network step, bounded by `timeout` when one is configured.
/// On expiry the fetch thread is left to finish on its own and its result is
/// dropped.
fn load_remote_bounded<P: ResourceProvider>(
    provider: &Arc<P>,
    identifier: &str,
    timeout: Option<Duration>,
) -> Result<P::Resource, ResourceLoadError> {
    let Some(after) = timeout else {
        return provider.load_remote(identifier);
    };

    let (tx, rx) = mpsc::channel();
    let worker = Arc::clone(provider);
    let id = identifier.to_string();
    thread::Builder::new()
        .name("lazytok-fetch".to_string())
        .spawn(move || {
            let _ = tx.send(worker.load_remote(&id));
        })
        .map_err(|e| ResourceLoadError::Other(format!("failed to spawn fetch thread: {e}")))?;

    match rx.recv_timeout(after) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(ResourceLoadError::Timeout {
            identifier: identifier.to_string(),
            after,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(ResourceLoadError::Other(
            "fetch thread exited without a result".to_string(),
        )),
    }
}
