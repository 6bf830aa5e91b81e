// src/provider/mod.rs
//! The boundary between the facade and whatever actually loads tokenizers.

pub mod hub;

pub use hub::{HubProvider, HubTokenizer};

use std::path::{Path, PathBuf};

use crate::error::{EncoderError, ResourceLoadError};

/// A loaded tokenizer. Shared read-only across every caller of the facade,
/// so implementations must tolerate concurrent `&self` calls.
pub trait TokenizerResource: Send + Sync {
    /// # Errors
    /// Returns error if the tokenizer rejects the input.
    fn encode(&self, text: &str) -> Result<Vec<u32>, EncoderError>;

    /// # Errors
    /// Returns error if the ids cannot be mapped back to text.
    fn decode(&self, tokens: &[u32]) -> Result<String, EncoderError>;
}

/// Source of tokenizer resources, queried in a fixed order by the facade.
pub trait ResourceProvider: Send + Sync + 'static {
    type Resource: TokenizerResource + 'static;

    /// Candidate files for a direct load, most likely first.
    fn cached_paths(&self, identifier: &str) -> Vec<PathBuf>;

    /// # Errors
    /// Returns error if the file is missing or not a tokenizer definition.
    fn load_from_path(&self, path: &Path) -> Result<Self::Resource, ResourceLoadError>;

    /// Resolves `identifier` from the local cache only. Never touches the network.
    ///
    /// # Errors
    /// Returns error if nothing usable is cached.
    fn load_local_only(&self, identifier: &str) -> Result<Self::Resource, ResourceLoadError>;

    /// Resolves `identifier`, fetching it over the network if needed.
    ///
    /// # Errors
    /// Returns error on network, hub or parse failure.
    fn load_remote(&self, identifier: &str) -> Result<Self::Resource, ResourceLoadError>;
}
