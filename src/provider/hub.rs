// src/provider/hub.rs
//! Hugging Face backed provider: `tokenizers` for the model, `hf-hub` for the
//! cache layout and downloads.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Cache, Repo};
use tokenizers::Tokenizer;
use walkdir::WalkDir;

use super::{ResourceProvider, TokenizerResource};
use crate::config::EncoderConfig;
use crate::error::{EncoderError, ResourceLoadError};

const TOKENIZER_FILE: &str = "tokenizer.json";

/// A `tokenizers::Tokenizer` plus the special-token flags it is called with.
///
/// `Tokenizer::encode` and `Tokenizer::decode` take `&self` and the type is
/// `Sync`, so one instance serves concurrent callers without a lock.
pub struct HubTokenizer {
    inner: Tokenizer,
    add_special_tokens: bool,
    skip_special_tokens: bool,
}

impl HubTokenizer {
    #[must_use]
    pub fn new(inner: Tokenizer, add_special_tokens: bool, skip_special_tokens: bool) -> Self {
        Self {
            inner,
            add_special_tokens,
            skip_special_tokens,
        }
    }
}

impl TokenizerResource for HubTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>, EncoderError> {
        self.inner
            .encode(text, self.add_special_tokens)
            .map(|encoding| encoding.get_ids().to_vec())
            .map_err(|e| EncoderError::Encode(e.to_string()))
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, EncoderError> {
        self.inner
            .decode(tokens, self.skip_special_tokens)
            .map_err(|e| EncoderError::Decode(e.to_string()))
    }
}

#[derive(Clone)]
pub struct HubProvider {
    cache: Cache,
    offline: bool,
    add_special_tokens: bool,
    skip_special_tokens: bool,
}

// `hf_hub::Cache` does not implement `Debug`; show its root path instead.
impl std::fmt::Debug for HubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubProvider")
            .field("cache", &self.cache.path())
            .field("offline", &self.offline)
            .field("add_special_tokens", &self.add_special_tokens)
            .field("skip_special_tokens", &self.skip_special_tokens)
            .finish()
    }
}

impl HubProvider {
    /// Builds a provider from config. The cache root is `cache_dir` when set,
    /// otherwise whatever `hf-hub` derives from `HF_HOME`.
    #[must_use]
    pub fn from_config(config: &EncoderConfig) -> Self {
        let cache = config
            .cache_dir
            .clone()
            .map_or_else(Cache::default, Cache::new);
        Self {
            cache,
            offline: config.offline,
            add_special_tokens: config.add_special_tokens,
            skip_special_tokens: config.skip_special_tokens,
        }
    }

    #[must_use]
    pub fn cache_root(&self) -> &Path {
        self.cache.path()
    }

    fn wrap(&self, tokenizer: Tokenizer) -> HubTokenizer {
        HubTokenizer::new(tokenizer, self.add_special_tokens, self.skip_special_tokens)
    }
}

/// Directory name `hf-hub` uses for a model repo, e.g. `models--Xenova--claude-tokenizer`.
#[must_use]
pub fn repo_folder_name(identifier: &str) -> String {
    format!("models--{}", identifier.replace('/', "--"))
}

impl ResourceProvider for HubProvider {
    type Resource = HubTokenizer;

    fn cached_paths(&self, identifier: &str) -> Vec<PathBuf> {
        let repo_dir = self.cache.path().join(repo_folder_name(identifier));
        if !repo_dir.is_dir() {
            return Vec::new();
        }

        let mut found: Vec<(Option<SystemTime>, PathBuf)> = WalkDir::new(&repo_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_name() == TOKENIZER_FILE && e.path().is_file())
            .map(|e| {
                let modified = e.metadata().ok().and_then(|m| m.modified().ok());
                (modified, e.into_path())
            })
            .collect();

        // Newest snapshot first.
        found.sort_by(|a, b| b.0.cmp(&a.0));
        found.into_iter().map(|(_, p)| p).collect()
    }

    fn load_from_path(&self, path: &Path) -> Result<HubTokenizer, ResourceLoadError> {
        if !path.is_file() {
            return Err(ResourceLoadError::Io {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "tokenizer file missing"),
                path: path.to_path_buf(),
            });
        }
        Tokenizer::from_file(path)
            .map(|t| self.wrap(t))
            .map_err(|e| ResourceLoadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn load_local_only(&self, identifier: &str) -> Result<HubTokenizer, ResourceLoadError> {
        let path = self
            .cache
            .repo(Repo::model(identifier.to_string()))
            .get(TOKENIZER_FILE)
            .ok_or_else(|| ResourceLoadError::NotCached {
                identifier: identifier.to_string(),
            })?;
        self.load_from_path(&path)
    }

    fn load_remote(&self, identifier: &str) -> Result<HubTokenizer, ResourceLoadError> {
        if self.offline {
            return Err(ResourceLoadError::Offline {
                identifier: identifier.to_string(),
            });
        }
        let hub_err = |e: hf_hub::api::sync::ApiError| ResourceLoadError::Hub {
            identifier: identifier.to_string(),
            message: e.to_string(),
        };
        let api = ApiBuilder::new()
            .with_cache_dir(self.cache.path().clone())
            .with_progress(false)
            .build()
            .map_err(hub_err)?;
        let path = api
            .model(identifier.to_string())
            .get(TOKENIZER_FILE)
            .map_err(hub_err)?;
        self.load_from_path(&path)
    }
}
