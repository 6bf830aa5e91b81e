pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod exit;
pub mod logging;
pub mod provider;
pub mod tokens;

pub use encoder::{default_encoder, EncoderDecoder, EncoderStatus, LazyEncoder};
pub use error::{EncoderError, ResourceLoadError};
