// src/tokens.rs
//! Token budgets on top of any [`EncoderDecoder`].
//!
//! If the encoder is running in fallback mode these are character counts,
//! not sub-word token counts. A fail-fast encoder's initialization error is
//! returned from every call, never turned into a count.

use crate::encoder::EncoderDecoder;
use crate::error::Result;

/// Counts the number of tokens in the given text.
///
/// # Errors
/// Returns error if the encoder cannot encode.
pub fn count(encoder: &dyn EncoderDecoder, text: &str) -> Result<usize> {
    encoder.encode(text).map(|ids| ids.len())
}

/// Returns true if the text exceeds the token limit.
///
/// # Errors
/// Returns error if the encoder cannot encode.
pub fn exceeds_limit(encoder: &dyn EncoderDecoder, text: &str, limit: usize) -> Result<bool> {
    count(encoder, text).map(|n| n > limit)
}

/// Keeps the first `max_tokens` tokens of `text`.
/// Text already within budget is returned unchanged, without a decode round trip.
///
/// # Errors
/// Returns error if the encoder cannot encode or decode.
pub fn truncate_to_budget(
    encoder: &dyn EncoderDecoder,
    text: &str,
    max_tokens: usize,
) -> Result<String> {
    let ids = encoder.encode(text)?;
    if ids.len() <= max_tokens {
        return Ok(text.to_string());
    }
    encoder.decode(&ids[..max_tokens])
}
