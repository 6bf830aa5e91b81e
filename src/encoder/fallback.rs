// src/encoder/fallback.rs
//! Code-point encoding used when no tokenizer could be loaded.
//!
//! One id per Unicode scalar value. Not a real tokenization: counts taken in
//! this mode are character counts.

/// Substituted for ids that are not Unicode scalar values.
pub const REPLACEMENT: char = '?';

#[must_use]
pub fn encode(text: &str) -> Vec<u32> {
    text.chars().map(u32::from).collect()
}

/// Ids at or above `0x110000`, and surrogate ids, decode to [`REPLACEMENT`].
#[must_use]
pub fn decode(tokens: &[u32]) -> String {
    tokens
        .iter()
        .map(|&t| char::from_u32(t).unwrap_or(REPLACEMENT))
        .collect()
}
