//! State codec: AppState <-> the store's string representation.
//!
//! Encoding is canonical (the vote table is ordered maps all the way
//! down), so `decode(encode(s)) == s` for every valid state and equal
//! states encode to equal strings.
//!
//! Decoding is defensive: malformed JSON and states that parse but break
//! the AppState invariants both fail with [`CodecError`]. Callers fall
//! back to the last known-good in-memory state; a bad payload never
//! crashes a context.

use livepoll_domain::{AppState, DomainError};
use thiserror::Error;

/// Why a stored payload could not be turned into an [`AppState`].
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed state payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("decoded state rejected: {0}")]
    Invalid(#[from] DomainError),
}

/// Serialize a state for persistence.
pub fn encode(state: &AppState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(state)?)
}

/// Deserialize and validate a persisted state.
pub fn decode(raw: &str) -> Result<AppState, CodecError> {
    let state: AppState = serde_json::from_str(raw)?;
    state.validate()?;
    Ok(state)
}

/// Serialize just the question list (the bootstrap cache key).
pub fn encode_questions(state: &AppState) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&state.questions)?)
}
