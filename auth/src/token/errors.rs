use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` and `Invalid` are distinct variants for logging, but callers
/// must reject both identically: an expired token grants nothing more than a
/// forged one.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
