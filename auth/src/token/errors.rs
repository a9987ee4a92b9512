use thiserror::Error;

/// Error type for token operations.
///
/// `verify` collapses every decode failure into `Invalid` or `Expired`;
/// callers that must not leak which one occurred simply treat both the same.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid: {0}")]
    Invalid(String),

    #[error("Token is expired")]
    Expired,
}
