use thiserror::Error;

/// Error type for token issuance and verification.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Configuration invariant violations, reported at startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("Signing key must be at least {min} characters long, got {actual}")]
    KeyTooShort { min: usize, actual: usize },

    #[error("Signing key is marked base64 but does not decode: {0}")]
    KeyNotBase64(String),

    #[error("Token issuer cannot be blank")]
    BlankIssuer,

    #[error("Token audience cannot be blank")]
    BlankAudience,

    #[error("Token lifetime must be between {min} and {max} hours, got {actual}")]
    LifetimeOutOfRange { min: i64, max: i64, actual: i64 },
}
