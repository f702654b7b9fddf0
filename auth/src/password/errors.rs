use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Stored password hash is not valid base64: {0}")]
    InvalidHash(String),

    #[error("Stored password salt is not valid base64: {0}")]
    InvalidSalt(String),
}
