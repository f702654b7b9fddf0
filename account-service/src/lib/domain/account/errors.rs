use thiserror::Error;

use crate::account::models::ErrorKind;

/// Input validation failures, one per rule.
///
/// Display strings are the exact user-facing messages; the client-side
/// classifier pattern-matches on them, so changing one is a wire change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is required.")]
    UsernameRequired,

    #[error("Username must be at least 3 characters long.")]
    UsernameTooShort,

    #[error("Username can only contain letters, numbers, and underscores.")]
    UsernameInvalidCharacters,

    #[error("Email is required.")]
    EmailRequired,

    #[error("Please enter a valid email address.")]
    EmailInvalid,

    #[error("Password is required.")]
    PasswordRequired,

    #[error("Password must be at least 8 characters long.")]
    PasswordTooShort,

    #[error("Password must contain at least one uppercase letter, one lowercase letter, and one number.")]
    PasswordComposition,
}

/// Taxonomy rejection of a register or login attempt.
///
/// Every variant is recoverable by the caller and safe to display.
/// `InvalidCredentials` deliberately covers both unknown-user and
/// wrong-password so the response never reveals which factor failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthRejection {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("This username is already taken. Please choose a different one.")]
    UsernameTaken,

    #[error("This email is already registered. Please use a different email address.")]
    EmailTaken,

    #[error("Invalid username or password. Please check your credentials and try again.")]
    InvalidCredentials,
}

impl AuthRejection {
    /// Taxonomy category of this rejection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthRejection::Validation(_) => ErrorKind::Validation,
            AuthRejection::UsernameTaken | AuthRejection::EmailTaken => ErrorKind::Conflict,
            AuthRejection::InvalidCredentials => ErrorKind::Unauthorized,
        }
    }
}

/// Persistence failures surfaced by a [`UserRepository`] implementation.
///
/// The duplicate variants come from the storage-level unique indexes,
/// which are the authoritative uniqueness gate under concurrent
/// registration. A cancelled or timed-out lookup must surface as
/// `Unavailable`, never as a missing user.
///
/// [`UserRepository`]: crate::account::ports::UserRepository
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Username already stored")]
    DuplicateUsername,

    #[error("Email already stored")]
    DuplicateEmail,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Infrastructure failures of the orchestrator.
///
/// These are never folded into the rejection taxonomy; the transport
/// layer maps them to an opaque 5xx.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("Storage failure: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Password verification failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    Token(#[from] auth::TokenError),
}
