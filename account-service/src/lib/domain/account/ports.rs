use async_trait::async_trait;

use crate::account::errors::RepositoryError;
use crate::account::models::NewUser;
use crate::account::models::User;

/// Persistence operations consumed by the auth orchestrator.
///
/// Implementations must be cancellation-safe: a lookup aborted by the
/// caller propagates as `Unavailable`, never as an empty result.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve a user by exact username.
    ///
    /// # Returns
    /// The user, or None if no such username is stored
    ///
    /// # Errors
    /// * `Unavailable` - Storage unreachable or the lookup was cancelled
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Check whether a username is already registered.
    ///
    /// # Errors
    /// * `Unavailable` - Storage unreachable or the lookup was cancelled
    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError>;

    /// Check whether an email is already registered.
    ///
    /// The caller passes the email already lowercased.
    ///
    /// # Errors
    /// * `Unavailable` - Storage unreachable or the lookup was cancelled
    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError>;

    /// Persist a new user and return it with its assigned id.
    ///
    /// This is the authoritative uniqueness gate: a concurrent duplicate
    /// that slipped past the existence checks must surface here as
    /// `DuplicateUsername` or `DuplicateEmail` from the unique indexes.
    ///
    /// # Errors
    /// * `DuplicateUsername` / `DuplicateEmail` - Unique index violation
    /// * `Unavailable` - Storage unreachable or the insert was cancelled
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
}
