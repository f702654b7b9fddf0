use std::sync::Arc;

use auth::PasswordHasher;
use auth::SessionClaims;
use auth::TokenError;
use auth::TokenIssuer;

use crate::account::errors::AuthRejection;
use crate::account::errors::AuthServiceError;
use crate::account::errors::RepositoryError;
use crate::account::models::AuthResult;
use crate::account::models::LoginRequest;
use crate::account::models::NewUser;
use crate::account::models::RegisterRequest;
use crate::account::models::ValidatedLogin;
use crate::account::models::ValidatedRegistration;
use crate::account::ports::UserRepository;

/// Auth orchestrator: validates input, checks uniqueness, drives the
/// hasher and token issuer, and returns a uniform [`AuthResult`].
///
/// Stateless and reentrant; every call is one-shot with no retries.
/// Taxonomy rejections come back as `Ok(AuthResult)` while
/// infrastructure failures use the `Err` channel so the transport layer
/// can keep them opaque.
pub struct AuthService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
    password_hasher: PasswordHasher,
    token_issuer: Arc<TokenIssuer>,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    /// Create the orchestrator with injected collaborators.
    pub fn new(repository: Arc<R>, token_issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }

    /// Register a new account.
    ///
    /// Validation short-circuits before any storage access; the username
    /// existence check runs before the email check, and the email check
    /// only runs when the username is free. The insert remains the
    /// authoritative uniqueness gate for concurrent registrations.
    ///
    /// # Errors
    /// * `AuthServiceError` - Storage, hashing, or signing infrastructure
    ///   failed; never a taxonomy rejection
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<AuthResult, AuthServiceError> {
        let registration = match ValidatedRegistration::parse(request) {
            Ok(registration) => registration,
            Err(violation) => return Ok(AuthResult::rejected(violation.into())),
        };

        if self
            .repository
            .username_exists(&registration.username)
            .await?
        {
            return Ok(AuthResult::rejected(AuthRejection::UsernameTaken));
        }
        if self.repository.email_exists(&registration.email).await? {
            return Ok(AuthResult::rejected(AuthRejection::EmailTaken));
        }

        let digest = self.password_hasher.hash(&registration.password);
        let new_user = NewUser {
            username: registration.username,
            email: registration.email,
            password_hash: digest.hash,
            password_salt: digest.salt,
        };

        let user = match self.repository.insert(new_user).await {
            Ok(user) => user,
            // Lost the race against a concurrent registration.
            Err(RepositoryError::DuplicateUsername) => {
                return Ok(AuthResult::rejected(AuthRejection::UsernameTaken));
            }
            Err(RepositoryError::DuplicateEmail) => {
                return Ok(AuthResult::rejected(AuthRejection::EmailTaken));
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.token_issuer.issue(user.id, &user.username)?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(AuthResult::authenticated(token, user.id, user.username))
    }

    /// Authenticate an existing account.
    ///
    /// Unknown usernames and wrong passwords produce the identical
    /// rejection; the hasher is not invoked when the user is unknown.
    ///
    /// # Errors
    /// * `AuthServiceError` - Storage, hashing, or signing infrastructure
    ///   failed; never a taxonomy rejection
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResult, AuthServiceError> {
        let login = match ValidatedLogin::parse(request) {
            Ok(login) => login,
            Err(violation) => return Ok(AuthResult::rejected(violation.into())),
        };

        let user = match self.repository.find_by_username(&login.username).await? {
            Some(user) => user,
            None => return Ok(AuthResult::rejected(AuthRejection::InvalidCredentials)),
        };

        let password_matches = self.password_hasher.verify(
            &login.password,
            &user.password_hash,
            &user.password_salt,
        )?;
        if !password_matches {
            return Ok(AuthResult::rejected(AuthRejection::InvalidCredentials));
        }

        let token = self.token_issuer.issue(user.id, &user.username)?;

        tracing::info!(user_id = user.id, username = %user.username, "User logged in");

        Ok(AuthResult::authenticated(token, user.id, user.username))
    }

    /// Verify a presented session token, as consumed by middleware.
    ///
    /// # Errors
    /// * `TokenError` - Signature, issuer, audience, or expiry check failed
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.token_issuer.verify(token)
    }
}
