use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::RepositoryError;
use account_service::account::models::NewUser;
use account_service::account::models::User;
use account_service::account::ports::UserRepository;
use account_service::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::TokenConfig;
use auth::TokenIssuer;
use axum::Router;
use chrono::Utc;

/// In-memory stand-in for the Postgres adapter.
///
/// Duplicates are rejected at insert, mirroring the unique indexes that
/// back the real store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email == email))
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::DuplicateUsername);
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let stored = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            password_salt: user.password_salt,
            created_at: Utc::now(),
        };
        users.push(stored.clone());
        Ok(stored)
    }
}

pub fn test_router() -> Router {
    let config = TokenConfig::new(
        "integration_test_key_32_chars_min!!!",
        "accounts-api",
        "accounts-web",
        24,
    )
    .unwrap();
    let token_issuer = Arc::new(TokenIssuer::new(&config).unwrap());
    let repository = Arc::new(InMemoryUserRepository::new());
    let auth_service = Arc::new(AuthService::new(repository, token_issuer));

    create_router(auth_service)
}
