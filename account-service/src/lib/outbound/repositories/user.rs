use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::RepositoryError;
use crate::account::models::NewUser;
use crate::account::models::User;
use crate::account::ports::UserRepository;

/// Postgres adapter for the user store.
///
/// The unique indexes created by the migrations are the authoritative
/// uniqueness gate; `insert` translates their violations into typed
/// duplicate errors.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, password_salt, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
            email: r.get("email"),
            password_hash: r.get("password_hash"),
            password_salt: r.get("password_salt"),
            created_at: r.get("created_at"),
        }))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Ok(row.get(0))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        Ok(row.get(0))
    }

    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, password_salt)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return RepositoryError::DuplicateUsername;
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return RepositoryError::DuplicateEmail;
                    }
                }
            }
            RepositoryError::Unavailable(e.to_string())
        })?;

        Ok(User {
            id: row.get("id"),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            password_salt: user.password_salt,
            created_at: row.get("created_at"),
        })
    }
}
