//! Authentication infrastructure library
//!
//! Provides the credential primitives shared by the account service:
//! - Password hashing (PBKDF2-HMAC-SHA512 with per-call random salts)
//! - Signed session token issuance and verification (HS256 JWT)
//! - Startup-validated token configuration
//!
//! The service layer defines its own orchestration on top of these
//! primitives; this crate deliberately knows nothing about users,
//! storage, or transport.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password");
//! let is_valid = hasher.verify("my_password", &digest.hash, &digest.salt).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer};
//!
//! let config = TokenConfig::new(
//!     "a_signing_key_of_at_least_32_chars!",
//!     "accounts-api",
//!     "accounts-web",
//!     24,
//! ).unwrap();
//! let issuer = TokenIssuer::new(&config).unwrap();
//! let token = issuer.issue(42, "alice").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.sub, "42");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::SessionClaims;
pub use jwt::TokenConfig;
pub use jwt::TokenConfigError;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordDigest;
pub use password::PasswordError;
pub use password::PasswordHasher;
