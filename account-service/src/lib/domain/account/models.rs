use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AuthRejection;
use crate::account::errors::ValidationError;

/// Registered user record.
///
/// The id is assigned by storage on insert and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub created_at: DateTime<Utc>,
}

/// User awaiting insertion; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
}

/// Raw registration payload as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Raw login payload as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

const USERNAME_MIN_LENGTH: usize = 3;
const PASSWORD_MIN_LENGTH: usize = 8;

/// Registration input that has passed every validation rule.
///
/// Validates as a whole and either yields this immutable record or the
/// first violated rule; there is no partially-valid state. Username is
/// trimmed, email is lowercased before any uniqueness check or store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl ValidatedRegistration {
    /// Validate a raw registration request.
    ///
    /// Rules run in a fixed order (username presence, length, charset;
    /// email presence, shape; password presence, length, composition)
    /// and the first violation wins.
    ///
    /// # Errors
    /// * `ValidationError` - First violated rule, with its display message
    pub fn parse(request: RegisterRequest) -> Result<Self, ValidationError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if username.chars().count() < USERNAME_MIN_LENGTH {
            return Err(ValidationError::UsernameTooShort);
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValidationError::UsernameInvalidCharacters);
        }

        let email = request.email.trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if email_address::EmailAddress::from_str(&email).is_err() {
            return Err(ValidationError::EmailInvalid);
        }
        let email = email.to_lowercase();

        let password = request.password;
        if password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }
        let has_upper = password.chars().any(|c| c.is_uppercase());
        let has_lower = password.chars().any(|c| c.is_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !(has_upper && has_lower && has_digit) {
            return Err(ValidationError::PasswordComposition);
        }

        Ok(Self {
            username,
            email,
            password,
        })
    }
}

/// Login input that has passed the presence checks.
///
/// Login applies no format rules, only presence; format errors would
/// leak which usernames exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLogin {
    pub username: String,
    pub password: String,
}

impl ValidatedLogin {
    /// Validate a raw login request. Username is trimmed before lookup.
    ///
    /// # Errors
    /// * `ValidationError` - Username or password missing
    pub fn parse(request: LoginRequest) -> Result<Self, ValidationError> {
        let username = request.username.trim().to_string();
        if username.is_empty() {
            return Err(ValidationError::UsernameRequired);
        }
        if request.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }

        Ok(Self {
            username,
            password: request.password,
        })
    }
}

/// Closed taxonomy of authentication failure categories.
///
/// Serialized as the integers 0-3; the client mirrors this convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    None,
    Validation,
    Conflict,
    Unauthorized,
}

impl ErrorKind {
    pub fn as_u8(self) -> u8 {
        match self {
            ErrorKind::None => 0,
            ErrorKind::Validation => 1,
            ErrorKind::Conflict => 2,
            ErrorKind::Unauthorized => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ErrorKind::None),
            1 => Some(ErrorKind::Validation),
            2 => Some(ErrorKind::Conflict),
            3 => Some(ErrorKind::Unauthorized),
            _ => None,
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        ErrorKind::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown error kind {value}")))
    }
}

/// Uniform outcome of a register or login call.
///
/// Exactly one side is populated: token/user_id/username on success,
/// error_message plus a non-None kind on rejection. The constructors are
/// the only way to build one, which keeps `success ⇔ kind == None` true.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub error_type: ErrorKind,
}

impl AuthResult {
    /// Successful authentication carrying the minted token and identity.
    pub fn authenticated(token: String, user_id: i64, username: String) -> Self {
        Self {
            success: true,
            token: Some(token),
            user_id: Some(user_id),
            username: Some(username),
            error_message: None,
            error_type: ErrorKind::None,
        }
    }

    /// Rejected authentication carrying the taxonomy category and its
    /// safe-to-display message.
    pub fn rejected(rejection: AuthRejection) -> Self {
        Self {
            success: false,
            token: None,
            user_id: None,
            username: None,
            error_message: Some(rejection.to_string()),
            error_type: rejection.kind(),
        }
    }
}
