use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session token.
///
/// The full set is fixed: subject and display name identify the user, the
/// jti makes every token unique, and iat/exp/iss/aud bound its validity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (stringified user id)
    pub sub: String,

    /// Username
    pub name: String,

    /// JWT ID, random and distinct per issued token
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl SessionClaims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Numeric user identifier, stored stringified in `sub`
    /// * `username` - Display name, stored in `name`
    /// * `issuer` - Issuer recorded in `iss`
    /// * `audience` - Audience recorded in `aud`
    /// * `lifetime_hours` - Hours until the token expires
    pub fn for_user(
        user_id: i64,
        username: &str,
        issuer: &str,
        audience: &str,
        lifetime_hours: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(lifetime_hours);

        Self {
            sub: user_id.to_string(),
            name: username.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
        }
    }

    /// Parse the numeric user id out of the subject claim.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
