use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use super::errors::TokenConfigError;

const MIN_KEY_LENGTH: usize = 32;
const MIN_LIFETIME_HOURS: i64 = 1;
const MAX_LIFETIME_HOURS: i64 = 168;

/// Prefix marking a signing key that must be base64-decoded before use.
///
/// Operators supply high-entropy binary keys as `base64:<payload>`; plain
/// text keys are used as raw UTF-8 bytes.
const BASE64_KEY_PREFIX: &str = "base64:";

/// Validated token issuance configuration.
///
/// All invariants are enforced once at construction so a misconfigured
/// service fails at startup instead of on the first request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    key: String,
    issuer: String,
    audience: String,
    lifetime_hours: i64,
}

impl TokenConfig {
    /// Validate and build a token configuration.
    ///
    /// # Arguments
    /// * `key` - Signing key, optionally `base64:`-prefixed
    /// * `issuer` - Issuer embedded in and required of every token
    /// * `audience` - Audience embedded in and required of every token
    /// * `lifetime_hours` - Token lifetime, 1 to 168 hours
    ///
    /// # Errors
    /// * `KeyTooShort` - Key shorter than 32 characters (pre-decode)
    /// * `KeyNotBase64` - `base64:`-prefixed payload fails to decode
    /// * `BlankIssuer` / `BlankAudience` - Whitespace-only value
    /// * `LifetimeOutOfRange` - Lifetime outside [1, 168]
    pub fn new(
        key: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        lifetime_hours: i64,
    ) -> Result<Self, TokenConfigError> {
        let key = key.into();
        let issuer = issuer.into();
        let audience = audience.into();

        if key.len() < MIN_KEY_LENGTH {
            return Err(TokenConfigError::KeyTooShort {
                min: MIN_KEY_LENGTH,
                actual: key.len(),
            });
        }
        if issuer.trim().is_empty() {
            return Err(TokenConfigError::BlankIssuer);
        }
        if audience.trim().is_empty() {
            return Err(TokenConfigError::BlankAudience);
        }
        if !(MIN_LIFETIME_HOURS..=MAX_LIFETIME_HOURS).contains(&lifetime_hours) {
            return Err(TokenConfigError::LifetimeOutOfRange {
                min: MIN_LIFETIME_HOURS,
                max: MAX_LIFETIME_HOURS,
                actual: lifetime_hours,
            });
        }

        let config = Self {
            key,
            issuer,
            audience,
            lifetime_hours,
        };

        // Surface an undecodable base64 payload at startup too.
        config.signing_key()?;

        Ok(config)
    }

    /// Resolve the raw signing key bytes.
    ///
    /// A `base64:`-prefixed key is decoded; anything else is taken as
    /// literal UTF-8 bytes.
    pub fn signing_key(&self) -> Result<Vec<u8>, TokenConfigError> {
        match self.key.strip_prefix(BASE64_KEY_PREFIX) {
            Some(encoded) => BASE64
                .decode(encoded)
                .map_err(|e| TokenConfigError::KeyNotBase64(e.to_string())),
            None => Ok(self.key.as_bytes().to_vec()),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn lifetime_hours(&self) -> i64 {
        self.lifetime_hours
    }
}
