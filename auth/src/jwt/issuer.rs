use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::config::TokenConfig;
use super::errors::TokenConfigError;
use super::errors::TokenError;

/// Issues and verifies signed session tokens.
///
/// Signs with HS256 using the symmetric key from [`TokenConfig`].
/// Verification enforces signature, issuer, audience, and expiry
/// simultaneously with zero clock-skew leeway; any single failure
/// invalidates the token.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime_hours: i64,
}

impl TokenIssuer {
    /// Build an issuer from validated configuration.
    ///
    /// # Errors
    /// * `TokenConfigError` - Signing key fails to resolve
    pub fn new(config: &TokenConfig) -> Result<Self, TokenConfigError> {
        let key = config.signing_key()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer()]);
        validation.set_audience(&[config.audience()]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&key),
            decoding_key: DecodingKey::from_secret(&key),
            validation,
            issuer: config.issuer().to_string(),
            audience: config.audience().to_string(),
            lifetime_hours: config.lifetime_hours(),
        })
    }

    /// Mint a signed, time-bounded token for an authenticated user.
    ///
    /// Every call produces a distinct jti, so two tokens for the same
    /// user are never identical.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token serialization or signing failed
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        let claims = SessionClaims::for_user(
            user_id,
            username,
            &self.issuer,
            &self.audience,
            self.lifetime_hours,
        );

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a presented token and decode its claims.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Signature, issuer, or audience check failed, or the
    ///   token is malformed
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    const KEY: &str = "test_signing_key_at_least_32_bytes_long!";

    fn issuer() -> TokenIssuer {
        let config = TokenConfig::new(KEY, "accounts-api", "accounts-web", 24).unwrap();
        TokenIssuer::new(&config).unwrap()
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let issuer = issuer();

        let token = issuer.issue(42, "alice").expect("Failed to issue token");
        let claims = issuer.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.iss, "accounts-api");
        assert_eq!(claims.aud, "accounts-web");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_two_tokens_have_distinct_jti() {
        let issuer = issuer();

        let first = issuer.issue(42, "alice").unwrap();
        let second = issuer.issue(42, "alice").unwrap();

        // Signature check is irrelevant here, both come from our own key.
        let first_claims = issuer.verify(&first).unwrap();
        let second_claims = issuer.verify(&second).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }

    #[test]
    fn test_expired_token_rejected_despite_valid_signature() {
        let issuer = issuer();

        let now = Utc::now();
        let claims = SessionClaims {
            sub: "42".to_string(),
            name: "alice".to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
            iss: "accounts-api".to_string(),
            aud: "accounts-web".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(KEY.as_bytes()),
        )
        .unwrap();

        assert!(matches!(issuer.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_issuer_or_audience_rejected() {
        let issuer = issuer();

        let foreign_config =
            TokenConfig::new(KEY, "some-other-service", "accounts-web", 24).unwrap();
        let foreign = TokenIssuer::new(&foreign_config).unwrap();
        let token = foreign.issue(42, "alice").unwrap();

        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid(_))));

        let foreign_audience_config =
            TokenConfig::new(KEY, "accounts-api", "some-other-client", 24).unwrap();
        let foreign_audience = TokenIssuer::new(&foreign_audience_config).unwrap();
        let token = foreign_audience.issue(42, "alice").unwrap();

        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let issuer = issuer();

        let other_config = TokenConfig::new(
            "another_signing_key_at_least_32_bytes!!",
            "accounts-api",
            "accounts-web",
            24,
        )
        .unwrap();
        let other = TokenIssuer::new(&other_config).unwrap();
        let token = other.issue(42, "alice").unwrap();

        assert!(matches!(issuer.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = issuer();

        assert!(issuer.verify("not-a-jwt").is_err());
        assert!(issuer.verify("a.b.c").is_err());
        assert!(issuer.verify("").is_err());
    }

    #[test]
    fn test_base64_key_issues_verifiable_tokens() {
        // Same key material supplied raw and base64-wrapped must interoperate.
        let encoded = format!(
            "base64:{}",
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, KEY)
        );
        let config = TokenConfig::new(encoded, "accounts-api", "accounts-web", 24).unwrap();
        let wrapped = TokenIssuer::new(&config).unwrap();

        let token = wrapped.issue(7, "bob").unwrap();
        let claims = issuer().verify(&token).expect("Keys should match");
        assert_eq!(claims.sub, "7");
    }
}
