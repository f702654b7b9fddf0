use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// Error type for local token inspection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenDecodeError {
    #[error("Token is not three dot-separated segments")]
    MalformedToken,

    #[error("Token payload is not valid base64url: {0}")]
    PayloadNotBase64(String),

    #[error("Token payload holds no parseable claims: {0}")]
    PayloadNotClaims(String),

    #[error("Token carries no usable identity claims")]
    MissingIdentity,
}

/// Claims read out of a locally held token.
///
/// Every field is optional: this is whatever the payload happens to
/// contain, not a verified claims set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Alternative user id claim emitted by some token stacks.
    #[serde(default)]
    pub nameid: Option<String>,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub aud: Option<String>,
}

/// Identity extracted from a cached token for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// Check the compact-serialization shape: three non-empty segments.
pub fn is_valid_format(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    parts.len() == 3 && parts.iter().all(|part| !part.is_empty())
}

/// Decode the payload segment of a token without verifying anything.
///
/// This is a pure parse for UX decisions; it must never stand in for
/// server-side verification.
///
/// # Errors
/// * `MalformedToken` - Not three non-empty dot-separated segments
/// * `PayloadNotBase64` - Payload segment fails base64url decoding
/// * `PayloadNotClaims` - Payload is not a JSON claims object
pub fn decode_payload(token: &str) -> Result<TokenPayload, TokenDecodeError> {
    if !is_valid_format(token) {
        return Err(TokenDecodeError::MalformedToken);
    }

    let payload_segment = token
        .split('.')
        .nth(1)
        .ok_or(TokenDecodeError::MalformedToken)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_segment)
        .map_err(|e| TokenDecodeError::PayloadNotBase64(e.to_string()))?;

    let value: serde_json::Value = serde_json::from_slice(&payload_bytes)
        .map_err(|e| TokenDecodeError::PayloadNotClaims(e.to_string()))?;
    if !value.is_object() {
        return Err(TokenDecodeError::PayloadNotClaims(
            "payload is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| TokenDecodeError::PayloadNotClaims(e.to_string()))
}

/// Judge a locally held token expired relative to an explicit clock.
///
/// Fail closed: any decode failure counts as expired. A payload without
/// an exp claim is not considered expired; the server still rejects
/// whatever it does not like.
pub fn is_expired_at(token: &str, now_secs: i64) -> bool {
    match decode_payload(token) {
        Ok(payload) => payload.exp.map_or(false, |exp| exp < now_secs),
        Err(_) => true,
    }
}

/// Judge a locally held token expired against the current time.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp())
}

/// Extract the user identity from a cached token.
///
/// # Errors
/// * `TokenDecodeError` - Token undecodable, or neither `sub` nor
///   `nameid` holds a numeric id, or the name claim is absent
pub fn extract_user(token: &str) -> Result<SessionUser, TokenDecodeError> {
    let payload = decode_payload(token)?;

    let id = payload
        .sub
        .as_deref()
        .and_then(|sub| sub.parse().ok())
        .or_else(|| payload.nameid.as_deref().and_then(|id| id.parse().ok()))
        .ok_or(TokenDecodeError::MissingIdentity)?;
    let username = payload.name.ok_or(TokenDecodeError::MissingIdentity)?;

    Ok(SessionUser {
        id,
        username,
        token: token.to_string(),
    })
}
