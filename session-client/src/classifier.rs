//! Classifies opaque failure payloads into the shared error taxonomy.
//!
//! Failures arrive in several shapes depending on where they surfaced:
//! a raw HTTP response body, a form-action failure object, or a thrown
//! exception. All of them funnel through [`classify`], which prefers
//! the explicit `errorType` the server attaches and only falls back to
//! message-text inference when none is present.

use serde_json::Value;

/// Message shown when a failure carries no usable text at all.
pub const DEFAULT_FALLBACK: &str = "An unexpected error occurred";

/// The error taxonomy shared with the server, as wire integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    None,
    Validation,
    Conflict,
    Unauthorized,
}

impl ErrorKind {
    pub fn from_u8(value: u8) -> Option<ErrorKind> {
        match value {
            0 => Some(ErrorKind::None),
            1 => Some(ErrorKind::Validation),
            2 => Some(ErrorKind::Conflict),
            3 => Some(ErrorKind::Unauthorized),
            _ => None,
        }
    }
}

/// A failure as it arrived, before classification.
#[derive(Debug, Clone)]
pub enum FailurePayload {
    /// A response body from a direct HTTP call.
    Response { status: Option<u16>, body: Value },
    /// The `data` object of a failed form action.
    ActionFailure { status: Option<u16>, data: Value },
    /// A thrown exception with only a message.
    Exception { message: String },
    /// Nothing usable was captured.
    Unknown,
}

/// The classified result: a display message plus its taxonomy slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub message: String,
    pub kind: ErrorKind,
    pub status: Option<u16>,
}

/// Ordered substring sequences that map known message texts to a kind.
/// Matching is case-insensitive and the words must appear in order.
const VALIDATION_PATTERNS: &[&[&str]] = &[
    &["username", "required"],
    &["email", "required"],
    &["password", "required"],
    &["password", "8", "characters"],
    &["password", "uppercase", "lowercase", "number"],
];

const CONFLICT_PATTERNS: &[&[&str]] = &[
    &["username", "taken"],
    &["email", "registered"],
];

const UNAUTHORIZED_PATTERNS: &[&[&str]] = &[
    &["invalid", "username", "password"],
    &["token", "expired"],
    &["token", "invalid"],
];

/// Classifies a failure payload.
///
/// Resolution order:
/// 1. An explicit `errorType` integer in the payload body wins.
/// 2. Otherwise the message text is matched against the known server
///    messages to infer a kind.
/// 3. A payload with no usable message classifies as [`ErrorKind::None`]
///    with `fallback` (or [`DEFAULT_FALLBACK`]) as the message.
pub fn classify(payload: &FailurePayload, fallback: Option<&str>) -> ClassifiedError {
    let fallback = fallback.unwrap_or(DEFAULT_FALLBACK);

    let (status, message, explicit_kind) = match payload {
        FailurePayload::Response { status, body } => {
            (*status, extract_message(body), extract_kind(body))
        }
        FailurePayload::ActionFailure { status, data } => {
            (*status, extract_message(data), extract_kind(data))
        }
        FailurePayload::Exception { message } => {
            let trimmed = message.trim();
            let message = (!trimmed.is_empty()).then(|| trimmed.to_string());
            (None, message, None)
        }
        FailurePayload::Unknown => (None, None, None),
    };

    match message {
        Some(message) => {
            let kind = explicit_kind.unwrap_or_else(|| infer_kind(&message));
            ClassifiedError {
                message,
                kind,
                status,
            }
        }
        None => ClassifiedError {
            message: fallback.to_string(),
            kind: explicit_kind.unwrap_or(ErrorKind::None),
            status,
        },
    }
}

/// Rewrites a classified error into gentler display text where the
/// server message is too mechanical for a form banner.
pub fn user_friendly_message(error: &ClassifiedError) -> String {
    match error.kind {
        ErrorKind::Conflict => {
            "This information is already in use. Please try something different.".to_string()
        }
        ErrorKind::Unauthorized => {
            "Authentication failed. Please check your credentials and try again.".to_string()
        }
        ErrorKind::None | ErrorKind::Validation => error.message.clone(),
    }
}

fn extract_message(body: &Value) -> Option<String> {
    let text = body.get("message")?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn extract_kind(body: &Value) -> Option<ErrorKind> {
    let raw = body.get("errorType")?.as_u64()?;
    ErrorKind::from_u8(u8::try_from(raw).ok()?)
}

fn infer_kind(message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();
    if matches_any(&lowered, CONFLICT_PATTERNS) {
        ErrorKind::Conflict
    } else if matches_any(&lowered, UNAUTHORIZED_PATTERNS) {
        ErrorKind::Unauthorized
    } else if matches_any(&lowered, VALIDATION_PATTERNS) {
        ErrorKind::Validation
    } else {
        ErrorKind::None
    }
}

fn matches_any(lowered: &str, patterns: &[&[&str]]) -> bool {
    patterns.iter().any(|words| matches_in_order(lowered, words))
}

/// True when every word appears in the text, in order.
fn matches_in_order(lowered: &str, words: &[&str]) -> bool {
    let mut rest = lowered;
    for word in words {
        match rest.find(word) {
            Some(at) => rest = &rest[at + word.len()..],
            None => return false,
        }
    }
    true
}
