use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::models::AuthResult;
use crate::account::models::ErrorKind;

pub mod login;
pub mod me;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// HTTP-facing error mapped from the rejection taxonomy.
///
/// Validation → 400, Conflict → 409, Unauthorized → 401. Infrastructure
/// failures become an opaque 500; the caller never sees their detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    InternalServerError,
}

impl ApiError {
    fn kind(&self) -> ErrorKind {
        match self {
            ApiError::BadRequest(_) => ErrorKind::Validation,
            ApiError::Conflict(_) => ErrorKind::Conflict,
            ApiError::Unauthorized(_) => ErrorKind::Unauthorized,
            ApiError::InternalServerError => ErrorKind::None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
            ),
        };

        (status, Json(AuthErrorBody::new(message, kind))).into_response()
    }
}

/// Error body shared by convention with the client classifier:
/// `{ message, errorType }` where errorType is the taxonomy integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthErrorBody {
    pub message: String,
    pub error_type: ErrorKind,
}

impl AuthErrorBody {
    pub fn new(message: String, error_type: ErrorKind) -> Self {
        Self {
            message,
            error_type,
        }
    }
}

/// Successful register/login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSessionData {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

/// Convert an orchestrator outcome into the HTTP result.
///
/// The constructors of [`AuthResult`] guarantee the populated side
/// matches `success`, so the fallbacks here are unreachable in practice.
pub fn session_response(result: AuthResult) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    if result.success {
        let (Some(token), Some(user_id), Some(username)) =
            (result.token, result.user_id, result.username)
        else {
            return Err(ApiError::InternalServerError);
        };
        return Ok(ApiSuccess::new(
            StatusCode::OK,
            AuthSessionData {
                token,
                user_id,
                username,
            },
        ));
    }

    let message = result.error_message.unwrap_or_default();
    Err(match result.error_type {
        ErrorKind::Validation => ApiError::BadRequest(message),
        ErrorKind::Conflict => ApiError::Conflict(message),
        ErrorKind::Unauthorized => ApiError::Unauthorized(message),
        ErrorKind::None => ApiError::InternalServerError,
    })
}
