use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use super::handlers::AuthErrorBody;
use crate::account::models::ErrorKind;
use crate::account::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Identity extracted from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

/// Middleware that re-verifies the session token on every protected
/// request. The client's local expiry check is advisory only; this is
/// the authority.
pub async fn authenticate<R: UserRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.auth_service.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        let message = match e {
            auth::TokenError::Expired => "Token expired.",
            _ => "Token invalid.",
        };
        unauthorized(message)
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("Token subject is not a numeric user id");
        unauthorized("Token invalid.")
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.name,
    });

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(AuthErrorBody::new(
            message.to_string(),
            ErrorKind::Unauthorized,
        )),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Token invalid."))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Token invalid."))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthorized("Token invalid."))
}
