use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Identity probe for an authenticated session.
///
/// The middleware has already verified the token; this just echoes the
/// claims it extracted.
pub async fn me(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<MeResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            user_id: user.user_id,
            username: user.username,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponseData {
    pub user_id: i64,
    pub username: String,
}
