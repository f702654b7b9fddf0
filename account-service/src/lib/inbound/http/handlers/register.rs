use axum::extract::State;
use axum::Json;

use super::session_response;
use super::ApiError;
use super::ApiSuccess;
use super::AuthSessionData;
use crate::account::models::RegisterRequest;
use crate::account::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn register<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    let result = state.auth_service.register(body).await.map_err(|e| {
        tracing::error!(error = %e, "Registration infrastructure failure");
        ApiError::InternalServerError
    })?;

    session_response(result)
}
