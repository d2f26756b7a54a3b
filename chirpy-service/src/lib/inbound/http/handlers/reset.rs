use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::config::Platform;
use crate::inbound::http::router::AppState;

/// Wipe all users and zero the hit counter. Only allowed on the dev platform.
pub async fn reset(State(state): State<AppState>) -> Result<(StatusCode, &'static str), ApiError> {
    if state.platform != Platform::Dev {
        tracing::warn!(platform = ?state.platform, "Refused reset outside dev");
        return Err(ApiError::Forbidden(
            "Reset is only allowed in dev environment".to_string(),
        ));
    }

    let deleted = state.user_service.delete_all_users().await?;
    state.file_server_hits.reset();

    tracing::info!(deleted, "State reset");

    Ok((StatusCode::OK, "OK"))
}
