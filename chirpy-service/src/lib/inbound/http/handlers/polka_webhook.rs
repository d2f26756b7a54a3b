use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

const USER_UPGRADED: &str = "user.upgraded";

#[derive(Debug, Default, Deserialize)]
pub struct PolkaWebhookRequest {
    #[serde(default)]
    event: String,
    #[serde(default)]
    data: PolkaWebhookData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PolkaWebhookData {
    #[serde(default)]
    user_id: String,
}

impl PolkaWebhookRequest {
    fn parse(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Unparsable webhook body");
            Self::default()
        })
    }
}

/// Payment provider callback.
///
/// Authenticated with `Authorization: ApiKey <key>`. Only `user.upgraded`
/// has an effect; every other event is acknowledged and ignored.
///
/// The key is checked before the body is looked at. An empty or unparsable
/// body is treated as an event with no name.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let key = auth::extract_api_key(&headers)?;
    if key != &*state.polka_key {
        return Err(ApiError::Unauthorized("Invalid API key".to_string()));
    }

    let body = PolkaWebhookRequest::parse(&body);

    if body.event != USER_UPGRADED {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&body.data.user_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state.user_service.upgrade_to_chirpy_red(&user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
