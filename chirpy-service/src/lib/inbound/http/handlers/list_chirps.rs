use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::domain::chirp::models::ChirpSort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsQuery {
    author_id: Option<String>,
    sort: Option<String>,
}

pub async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    let author = query
        .author_id
        .as_deref()
        .map(UserId::from_string)
        .transpose()
        .map_err(|e| ApiError::BadRequest(format!("Invalid author_id: {}", e)))?;

    let sort = ChirpSort::from_query(query.sort.as_deref());

    let chirps = state.chirp_service.list_chirps(author, sort).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        chirps.iter().map(ChirpData::from).collect(),
    ))
}
