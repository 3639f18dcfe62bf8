use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::StatsResponse;

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state
        .record_service
        .stats()
        .await
        .map_err(|e| state.service_error("Failed to fetch statistics", e))?;
    Ok(Json(StatsResponse { success: true, stats }))
}
