use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::DataQuery;
use crate::response_types::{ListResponse, MessageResponse, RecordResponse};

pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> Result<Json<ListResponse>, ApiError> {
    let page = query.page();
    let limit = query.limit();
    let result = state
        .record_service
        .list(query.into_filter(), page, limit)
        .await
        .map_err(|e| state.service_error("Failed to fetch data", e))?;

    Ok(Json(ListResponse {
        success: true,
        total_records: result.total_records,
        current_page: result.current_page,
        total_pages: result.total_pages,
        records_per_page: result.records_per_page,
        filters: result.filter,
        data: result.data,
    }))
}

pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, ApiError> {
    let record = state
        .record_service
        .get(&id)
        .await
        .map_err(|e| state.service_error("Failed to fetch record", e))?
        .ok_or_else(|| ApiError::NotFound("Record not found".to_owned()))?;
    Ok(Json(RecordResponse { success: true, data: record }))
}

pub async fn delete_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .record_service
        .delete_all()
        .await
        .map_err(|e| state.service_error("Failed to delete data", e))?;
    Ok(Json(MessageResponse { success: true, message: format!("Deleted {deleted} records") }))
}
