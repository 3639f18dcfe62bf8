use std::sync::Arc;

use applicant_ingest_core::MAX_UPLOAD_BYTES;
use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::UploadResponse;

const EXCEL_MIME_TYPES: [&str; 2] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];
const TOO_LARGE: &str = "File is too large. Maximum size is 10MB.";

struct UploadedFile {
    data: Vec<u8>,
    filename: Option<String>,
    content_type: Option<String>,
}

impl UploadedFile {
    fn is_excel(&self) -> bool {
        let mime_ok = self.content_type.as_deref().is_some_and(|ct| EXCEL_MIME_TYPES.contains(&ct));
        let name_ok = self.filename.as_deref().is_some_and(|name| {
            let lower = name.to_ascii_lowercase();
            lower.ends_with(".xls") || lower.ends_with(".xlsx")
        });
        mime_ok || name_ok
    }
}

fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BadRequest(TOO_LARGE.to_owned())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Reads the `file` part of the form, skipping any other fields.
async fn extract_file(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(&e))? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().map(ToOwned::to_owned);
        let content_type = field.content_type().map(ToOwned::to_owned);
        let data = field.bytes().await.map_err(|e| multipart_error(&e))?;
        return Ok(Some(UploadedFile { data: data.to_vec(), filename, content_type }));
    }
    Ok(None)
}

pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let no_file = || ApiError::BadRequest("No file uploaded".to_owned());
    let mut multipart = multipart.map_err(|_| no_file())?;
    let file = extract_file(&mut multipart).await?.ok_or_else(no_file)?;

    if !file.is_excel() {
        return Err(ApiError::BadRequest("Only Excel files (.xls, .xlsx) are allowed".to_owned()));
    }
    if file.data.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::BadRequest(TOO_LARGE.to_owned()));
    }

    tracing::info!(
        filename = file.filename.as_deref().unwrap_or_default(),
        bytes = file.data.len(),
        "processing upload"
    );
    let summary = state
        .ingest_service
        .ingest(file.data)
        .await
        .map_err(|e| state.service_error("Failed to process file", e))?;

    Ok(Json(UploadResponse { success: true, message: "File uploaded successfully", summary }))
}
