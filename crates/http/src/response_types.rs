//! Response types (Serialize)

use applicant_ingest_core::{ApplicantFilter, IngestSummary, StoredApplicant};
use applicant_ingest_storage::StorageStats;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self { success: false, message }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(flatten)]
    pub summary: IngestSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub success: bool,
    pub total_records: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub records_per_page: u64,
    pub filters: ApplicantFilter,
    pub data: Vec<StoredApplicant>,
}

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub success: bool,
    pub data: StoredApplicant,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: StorageStats,
}
