use anyhow::{Result, bail};
use applicant_ingest_core::ApplicantFilter;
use applicant_ingest_service::RecordService;

use super::StorageTarget;

pub(crate) async fn run_list(
    target: &StorageTarget,
    filter: ApplicantFilter,
    page: Option<u64>,
    limit: Option<u64>,
) -> Result<()> {
    let records = RecordService::new(target.connect().await?);
    let page = records.list(filter, page, limit).await?;
    let output = serde_json::json!({
        "totalRecords": page.total_records,
        "currentPage": page.current_page,
        "totalPages": page.total_pages,
        "recordsPerPage": page.records_per_page,
        "data": page.data,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub(crate) async fn run_stats(target: &StorageTarget) -> Result<()> {
    let records = RecordService::new(target.connect().await?);
    let stats = records.stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

pub(crate) async fn run_wipe(target: &StorageTarget, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete every record without --yes");
    }
    let records = RecordService::new(target.connect().await?);
    let deleted = records.delete_all().await?;
    println!("Deleted {deleted} records");
    Ok(())
}
