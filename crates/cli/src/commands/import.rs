use std::path::Path;

use anyhow::{Context, Result};
use applicant_ingest_service::IngestService;

use super::StorageTarget;

pub(crate) async fn run(target: &StorageTarget, file: &Path) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let storage = target.connect().await?;
    let summary = IngestService::new(storage).ingest(bytes).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
