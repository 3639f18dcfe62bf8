//! Batch-internal deduplication by Aadhaar number.

use std::collections::HashMap;

use super::ApplicantRecord;

/// Reconciles a mapped batch before persistence.
///
/// Keyed records collapse to one per distinct Aadhaar number. The surviving
/// value is the last occurrence in input order, placed at the position where
/// that key first appeared. Unkeyed records are kept as-is and follow all
/// keyed records, in input order.
#[must_use]
pub fn reconcile(records: Vec<ApplicantRecord>) -> Vec<ApplicantRecord> {
    let mut keyed: Vec<ApplicantRecord> = Vec::new();
    let mut slot_by_key: HashMap<String, usize> = HashMap::new();
    let mut unkeyed: Vec<ApplicantRecord> = Vec::new();

    for record in records {
        let Some(key) = record.dedup_key().map(ToOwned::to_owned) else {
            unkeyed.push(record);
            continue;
        };
        match slot_by_key.get(&key) {
            Some(&slot) => {
                tracing::debug!(
                    aadhaar_no = %record.masked_key().unwrap_or_default(),
                    "superseding earlier row with same key"
                );
                if let Some(existing) = keyed.get_mut(slot) {
                    *existing = record;
                }
            },
            None => {
                slot_by_key.insert(key, keyed.len());
                keyed.push(record);
            },
        }
    }

    keyed.extend(unkeyed);
    keyed
}
