//! Insert, uniqueness and lookup behaviour of the `SQLite` gateway.

use super::{create_test_applicant, create_test_storage};
use crate::traits::ApplicantStore;
use crate::types::InsertOutcome;
use chrono::SubsecRound;

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn insert_then_get_round_trips_every_field() {
    let (storage, _dir) = create_test_storage();
    let mut record = create_test_applicant(Some("111122223333"), "Asha");
    // Timestamps are persisted at microsecond precision.
    record.upload_date = record.upload_date.trunc_subsecs(6);

    let InsertOutcome::Saved { id } = storage.insert_applicant(&record).unwrap() else {
        panic!("expected Saved");
    };
    let stored = storage.get_applicant(&id).unwrap().unwrap();

    assert_eq!(stored.id, id);
    assert_eq!(stored.record, record);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn duplicate_key_is_rejected_not_errored() {
    let (storage, _dir) = create_test_storage();

    let first = storage.insert_applicant(&create_test_applicant(Some("A1"), "X")).unwrap();
    let second = storage.insert_applicant(&create_test_applicant(Some("A1"), "Y")).unwrap();

    assert!(first.is_saved());
    assert_eq!(second, InsertOutcome::RejectedDuplicateKey);
    assert_eq!(storage.count_applicants().unwrap(), 1);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn absent_and_empty_keys_are_exempt_from_uniqueness() {
    let (storage, _dir) = create_test_storage();

    for key in [None, Some(""), Some("   "), None, Some("")] {
        let outcome = storage.insert_applicant(&create_test_applicant(key, "Anon")).unwrap();
        assert!(outcome.is_saved());
    }

    assert_eq!(storage.count_applicants().unwrap(), 5);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn keys_are_trimmed_before_the_unique_check() {
    let (storage, _dir) = create_test_storage();

    assert!(storage.insert_applicant(&create_test_applicant(Some("1234"), "a")).unwrap().is_saved());
    let padded = storage.insert_applicant(&create_test_applicant(Some(" 1234 "), "b")).unwrap();

    assert_eq!(padded, InsertOutcome::RejectedDuplicateKey);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn get_unknown_id_returns_none() {
    let (storage, _dir) = create_test_storage();
    assert!(storage.get_applicant("missing").unwrap().is_none());
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn delete_all_empties_the_collection_and_frees_keys() {
    let (storage, _dir) = create_test_storage();
    storage.insert_applicant(&create_test_applicant(Some("K1"), "a")).unwrap();
    storage.insert_applicant(&create_test_applicant(None, "b")).unwrap();

    assert_eq!(storage.delete_all_applicants().unwrap(), 2);
    assert_eq!(storage.count_applicants().unwrap(), 0);
    assert!(storage.insert_applicant(&create_test_applicant(Some("K1"), "c")).unwrap().is_saved());
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn schema_survives_reopen() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("reopen.db");
    {
        let storage = crate::Storage::new(&db_path).unwrap();
        storage.insert_applicant(&create_test_applicant(Some("R1"), "a")).unwrap();
    }
    let storage = crate::Storage::new(&db_path).unwrap();
    let again = storage.insert_applicant(&create_test_applicant(Some("R1"), "b")).unwrap();
    assert_eq!(again, InsertOutcome::RejectedDuplicateKey);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn concurrent_writers_persist_one_record_per_key() {
    let (storage, _dir) = create_test_storage();
    let mut handles = Vec::new();
    for i in 0..8 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            let record = create_test_applicant(Some("RACE"), &format!("w{i}"));
            ApplicantStore::insert_applicant(&storage, &record).await.unwrap()
        }));
    }

    let mut saved = 0;
    for handle in handles {
        if handle.await.unwrap().is_saved() {
            saved += 1;
        }
    }

    assert_eq!(saved, 1);
    assert_eq!(ApplicantStore::count_applicants(&storage).await.unwrap(), 1);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn stats_report_count_and_latest_upload() {
    let (storage, _dir) = create_test_storage();
    let empty = ApplicantStore::get_stats(&storage).await.unwrap();
    assert_eq!(empty.total_records, 0);
    assert_eq!(empty.latest_upload_date, None);

    let older = chrono::Utc::now() - chrono::Duration::hours(1);
    let newer = chrono::Utc::now();
    storage.insert_applicant(&super::create_test_applicant_at(None, "old", older)).unwrap();
    storage.insert_applicant(&super::create_test_applicant_at(None, "new", newer)).unwrap();

    let stats = ApplicantStore::get_stats(&storage).await.unwrap();
    assert_eq!(stats.total_records, 2);
    let latest = stats.latest_upload_date.unwrap();
    assert_eq!(latest.timestamp_micros(), newer.timestamp_micros());
}
