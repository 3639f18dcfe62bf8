//! Core types and pure pipeline stages for applicant-ingest
//!
//! This crate contains domain types shared across all other crates,
//! plus the two storage-free ingest stages: column mapping and
//! batch reconciliation.

mod applicant;
mod constants;
mod env_config;
mod filter;
mod summary;

pub use applicant::*;
pub use constants::*;
pub use env_config::env_parse_with_default;
pub use filter::{ApplicantFilter, SEARCH_COLUMNS};
pub use summary::IngestSummary;
