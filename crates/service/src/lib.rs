//! Service layer for applicant-ingest
//!
//! Centralizes the ingest pipeline and record queries between the HTTP/CLI
//! front ends and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod ingest_service;
mod record_service;
pub mod spreadsheet;

pub use error::ServiceError;
pub use ingest_service::IngestService;
pub use record_service::{RecordPage, RecordService};
pub use spreadsheet::DecodeError;

#[cfg(test)]
mod ingest_tests;
#[cfg(test)]
mod spreadsheet_tests;
#[cfg(test)]
mod test_support;
