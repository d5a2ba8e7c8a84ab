//! Approved-PID compliance check for research-data catalogue records.
//!
//! Given a record's detail-page address, [`PidChecker::check_approved_pid`]
//! fetches the record's DDI metadata over OAI-PMH and answers `pass` when a
//! citation `IDNo` declares an agency listed in the approved PID vocabulary,
//! `fail` when none does, and `indeterminate` when anything goes wrong.

pub mod domain;
pub mod services;

pub use domain::error::{CheckError, TransportFailure, VocabularyError};
pub use domain::models::{ApprovedSchemas, CheckerConfig, SchemaSource, Verdict};
pub use services::pipeline::PidChecker;
pub use services::transport::{HttpReply, HttpRequest, HttpTransport, ReqwestTransport};

/// One-off check against the production endpoints.
pub fn check_approved_pid(address: &str) -> Verdict {
    match PidChecker::new(CheckerConfig::default()) {
        Ok(checker) => checker.check_approved_pid(address),
        Err(e) => {
            tracing::error!(error = %e, "could not build HTTP client");
            Verdict::Indeterminate
        }
    }
}
