//! Service layer containing the check pipeline and its side-effect helpers.
//!
//! ## Service map
//! - `address.rs` — record id extraction from detail-page addresses.
//! - `transport.rs` — blocking HTTP seam (`HttpTransport`) and its reqwest implementation.
//! - `xml.rs` — namespace-aware element tree + fixed-prefix path queries.
//! - `record.rs` — record retrieval and `codeBook` isolation.
//! - `schemas.rs` — approved PID scheme cache backed by the controlled vocabulary.
//! - `evaluator.rs` — verdict for one metadata document.
//! - `pipeline.rs` — `PidChecker`, the only entry point that never fails.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Network access goes through `HttpTransport` only.
//! - Errors stay typed until `PidChecker` turns them into `indeterminate`.

pub mod address;
pub mod evaluator;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod schemas;
pub mod transport;
pub mod xml;
