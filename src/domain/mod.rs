//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep verdict/record/schema types in one place.
//! - Avoid cyclic imports between the fetcher, resolver and evaluator.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — verdicts, record ids, approved schema sets, config, report structs.
//! - `constants.rs` — stable endpoints, namespaces, timeouts and the fallback schemes.
//! - `error.rs` — error kinds raised by the pipeline stages.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and integration contracts.
//! Keep schema-impacting changes explicit and synchronized with `docs/contracts/*`.

pub mod constants;
pub mod error;
pub mod models;
