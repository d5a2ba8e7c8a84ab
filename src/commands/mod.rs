//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `runtime.rs` — check/schemas.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `pidcheck::services`.
//! - Keep behavior and output schema stable.

pub mod runtime;

pub use runtime::handle_commands;
