//! traineval-cli library root.
//!
//! Configuration loading and the end-to-end report pipeline, exposed so
//! integration tests can run the whole flow without spawning the binary.

pub mod config;
pub mod error;
pub mod pipeline;

pub use pipeline::{GeneratedReport, ReportSummary, RunOptions, RunOutcome, generate_report, run};
