//! traineval-core
//!
//! Pure domain types shared by every stage of the report pipeline: the
//! evaluation table, the question configuration table, and score series.
//! No I/O happens here.

pub mod error;
pub mod models;
