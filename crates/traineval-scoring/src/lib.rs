//! traineval-scoring
//!
//! Aggregation over a loaded evaluation table: average ratings per question
//! column and the cleaned free-text answer lists.

pub mod aggregate;
pub mod responses;

pub use aggregate::{AggregationSettings, aggregate_scores};
pub use responses::collect_responses;
