//! traineval-chart
//!
//! Bar chart of average ratings, rasterised in memory with `plotters` and
//! encoded as PNG.

pub mod error;
pub mod fonts;
pub mod render;

pub use render::{ChartImage, ChartRenderer, ChartSettings};
