pub mod questions;
pub mod scores;
pub mod table;
