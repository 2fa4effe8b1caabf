//! traineval-export
//!
//! Report assembly and PDF output: pagination of free-text answers, page
//! layout, template overlay text, PDF serialisation, and delivery to disk.

pub mod delivery;
pub mod encoding;
pub mod error;
pub mod layout;
pub mod paginate;
pub mod pdf;
pub mod styles;
pub mod template;
