use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("chart drawing failed: {0}")]
    Backend(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
