use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a valid spreadsheet: {0}")]
    InvalidWorkbook(String),

    #[error("sheet '{name}' not found (available: {available})")]
    SheetNotFound { name: String, available: String },

    #[error("failed to read sheet '{name}': {message}")]
    Range { name: String, message: String },
}
