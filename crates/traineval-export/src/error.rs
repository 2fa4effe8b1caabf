use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("character {character:?} cannot be encoded in the report font (in \"{context}\")")]
    Encoding { character: char, context: String },

    #[error("template PDF could not be read: {0}")]
    Template(String),

    #[error("chart image could not be decoded: {0}")]
    Image(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
