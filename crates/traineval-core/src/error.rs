use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("question set has no rating questions")]
    NoRatingQuestions,
}
