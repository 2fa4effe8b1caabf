use thiserror::Error;

use traineval_chart::error::ChartError;
use traineval_core::error::CoreError;
use traineval_export::error::ExportError;
use traineval_sheet::error::SheetError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "config_version {found} is newer than this build supports ({supported}); please update traineval"
    )]
    UnsupportedVersion { found: u64, supported: u32 },
}

/// A failed report run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("configuration failed: summary destination {path} is the report path")]
    OutputConflict { path: String },

    #[error("load failed: cannot read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("load failed: {0}")]
    Sheet(#[from] SheetError),

    #[error("load failed: {0}")]
    Schema(#[from] CoreError),

    #[error("load failed: {0}")]
    Template(#[source] ExportError),

    #[error("render failed: {0}")]
    Render(#[from] ChartError),

    #[error("assemble failed: {0}")]
    Assemble(#[source] ExportError),

    #[error("write failed: {0}")]
    Write(#[source] ExportError),

    #[error("write failed: summary could not be serialized: {0}")]
    Summary(#[source] serde_json::Error),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Config(_) | PipelineError::OutputConflict { .. } => "configuration",
            PipelineError::Input { .. }
            | PipelineError::Sheet(_)
            | PipelineError::Schema(_)
            | PipelineError::Template(_) => "load",
            PipelineError::Render(_) => "render",
            PipelineError::Assemble(_) => "assemble",
            PipelineError::Write(_) | PipelineError::Summary(_) => "write",
        }
    }
}
