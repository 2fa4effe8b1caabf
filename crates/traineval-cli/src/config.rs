use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use traineval_chart::ChartSettings;
use traineval_core::models::questions::QuestionSet;
use traineval_export::encoding::EncodingPolicy;
use traineval_export::layout::{DEFAULT_PAGE_CAPACITY, LayoutOptions};
use traineval_export::styles::DocumentStyles;
use traineval_scoring::AggregationSettings;
use traineval_sheet::DEFAULT_SHEET;

use crate::error::ConfigError;

/// Current config version. Bump this when changing the shape of the file.
pub const CURRENT_VERSION: u32 = 1;

/// Everything a report run can be tuned with. Every field is optional in
/// the JSON file; missing fields take the defaults of the standard
/// evaluation export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub config_version: u32,
    /// Worksheet holding the answers.
    pub sheet_name: String,
    /// Header line of the title page.
    pub title: String,
    /// Title stored in the PDF metadata.
    pub document_title: String,
    pub questions: QuestionSet,
    pub aggregation: AggregationSettings,
    /// Responses per report page.
    pub page_capacity: NonZeroUsize,
    pub encoding: EncodingPolicy,
    pub chart: ChartSettings,
    pub styles: DocumentStyles,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            sheet_name: DEFAULT_SHEET.to_string(),
            title: "Training evaluation - Client".to_string(),
            document_title: "Training Evaluation Report".to_string(),
            questions: QuestionSet::default(),
            aggregation: AggregationSettings::default(),
            page_capacity: DEFAULT_PAGE_CAPACITY,
            encoding: EncodingPolicy::default(),
            chart: ChartSettings::default(),
            styles: DocumentStyles::default(),
        }
    }
}

impl ReportConfig {
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            page_capacity: self.page_capacity,
            encoding: self.encoding,
        }
    }
}

pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&contents)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Parse a JSON config, rejecting files written for a newer schema.
pub fn parse_config(contents: &str) -> Result<ReportConfig, ConfigError> {
    // Parse as raw JSON first so the version is checked before the shape.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(u64::from(CURRENT_VERSION));

    if version > u64::from(CURRENT_VERSION) {
        return Err(ConfigError::UnsupportedVersion {
            found: version,
            supported: CURRENT_VERSION,
        });
    }

    let mut config: ReportConfig = serde_json::from_value(json)?;
    config.config_version = CURRENT_VERSION;
    Ok(config)
}
