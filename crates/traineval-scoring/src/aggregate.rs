use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use traineval_core::models::questions::RatingColumn;
use traineval_core::models::scores::{ScoreEntry, ScoreSeries};
use traineval_core::models::table::EvaluationTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Data rows ignored at the top of every rating column. Evaluation
    /// exports carry a sub-header row (question wording) directly under the
    /// header, hence the default of 1.
    pub skip_leading_rows: usize,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            skip_leading_rows: 1,
        }
    }
}

/// Compute the rounded mean of every rating column.
///
/// Cells that do not coerce to a number are left out of the mean. A column
/// with no numeric cells gets `mean: None` and a warning.
pub fn aggregate_scores(
    table: &EvaluationTable,
    columns: &[RatingColumn],
    settings: &AggregationSettings,
) -> ScoreSeries {
    let entries = columns
        .iter()
        .map(|column| {
            let values: Vec<f64> = table
                .column(column.index)
                .skip(settings.skip_leading_rows)
                .filter_map(|cell| cell.as_number())
                .collect();

            let mean = mean(&values).map(round2);
            match mean {
                Some(m) => debug!(column = %column.name, mean = m, count = values.len(), "scored column"),
                None => warn!(column = %column.name, "rating column has no numeric values; mean undefined"),
            }

            ScoreEntry {
                question_id: column.question_id.clone(),
                column: column.name.clone(),
                mean,
                count: values.len(),
            }
        })
        .collect();

    ScoreSeries { entries }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Round to 2 decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
