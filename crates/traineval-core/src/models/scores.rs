use serde::{Deserialize, Serialize};

/// Lower bound of the rating scale as shown on the chart axis.
pub const SCORE_AXIS_MIN: f64 = 0.0;

/// Upper bound of the rating scale as shown on the chart axis.
pub const SCORE_AXIS_MAX: f64 = 5.0;

/// Average rating of one spreadsheet column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub question_id: String,
    pub column: String,
    /// Mean of the numeric cells, rounded to 2 decimals. `None` when the
    /// column had no numeric cells at all.
    pub mean: Option<f64>,
    /// Number of numeric cells that contributed to the mean.
    pub count: usize,
}

/// Ordered average scores, one entry per rating column in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSeries {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreSeries {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.iter()
    }

    pub fn get(&self, column: &str) -> Option<&ScoreEntry> {
        self.entries.iter().find(|e| e.column == column)
    }
}
