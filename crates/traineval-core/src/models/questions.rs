use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::table::EvaluationTable;

/// Literal header of the Q24 open-text column in the evaluation workbook.
pub const Q24_COLUMN: &str = "Q24: O que poderia mudar no seu contexto de trabalho para melhorar ainda mais o seu índice de performance?";

/// Literal header of the Q25 open-text column in the evaluation workbook.
pub const Q25_COLUMN: &str =
    "Q25: Se já tivesse um maior indíce de produtividade e performance onde e como notaria?";

/// A Likert-style question, matched to columns by header prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingQuestion {
    pub id: String,
    pub column_prefix: String,
}

/// A free-text question, matched to exactly one column by its full header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTextQuestion {
    pub id: String,
    pub column: String,
}

/// The fixed table of questions the report is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub ratings: Vec<RatingQuestion>,
    pub open_text: Vec<OpenTextQuestion>,
}

impl Default for QuestionSet {
    fn default() -> Self {
        let ratings = ["Q17", "Q18", "Q19", "Q20", "Q21", "Q22"]
            .into_iter()
            .map(|id| RatingQuestion {
                id: id.to_string(),
                column_prefix: id.to_string(),
            })
            .collect();

        let open_text = vec![
            OpenTextQuestion {
                id: "Q24".to_string(),
                column: Q24_COLUMN.to_string(),
            },
            OpenTextQuestion {
                id: "Q25".to_string(),
                column: Q25_COLUMN.to_string(),
            },
        ];

        Self { ratings, open_text }
    }
}

/// A table column selected for aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingColumn {
    pub question_id: String,
    pub name: String,
    pub index: usize,
}

/// A table column holding free-text answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTextColumn {
    pub question_id: String,
    pub name: String,
    pub index: usize,
}

/// A [`QuestionSet`] checked against a loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedQuestions {
    /// Rating columns in table column order.
    pub ratings: Vec<RatingColumn>,
    /// Open-text columns in question-set order.
    pub open_text: Vec<OpenTextColumn>,
    /// Ids of rating questions whose prefix matched no column.
    pub unmatched_ratings: Vec<String>,
}

impl QuestionSet {
    /// Resolve every question against the table schema.
    ///
    /// Open-text columns must exist verbatim. A rating prefix that matches
    /// nothing is reported in `unmatched_ratings` rather than failing; a
    /// column matched by several prefixes is selected once, under the first
    /// matching question.
    pub fn resolve(&self, table: &EvaluationTable) -> Result<ResolvedQuestions, CoreError> {
        if self.ratings.is_empty() {
            return Err(CoreError::NoRatingQuestions);
        }

        let open_text = self
            .open_text
            .iter()
            .map(|q| {
                table
                    .column_index(&q.column)
                    .map(|index| OpenTextColumn {
                        question_id: q.id.clone(),
                        name: q.column.clone(),
                        index,
                    })
                    .ok_or_else(|| CoreError::MissingColumn(q.column.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ratings: Vec<RatingColumn> = table
            .columns()
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                self.ratings
                    .iter()
                    .find(|q| name.starts_with(&q.column_prefix))
                    .map(|q| RatingColumn {
                        question_id: q.id.clone(),
                        name: name.clone(),
                        index,
                    })
            })
            .collect();

        let unmatched_ratings = self
            .ratings
            .iter()
            .filter(|q| !ratings.iter().any(|c| c.question_id == q.id))
            .map(|q| q.id.clone())
            .collect();

        Ok(ResolvedQuestions {
            ratings,
            open_text,
            unmatched_ratings,
        })
    }
}
