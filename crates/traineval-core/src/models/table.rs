use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell after loading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Coerce the cell to a finite number.
    ///
    /// Text is trimmed and parsed as a decimal; booleans count as 1/0.
    /// Anything else (including `NaN`/`inf` spelled out in text) is `None`.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Empty => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Render the cell as display text. Empty cells have no text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Bool(b) => Some(b.to_string()),
        }
    }
}

/// The working sheet of an evaluation workbook.
///
/// Column names are unique: blank headers become `Unnamed: <index>` and
/// repeated headers get a `.1`, `.2`, ... suffix. Every row has exactly one
/// cell per column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl EvaluationTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let columns = normalize_headers(headers);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |row| row.get(index))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }
}

fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            let trimmed = header.trim();
            let base = if trimmed.is_empty() {
                format!("Unnamed: {index}")
            } else {
                trimmed.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}
