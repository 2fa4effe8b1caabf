use traineval_core::models::questions::OpenTextColumn;
use traineval_core::models::table::EvaluationTable;

/// Collect the answers of one open-text column.
///
/// Every data row is considered. Answers are trimmed; empty and
/// whitespace-only cells are dropped. Numeric cells are kept as text.
pub fn collect_responses(table: &EvaluationTable, column: &OpenTextColumn) -> Vec<String> {
    table
        .column(column.index)
        .filter_map(|cell| cell.to_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
