use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use traineval_core::models::table::{CellValue, EvaluationTable};

use crate::error::SheetError;

/// Parse a workbook held in memory and return the named sheet as a table.
///
/// The format (xlsx, xlsm, xlsb, xls, ods) is detected from the bytes. The
/// first row of the sheet supplies the column names; every following row is
/// a data row.
pub fn load_table(bytes: &[u8], sheet_name: &str) -> Result<EvaluationTable, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SheetError::InvalidWorkbook(e.to_string()))?;

    let names = workbook.sheet_names();
    if !names.iter().any(|n| n == sheet_name) {
        return Err(SheetError::SheetNotFound {
            name: sheet_name.to_string(),
            available: names.join(", "),
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| SheetError::Range {
            name: sheet_name.to_string(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| {
            header
                .iter()
                .map(|cell| cell_value(cell).to_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    debug!(
        sheet = sheet_name,
        columns = headers.len(),
        rows = data.len(),
        "loaded worksheet"
    );

    Ok(EvaluationTable::new(headers, data))
}

/// Read a workbook from disk and return the named sheet as a table.
pub fn load_table_from_path(path: &Path, sheet_name: &str) -> Result<EvaluationTable, SheetError> {
    let bytes = std::fs::read(path).map_err(|source| SheetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_table(&bytes, sheet_name)
}

/// Map a calamine cell to the table's cell model.
///
/// Dates keep their Excel serial number; error cells keep their code
/// (e.g. `#DIV/0!`) as text.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
