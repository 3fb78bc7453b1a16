use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::error::{ReconError, Result};
use crate::model::{CellValue, Table};

/// Reads the first worksheet of an `.xlsx` file into a [`Table`].
///
/// The first `skip_rows` rows of the used range are discarded as metadata;
/// the next row is treated as the header and everything below it as data.
/// Rows whose every cell is empty are dropped.
#[instrument(level = "debug", skip_all, fields(path = %path.display(), skip_rows))]
pub fn read_table(path: &Path, skip_rows: usize) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReconError::InvalidWorkbook("workbook contains no sheets".into()))?;
    let range_result = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| ReconError::InvalidWorkbook(format!("missing sheet '{sheet_name}'")))?;
    let range = range_result.map_err(ReconError::from)?;

    let mut rows = range.rows().skip(skip_rows);
    let header = rows.next().ok_or_else(|| {
        ReconError::InvalidWorkbook(format!(
            "no header row left in '{sheet_name}' after skipping {skip_rows} row(s)"
        ))
    })?;

    let columns: Vec<String> = header
        .iter()
        .map(|cell| cell_to_string(Some(cell)))
        .collect();
    let mut table = Table::new(columns);

    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_to_value).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }

    debug!(
        sheet = %sheet_name,
        columns = table.columns().len(),
        rows = table.row_count(),
        "worksheet loaded"
    );
    Ok(table)
}

fn cell_to_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(value) => CellValue::String(value.clone()),
        DataType::Float(value) => CellValue::Number(*value),
        DataType::Int(value) => CellValue::Number(*value as f64),
        DataType::Bool(value) => CellValue::Boolean(*value),
        DataType::Empty => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
