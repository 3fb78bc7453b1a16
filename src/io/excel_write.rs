use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::instrument;

use crate::error::Result;
use crate::model::{CellValue, Table};

/// Writes the table to the given path as a single-sheet `.xlsx` workbook.
/// The header occupies row one; no index column is emitted.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, header) in table.columns().iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, header)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            let col_num = col_idx as u16;
            match cell {
                CellValue::String(value) => {
                    worksheet.write_string(row_num, col_num, value)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(row_num, col_num, *value)?;
                }
                CellValue::Boolean(value) => {
                    worksheet.write_boolean(row_num, col_num, *value)?;
                }
                CellValue::Empty => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}
