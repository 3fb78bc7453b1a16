use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::{ReconError, Result};
use crate::io::{excel_read, excel_write};
use crate::model::{CellValue, Table};

/// Join key shared by both sources after standardisation.
pub const KEY_COLUMNS: [&str; 2] = ["First names", "Surname"];
/// Presence flag set on rows originating from the roster export.
pub const IN_DATASET_A: &str = "In_DatasetA";
/// Presence flag set on rows originating from the registration report.
pub const IN_DATASET_B: &str = "In_DatasetB";
/// Leading metadata rows in a registration report before its header.
pub const DEFAULT_SKIP_ROWS: usize = 6;

/// Columns pulled to the front of the output when reordering is enabled.
/// Entries absent from the merged table are skipped.
pub const PREFERRED_COLUMNS: [&str; 6] = [
    "First names",
    "Surname",
    IN_DATASET_A,
    IN_DATASET_B,
    "Team",
    "Active mandates",
];

const ROSTER_REQUIRED: [&str; 2] = ["Last name", "First name"];

/// Inputs and switches for a single reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Roster export (source A); header on the first row.
    pub source_a: PathBuf,
    /// Registration report (source B); header after the skipped rows.
    pub source_b: PathBuf,
    /// Destination for the merged workbook. Overwritten if present.
    pub output: PathBuf,
    /// Leading metadata rows to discard from source B.
    pub skip_rows: usize,
    /// Reorder output columns to [`PREFERRED_COLUMNS`] first.
    pub reorder: bool,
}

impl ReconcileOptions {
    /// Options with the default skip count and reordering enabled.
    pub fn new(
        source_a: impl Into<PathBuf>,
        source_b: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_a: source_a.into(),
            source_b: source_b.into(),
            output: output.into(),
            skip_rows: DEFAULT_SKIP_ROWS,
            reorder: true,
        }
    }
}

/// Row counts reported after a successful run, partitioned by the presence
/// flag pattern of each output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// All rows written to the output.
    pub total: usize,
    /// Rows whose key appeared only in the roster export.
    pub a_only: usize,
    /// Rows whose key appeared only in the registration report.
    pub b_only: usize,
    /// Rows whose key appeared in both sources.
    pub matched: usize,
}

/// Reconciles a roster export against a registration report and writes the
/// merged workbook.
///
/// The pipeline is load, validate, standardise, outer-join on
/// [`KEY_COLUMNS`], flag, optionally reorder, write. Writing is the final
/// step, so a failing run never leaves a partial output file behind.
#[instrument(
    level = "info",
    skip_all,
    fields(
        source_a = %options.source_a.display(),
        source_b = %options.source_b.display(),
        output = %options.output.display(),
    )
)]
pub fn reconcile(options: &ReconcileOptions) -> Result<RunResult> {
    for path in [&options.source_a, &options.source_b] {
        if !path.exists() {
            return Err(ReconError::MissingInput(path.clone()));
        }
    }

    info!("loading roster export");
    let mut roster = excel_read::read_table(&options.source_a, 0)?;

    info!("loading registration report");
    let mut registration = excel_read::read_table(&options.source_b, options.skip_rows)?;

    validate_columns(&roster, &ROSTER_REQUIRED, "roster")?;
    validate_columns(&registration, &KEY_COLUMNS, "registration")?;

    debug!("renaming roster columns for standardisation");
    roster.rename_column("Last name", "Surname");
    roster.rename_column("First name", "First names");

    debug!("adding presence flags");
    roster.add_column(IN_DATASET_A, CellValue::Boolean(true));
    registration.add_column(IN_DATASET_B, CellValue::Boolean(true));

    info!(
        roster_rows = roster.row_count(),
        registration_rows = registration.row_count(),
        "merging datasets"
    );
    let mut merged = outer_join(&roster, &registration, &KEY_COLUMNS)?;

    debug!("filling missing presence flags");
    merged.fill_empty(IN_DATASET_A, CellValue::Boolean(false));
    merged.fill_empty(IN_DATASET_B, CellValue::Boolean(false));

    if options.reorder {
        debug!("reordering columns");
        merged = merged.select(&preferred_order(merged.columns()));
    }

    let result = summarise(&merged);
    info!(rows = result.total, "saving merged data");
    excel_write::write_table(&options.output, &merged)?;

    info!(
        matched = result.matched,
        a_only = result.a_only,
        b_only = result.b_only,
        "merge process completed successfully"
    );
    Ok(result)
}

/// Checks that every required column is present, collecting all absences into
/// one error so the user sees the full list at once.
pub fn validate_columns(table: &Table, required: &[&str], source: &str) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| table.column_index(name).is_none())
        .map(|name| format!("'{name}'"))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReconError::MissingColumns {
            source: source.to_string(),
            columns: missing,
        })
    }
}

/// Full outer join of `left` and `right` on the named key columns.
///
/// Output rows are the left rows in order, each expanded by its matching
/// right rows (a cross-product when a key is duplicated on both sides),
/// followed by the unmatched right rows in their original order. Cells from
/// the absent side are `Empty`; key cells are always populated. Non-key
/// columns present in both sources keep one column per side, suffixed `_A`
/// and `_B`.
pub fn outer_join(left: &Table, right: &Table, keys: &[&str]) -> Result<Table> {
    let left_keys = key_indices(left, keys, "left")?;
    let right_keys = key_indices(right, keys, "right")?;

    let is_key = |name: &str| keys.contains(&name);
    let overlaps = |name: &str| {
        !is_key(name)
            && left.column_index(name).is_some()
            && right.column_index(name).is_some()
    };

    let mut columns: Vec<String> = left
        .columns()
        .iter()
        .map(|name| {
            if overlaps(name) {
                format!("{name}_A")
            } else {
                name.clone()
            }
        })
        .collect();

    // Right-side non-key columns appended after the full left side.
    let mut right_carry: Vec<usize> = Vec::new();
    for (index, name) in right.columns().iter().enumerate() {
        if is_key(name) {
            continue;
        }
        right_carry.push(index);
        if overlaps(name) {
            columns.push(format!("{name}_B"));
        } else {
            columns.push(name.clone());
        }
    }

    let left_width = left.columns().len();
    let mut index: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows().iter().enumerate() {
        let key = row_key(row, &right_keys);
        index.entry(key).or_default().push(row_idx);
    }

    let mut merged = Table::new(columns);
    let mut right_matched = vec![false; right.row_count()];

    for left_row in left.rows() {
        let key = row_key(left_row, &left_keys);
        match index.get(&key) {
            Some(matches) => {
                for &right_idx in matches {
                    right_matched[right_idx] = true;
                    let right_row = &right.rows()[right_idx];
                    let mut cells = left_row.clone();
                    cells.extend(right_carry.iter().map(|&i| right_row[i].clone()));
                    merged.push_row(cells);
                }
            }
            None => merged.push_row(left_row.clone()),
        }
    }

    for (right_idx, right_row) in right.rows().iter().enumerate() {
        if right_matched[right_idx] {
            continue;
        }
        let mut cells = vec![CellValue::Empty; left_width];
        for (key_pos, &left_key_idx) in left_keys.iter().enumerate() {
            cells[left_key_idx] = right_row[right_keys[key_pos]].clone();
        }
        cells.extend(right_carry.iter().map(|&i| right_row[i].clone()));
        merged.push_row(cells);
    }

    Ok(merged)
}

/// Output column order: the [`PREFERRED_COLUMNS`] that exist, then every
/// remaining column in its prior relative position, each exactly once.
pub fn preferred_order(columns: &[String]) -> Vec<String> {
    let mut order: Vec<String> = Vec::with_capacity(columns.len());
    for name in PREFERRED_COLUMNS {
        if columns.iter().any(|column| column == name) {
            order.push(name.to_string());
        }
    }
    for column in columns {
        if !order.contains(column) {
            order.push(column.clone());
        }
    }
    order
}

fn key_indices(table: &Table, keys: &[&str], source: &str) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(keys.len());
    let mut missing = Vec::new();
    for name in keys {
        match table.column_index(name) {
            Some(index) => indices.push(index),
            None => missing.push(format!("'{name}'")),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(ReconError::MissingColumns {
            source: source.to_string(),
            columns: missing,
        })
    }
}

fn row_key(row: &[CellValue], indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&index| row[index].key_text()).collect()
}

fn summarise(merged: &Table) -> RunResult {
    let mut result = RunResult {
        total: merged.row_count(),
        a_only: 0,
        b_only: 0,
        matched: 0,
    };

    for row_idx in 0..merged.row_count() {
        let in_a = matches!(
            merged.cell(row_idx, IN_DATASET_A),
            Some(CellValue::Boolean(true))
        );
        let in_b = matches!(
            merged.cell(row_idx, IN_DATASET_B),
            Some(CellValue::Boolean(true))
        );
        match (in_a, in_b) {
            (true, true) => result.matched += 1,
            (true, false) => result.a_only += 1,
            (false, true) => result.b_only += 1,
            (false, false) => {}
        }
    }

    result
}
