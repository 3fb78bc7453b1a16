use serde::{Deserialize, Serialize};

/// A single spreadsheet cell. `Empty` is the null of the model; unmatched
/// sides of an outer join surface as `Empty` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    /// Plain text cell.
    String(String),
    /// Numeric cell. Excel stores all numbers as floats.
    Number(f64),
    /// Boolean cell, used for the presence flags.
    Boolean(bool),
    /// Missing value.
    Empty,
}

impl CellValue {
    /// True when the cell carries no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Renders the cell as the text used for join-key comparison. Two keys
    /// match when their rendered forms are equal, so a missing name matches
    /// another missing name.
    pub fn key_text(&self) -> String {
        match self {
            CellValue::String(value) => value.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Boolean(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// An in-memory table: ordered column names plus row-major cells. Every row
/// holds exactly `columns.len()` cells, so a column's position doubles as its
/// index into each row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Appends a row, padding with `Empty` or truncating so its width matches
    /// the header.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    /// Renames a column in place. A missing `from` column is a no-op; callers
    /// validate the schema before renaming.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(index) = self.column_index(from) {
            self.columns[index] = to.to_string();
        }
    }

    /// Appends a new column filled with the same value in every row.
    pub fn add_column(&mut self, name: &str, fill: CellValue) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(fill.clone());
        }
    }

    /// Replaces `Empty` cells in the named column with the given value.
    pub fn fill_empty(&mut self, name: &str, value: CellValue) {
        if let Some(index) = self.column_index(name) {
            for row in &mut self.rows {
                if row[index].is_empty() {
                    row[index] = value.clone();
                }
            }
        }
    }

    /// Cell at the given row and named column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Rebuilds the table with columns in the requested order. Names absent
    /// from the table are ignored; columns not named are dropped.
    pub fn select(&self, order: &[String]) -> Table {
        let indices: Vec<usize> = order
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();

        let columns = indices
            .iter()
            .map(|&index| self.columns[index].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&index| row[index].clone()).collect())
            .collect();

        Table { columns, rows }
    }
}
