use crate::cell::CellValue;
use crate::error::CoreError;
use serde::Serialize;

/// An ordered, schema-less table of cells.
///
/// Columns are positional; duplicate names are allowed. Name-based lookups
/// bind to the last column carrying the name, so a later duplicate shadows an
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RawRecordSet {
    /// Creates an empty record set with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a record set from a header and rows, validating row widths.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, CoreError> {
        let mut set = Self::new(columns);
        for row in rows {
            set.push_row(row)?;
        }
        Ok(set)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), CoreError> {
        if row.len() != self.columns.len() {
            return Err(CoreError::ColumnCountMismatch {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`; the last one wins on duplicates.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().rposition(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterates the cells of the named column in row order.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Replaces the header in place. The new header must keep the column count.
    pub fn rename_columns(&mut self, columns: Vec<String>) -> Result<(), CoreError> {
        if columns.len() != self.columns.len() {
            return Err(CoreError::ColumnCountMismatch {
                expected: self.columns.len(),
                found: columns.len(),
            });
        }
        self.columns = columns;
        Ok(())
    }

    /// Rewrites every cell of the named column with `f`.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<(), CoreError>
    where
        F: FnMut(&CellValue) -> CellValue,
    {
        let idx = self
            .column_index(name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Writes a full column. An existing column with the same name is
    /// overwritten; otherwise the column is appended.
    pub fn upsert_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<(), CoreError> {
        if values.len() != self.rows.len() {
            return Err(CoreError::RowCountMismatch {
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}
