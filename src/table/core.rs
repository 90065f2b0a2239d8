//! The heterogeneous typed table: a named, ordered collection of
//! equal-length, uniquely-named typed columns.
//!
//! A table has two lifecycle states: empty (no columns, row count undefined)
//! and populated (the first successful `add_column` fixes the row count).
//! Columns are never removed or resized in place; a table is constructed
//! fresh on each read and discarded after use.

use crate::error::DatagridError;
use crate::table::column::{Column, TypedColumn};
use crate::types::{DataType, Scalar};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Default)]
pub struct Table {
    columns: HashMap<String, Box<dyn Column>>,
    /// Column names in insertion order, for display and iteration.
    order: Vec<String>,
    /// One unit per column, positionally aligned; empty when unset.
    units: Vec<String>,
    row_title: String,
    row_names: Vec<String>,
    /// `None` until the first column establishes the row count.
    nrows: Option<usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a typed column.
    ///
    /// Fails with `DuplicateColumn` if the name is taken and with
    /// `RowCountMismatch` if the length disagrees with the established row
    /// count. On failure the table is left untouched.
    pub fn add_column<T: Scalar>(
        &mut self,
        name: &str,
        values: Vec<T>,
    ) -> Result<(), DatagridError> {
        if self.columns.contains_key(name) {
            return Err(DatagridError::DuplicateColumn(name.to_string()));
        }
        if let Some(expected) = self.nrows {
            if values.len() != expected {
                return Err(DatagridError::RowCountMismatch {
                    name: name.to_string(),
                    expected,
                    actual: values.len(),
                });
            }
        } else {
            self.nrows = Some(values.len());
        }

        self.columns
            .insert(name.to_string(), Box::new(TypedColumn::new(values)));
        self.order.push(name.to_string());
        Ok(())
    }

    /// Typed access to a column's values.
    ///
    /// The stored element type is checked at runtime: a mismatch fails with
    /// `ColumnTypeMismatch` naming both sides, and never reinterprets the
    /// stored buffer.
    pub fn get_column<T: Scalar>(&self, name: &str) -> Result<&[T], DatagridError> {
        let column = self
            .columns
            .get(name)
            .ok_or_else(|| DatagridError::ColumnNotFound(name.to_string()))?;
        let typed = column
            .as_any()
            .downcast_ref::<TypedColumn<T>>()
            .ok_or_else(|| DatagridError::ColumnTypeMismatch {
                name: name.to_string(),
                stored: column.dtype().name(),
                requested: T::DTYPE.name(),
            })?;
        Ok(typed.values())
    }

    /// The stored element type of a column.
    pub fn get_column_type(&self, name: &str) -> Result<DataType, DatagridError> {
        self.columns
            .get(name)
            .map(|c| c.dtype())
            .ok_or_else(|| DatagridError::ColumnNotFound(name.to_string()))
    }

    /// Column names in insertion order.
    pub fn get_column_names(&self) -> &[String] {
        &self.order
    }

    /// The dtype-erased column handle, for callers that iterate columns
    /// without knowing their types.
    pub fn column(&self, name: &str) -> Result<&dyn Column, DatagridError> {
        self.columns
            .get(name)
            .map(|c| c.as_ref())
            .ok_or_else(|| DatagridError::ColumnNotFound(name.to_string()))
    }

    pub fn column_count(&self) -> usize {
        self.order.len()
    }

    /// `None` while the table is empty.
    pub fn row_count(&self) -> Option<usize> {
        self.nrows
    }

    /// Sets per-column units, positionally aligned to the current column
    /// order. Call after all columns are added; later insertions are not
    /// re-aligned.
    pub fn set_column_units(&mut self, units: Vec<String>) -> Result<(), DatagridError> {
        if units.len() != self.order.len() {
            return Err(DatagridError::UnitCountMismatch {
                expected: self.order.len(),
                actual: units.len(),
            });
        }
        self.units = units;
        Ok(())
    }

    pub fn get_column_units(&self) -> &[String] {
        &self.units
    }

    pub fn set_row_title(&mut self, title: &str) {
        self.row_title = title.to_string();
    }

    pub fn row_title(&self) -> &str {
        &self.row_title
    }

    /// Sets one display name per row; the length must match the established
    /// row count.
    pub fn set_row_names(&mut self, names: Vec<String>) -> Result<(), DatagridError> {
        let expected = self.nrows.unwrap_or(0);
        if names.len() != expected {
            return Err(DatagridError::RowCountMismatch {
                name: "row names".to_string(),
                expected,
                actual: names.len(),
            });
        }
        self.row_names = names;
        Ok(())
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }
}

/// Fixed-width text rendering: a header row, an `=` separator sized to the
/// total width, one row per record, and a trailing separator. Every column's
/// width is max(header length, widest stringified cell).
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nrows = self.nrows.unwrap_or(0);

        let mut widths = Vec::with_capacity(self.order.len());
        let mut total_width = 0usize;
        for name in &self.order {
            let column = &self.columns[name];
            let mut width = name.len();
            for row in 0..nrows {
                // In bounds by the equal-length invariant.
                let cell = column.render_cell(row).unwrap_or_default();
                width = width.max(cell.len());
            }
            widths.push(width);
            total_width += width + 1;
        }
        let sep = "=".repeat(total_width);

        for (name, width) in self.order.iter().zip(&widths) {
            write!(f, "{:>w$}", name, w = width + 1)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", sep)?;
        for row in 0..nrows {
            for (name, width) in self.order.iter().zip(&widths) {
                let cell = self.columns[name].render_cell(row).unwrap_or_default();
                write!(f, "{:>w$}", cell, w = width + 1)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", sep)
    }
}
