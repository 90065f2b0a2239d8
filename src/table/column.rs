//! The dtype-erased column handle and its generic implementation.
//!
//! A table holds `Box<dyn Column>` so columns of mixed element types live in
//! one collection; typed access goes through `as_any` with an explicit
//! runtime type check at the table level, never an unchecked cast.

use crate::error::DatagridError;
use crate::payload::ColumnValues;
use crate::types::{DataType, Scalar};
use std::any::Any;
use std::fmt::Debug;

pub trait Column: Debug {
    /// The stored element type tag.
    fn dtype(&self) -> DataType;

    /// Number of values (always the owning table's row count).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uniform, locale-independent stringification of one cell, used by
    /// table rendering. The same value always stringifies identically.
    fn render_cell(&self, row: usize) -> Result<String, DatagridError>;

    /// The external value list for this column. Narrow integers widen to
    /// `int64` and `f32` to `float64`; `dtype()` still names the stored type.
    fn to_values(&self) -> ColumnValues;

    /// Downcasting support for typed access.
    fn as_any(&self) -> &dyn Any;
}

/// A single-typed, ordered value sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn<T: Scalar> {
    values: Vec<T>,
}

impl<T: Scalar> TypedColumn<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }
}

impl<T: Scalar> Column for TypedColumn<T> {
    fn dtype(&self) -> DataType {
        T::DTYPE
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn render_cell(&self, row: usize) -> Result<String, DatagridError> {
        self.values
            .get(row)
            .map(|v| v.to_string())
            .ok_or_else(|| {
                DatagridError::OutOfBounds(format!(
                    "row {} out of range for a column of {} values",
                    row,
                    self.values.len()
                ))
            })
    }

    fn to_values(&self) -> ColumnValues {
        T::collect_values(&self.values)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cell_is_deterministic_display() {
        let column = TypedColumn::new(vec![1.5f64, -2.0, 0.25]);
        assert_eq!(column.render_cell(0).unwrap(), "1.5");
        assert_eq!(column.render_cell(1).unwrap(), "-2");
        assert_eq!(column.render_cell(2).unwrap(), "0.25");
        assert!(matches!(
            column.render_cell(3),
            Err(DatagridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_dtype_reflects_stored_type() {
        let column = TypedColumn::new(vec![true, false]);
        assert_eq!(column.dtype(), DataType::Bool);
        assert_eq!(column.len(), 2);
    }

    #[test]
    fn test_to_values_widens_narrow_integers() {
        let column = TypedColumn::new(vec![1u16, 2, 3]);
        assert_eq!(column.dtype(), DataType::UInt16);
        match column.to_values() {
            ColumnValues::Int64(v) => assert_eq!(v, vec![1, 2, 3]),
            other => panic!("expected Int64 values, got {:?}", other),
        }
    }
}
