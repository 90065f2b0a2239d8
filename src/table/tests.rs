//! Scenario tests for the table container: insertion invariants, typed
//! access, units, and rendering.

use crate::error::DatagridError;
use crate::table::Table;
use crate::types::DataType;

#[test]
fn test_first_column_establishes_the_row_count() {
    let mut table = Table::new();
    assert_eq!(table.row_count(), None);
    table.add_column("a", vec![1i64, 2, 3]).unwrap();
    assert_eq!(table.row_count(), Some(3));

    // A populated table accepts further equal-length columns.
    table.add_column("b", vec![1.0f64, 2.0, 3.0]).unwrap();
    assert_eq!(table.column_count(), 2);
}

#[test]
fn test_unequal_length_column_is_rejected() {
    let mut table = Table::new();
    table.add_column("a", vec![1i64, 2, 3]).unwrap();
    let result = table.add_column("b", vec![1i32, 2, 3, 4]);
    assert!(matches!(
        result,
        Err(DatagridError::RowCountMismatch {
            expected: 3,
            actual: 4,
            ..
        })
    ));
    // Nothing was inserted.
    assert_eq!(table.column_count(), 1);
}

// End-to-end scenario: re-adding a name fails and leaves the table with
// exactly one column holding the original values.
#[test]
fn test_duplicate_column_is_rejected_without_mutation() {
    let mut table = Table::new();
    table.add_column("a", vec![1i64, 2, 3]).unwrap();
    let result = table.add_column("a", vec![4i64, 5, 6]);
    assert!(matches!(
        result,
        Err(DatagridError::DuplicateColumn(name)) if name == "a"
    ));
    assert_eq!(table.get_column_names(), &["a".to_string()]);
    assert_eq!(table.get_column::<i64>("a").unwrap(), &[1, 2, 3]);
}

#[test]
fn test_typed_access_checks_the_stored_type() {
    let mut table = Table::new();
    table.add_column("a", vec![1i64, 2, 3]).unwrap();

    assert_eq!(table.get_column::<i64>("a").unwrap(), &[1, 2, 3]);
    let result = table.get_column::<f64>("a");
    assert!(matches!(
        result,
        Err(DatagridError::ColumnTypeMismatch {
            stored: "int64",
            requested: "float64",
            ..
        })
    ));
    assert!(matches!(
        table.get_column::<i64>("missing"),
        Err(DatagridError::ColumnNotFound(_))
    ));
}

#[test]
fn test_column_introspection() {
    let mut table = Table::new();
    table.add_column("x", vec![true, false]).unwrap();
    table.add_column("y", vec!["p".to_string(), "q".to_string()]).unwrap();

    assert_eq!(table.get_column_type("x").unwrap(), DataType::Bool);
    assert_eq!(table.get_column_type("y").unwrap(), DataType::String);
    assert_eq!(
        table.get_column_names(),
        &["x".to_string(), "y".to_string()]
    );
}

#[test]
fn test_column_units_must_match_column_count() {
    let mut table = Table::new();
    table.add_column("a", vec![1i64]).unwrap();
    table.add_column("b", vec![2i64]).unwrap();

    let result = table.set_column_units(vec!["u1".to_string()]);
    assert!(matches!(
        result,
        Err(DatagridError::UnitCountMismatch {
            expected: 2,
            actual: 1
        })
    ));
    table
        .set_column_units(vec!["u1".to_string(), "u2".to_string()])
        .unwrap();
    assert_eq!(table.get_column_units(), &["u1".to_string(), "u2".to_string()]);
}

#[test]
fn test_row_names_must_match_row_count() {
    let mut table = Table::new();
    table.add_column("a", vec![1i64, 2]).unwrap();
    assert!(matches!(
        table.set_row_names(vec!["only".to_string()]),
        Err(DatagridError::RowCountMismatch { .. })
    ));
    table
        .set_row_names(vec!["r0".to_string(), "r1".to_string()])
        .unwrap();
    table.set_row_title("region");
    assert_eq!(table.row_title(), "region");
}

// End-to-end scenario: a three-column table renders two data rows and typed
// access returns the original integer values.
#[test]
fn test_mixed_table_with_units_and_rendering() {
    let mut table = Table::new();
    table.add_column("int", vec![1i64, 2]).unwrap();
    table.add_column("double", vec![1.1f64, 2.2]).unwrap();
    table.add_column("bool", vec![true, false]).unwrap();
    table
        .set_column_units(vec!["u1".to_string(), "u2".to_string(), "u3".to_string()])
        .unwrap();

    assert_eq!(table.get_column::<i64>("int").unwrap(), &[1, 2]);

    let rendered = table.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    // header + separator + 2 data rows + trailing separator
    assert_eq!(lines.len(), 5);
    assert!(lines[1].chars().all(|c| c == '='));
    assert_eq!(lines[1], lines[4]);
}

#[test]
fn test_rendering_widths_cover_headers_and_cells() {
    let mut table = Table::new();
    table.add_column("a", vec![1i64, 2]).unwrap();
    table.add_column("bb", vec![10i64, 200]).unwrap();

    // Width of `a` is its header (1), width of `bb` is its widest cell (3);
    // every cell is right-aligned into width + 1.
    assert_eq!(table.to_string(), " a  bb\n======\n 1  10\n 2 200\n======\n");
}

#[test]
fn test_empty_table_renders_no_rows() {
    let table = Table::new();
    let rendered = table.to_string();
    // A header line and two separators, all empty-width.
    assert_eq!(rendered, "\n\n\n");
}
