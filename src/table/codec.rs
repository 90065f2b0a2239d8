//! Dtype dispatch between external table payloads and typed tables.
//!
//! The external supported set is `float64`, `int64`, `bool`, and
//! `string`/`object`. A column declaring any other tag fails hard with
//! `UnsupportedDType` by default; with [`DecodeOptions::coerce_unsupported`]
//! set it degrades to its string representation instead, with a logged
//! warning. The opt-in flag is deliberate: the lenient path exists for
//! collaborators that emit exotic column dtypes, but silent degradation is
//! not the default.

use crate::config::DecodeOptions;
use crate::error::DatagridError;
use crate::payload::{ColumnPayload, ColumnValues, TablePayload};
use crate::table::core::Table;
use log::warn;

/// Decodes one external column into the table.
pub fn decode_table_column(
    table: &mut Table,
    payload: &ColumnPayload,
    options: &DecodeOptions,
) -> Result<(), DatagridError> {
    match payload.dtype.as_str() {
        "float64" => table.add_column(&payload.name, expect_float64(payload)?),
        "int64" => table.add_column(&payload.name, expect_int64(payload)?),
        "bool" => table.add_column(&payload.name, expect_bool(payload)?),
        "string" | "object" => table.add_column(&payload.name, expect_text(payload)?),
        other => {
            if options.coerce_unsupported {
                warn!(
                    "converting column `{}` from unsupported dtype `{}` to string",
                    payload.name, other
                );
                table.add_column(&payload.name, payload.values.to_text())
            } else {
                Err(DatagridError::UnsupportedDType(other.to_string()))
            }
        }
    }
}

/// Decodes a whole external table, including its side-channel metadata.
pub fn decode_table(
    payload: &TablePayload,
    options: &DecodeOptions,
) -> Result<Table, DatagridError> {
    let mut table = Table::new();
    for column in &payload.columns {
        decode_table_column(&mut table, column, options)?;
    }
    if !payload.column_units.is_empty() {
        table.set_column_units(payload.column_units.clone())?;
    }
    if !payload.row_title.is_empty() {
        table.set_row_title(&payload.row_title);
    }
    if !payload.row_names.is_empty() {
        table.set_row_names(payload.row_names.clone())?;
    }
    Ok(table)
}

/// Converts a table into its external representation, one dtype-tagged value
/// list per column in insertion order.
pub fn encode_table(table: &Table) -> Result<TablePayload, DatagridError> {
    let mut columns = Vec::with_capacity(table.column_count());
    for name in table.get_column_names() {
        let column = table.column(name)?;
        columns.push(ColumnPayload {
            name: name.clone(),
            dtype: column.dtype().name().to_string(),
            values: column.to_values(),
        });
    }
    Ok(TablePayload {
        columns,
        column_units: table.get_column_units().to_vec(),
        row_title: table.row_title().to_string(),
        row_names: table.row_names().to_vec(),
    })
}

fn shape_mismatch(payload: &ColumnPayload) -> DatagridError {
    DatagridError::PayloadFormat(format!(
        "column `{}` declares dtype `{}` but carries {} values",
        payload.name,
        payload.dtype,
        payload.values.shape_name()
    ))
}

fn expect_float64(payload: &ColumnPayload) -> Result<Vec<f64>, DatagridError> {
    match &payload.values {
        ColumnValues::Float64(v) => Ok(v.clone()),
        _ => Err(shape_mismatch(payload)),
    }
}

fn expect_int64(payload: &ColumnPayload) -> Result<Vec<i64>, DatagridError> {
    match &payload.values {
        ColumnValues::Int64(v) => Ok(v.clone()),
        _ => Err(shape_mismatch(payload)),
    }
}

fn expect_bool(payload: &ColumnPayload) -> Result<Vec<bool>, DatagridError> {
    match &payload.values {
        ColumnValues::Bool(v) => Ok(v.clone()),
        _ => Err(shape_mismatch(payload)),
    }
}

fn expect_text(payload: &ColumnPayload) -> Result<Vec<String>, DatagridError> {
    match &payload.values {
        ColumnValues::Text(v) => Ok(v.clone()),
        _ => Err(shape_mismatch(payload)),
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    fn unsupported_column() -> ColumnPayload {
        ColumnPayload {
            name: "stamp".to_string(),
            dtype: "datetime64".to_string(),
            values: ColumnValues::Int64(vec![10, 20]),
        }
    }

    #[test]
    fn test_unsupported_dtype_fails_hard_by_default() {
        let mut table = Table::new();
        let result =
            decode_table_column(&mut table, &unsupported_column(), &DecodeOptions::default());
        assert!(matches!(
            result,
            Err(DatagridError::UnsupportedDType(tag)) if tag == "datetime64"
        ));
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_unsupported_dtype_coerces_to_string_when_opted_in() {
        let options = DecodeOptions {
            coerce_unsupported: true,
        };
        let mut table = Table::new();
        decode_table_column(&mut table, &unsupported_column(), &options).unwrap();
        assert_eq!(table.get_column_type("stamp").unwrap(), DataType::String);
        assert_eq!(
            table.get_column::<String>("stamp").unwrap(),
            &["10".to_string(), "20".to_string()]
        );
    }

    #[test]
    fn test_object_is_an_alias_for_string() {
        let mut table = Table::new();
        let payload = ColumnPayload {
            name: "label".to_string(),
            dtype: "object".to_string(),
            values: ColumnValues::Text(vec!["x".to_string(), "y".to_string()]),
        };
        decode_table_column(&mut table, &payload, &DecodeOptions::default()).unwrap();
        assert_eq!(table.get_column_type("label").unwrap(), DataType::String);
    }

    #[test]
    fn test_declared_dtype_must_match_value_shape() {
        let mut table = Table::new();
        let payload = ColumnPayload {
            name: "x".to_string(),
            dtype: "float64".to_string(),
            values: ColumnValues::Int64(vec![1, 2]),
        };
        let result = decode_table_column(&mut table, &payload, &DecodeOptions::default());
        assert!(matches!(result, Err(DatagridError::PayloadFormat(_))));
    }

    #[test]
    fn test_table_roundtrip_with_metadata() {
        let mut table = Table::new();
        table.add_column("count", vec![1i64, 2]).unwrap();
        table.add_column("rate", vec![0.5f64, 1.5]).unwrap();
        table.add_column("ok", vec![true, false]).unwrap();
        table
            .set_column_units(vec!["n".to_string(), "1/s".to_string(), String::new()])
            .unwrap();
        table.set_row_title("sample");
        table
            .set_row_names(vec!["r0".to_string(), "r1".to_string()])
            .unwrap();

        let payload = encode_table(&table).unwrap();
        assert_eq!(payload.columns.len(), 3);
        assert_eq!(payload.columns[0].dtype, "int64");

        let bytes = payload.to_bytes().unwrap();
        let back = decode_table(
            &TablePayload::from_bytes(&bytes).unwrap(),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(back.get_column::<i64>("count").unwrap(), &[1, 2]);
        assert_eq!(back.get_column::<f64>("rate").unwrap(), &[0.5, 1.5]);
        assert_eq!(back.get_column::<bool>("ok").unwrap(), &[true, false]);
        assert_eq!(back.get_column_units(), table.get_column_units());
        assert_eq!(back.row_title(), "sample");
        assert_eq!(back.row_names(), table.row_names());
    }

    #[test]
    fn test_narrow_integer_columns_encode_with_their_own_tag() {
        // An i16 column widens its values to int64 but keeps its dtype tag;
        // decoding that tag is then subject to the supported-set policy.
        let mut table = Table::new();
        table.add_column("small", vec![1i16, 2]).unwrap();
        let payload = encode_table(&table).unwrap();
        assert_eq!(payload.columns[0].dtype, "int16");
        assert!(matches!(
            decode_table(&payload, &DecodeOptions::default()),
            Err(DatagridError::UnsupportedDType(tag)) if tag == "int16"
        ));

        let lenient = DecodeOptions {
            coerce_unsupported: true,
        };
        let back = decode_table(&payload, &lenient).unwrap();
        assert_eq!(back.get_column_type("small").unwrap(), DataType::String);
    }
}
