//! Defines the external representation of a table: an ordered list of
//! dtype-tagged column value lists plus the side-channel metadata the
//! collaborator stores next to the data (column units, row title, row names).
//!
//! The body is JSON: every value shape a column can carry (`i64`, `f64`,
//! `bool`, `String`) round-trips exactly through serde_json.

use crate::error::DatagridError;
use crate::payload::{MAX_REASONABLE_STRING_LEN, PAYLOAD_FORMAT_VERSION, TABLE_MAGIC};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// magic(4) + ver(2) + body_len(4)
const MIN_PAYLOAD_SIZE: usize = 10;

/// The untyped value list of one external column.
///
/// "Untyped" from the container's point of view: the variant carries the
/// physical values, while the declared dtype tag on [`ColumnPayload`] decides
/// how the decoder interprets them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Float64(v) => v.len(),
            ColumnValues::Bool(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The name of the physical value shape, for error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            ColumnValues::Int64(_) => "int64",
            ColumnValues::Float64(_) => "float64",
            ColumnValues::Bool(_) => "bool",
            ColumnValues::Text(_) => "text",
        }
    }

    /// Stringifies every value, for the coerce-to-string degrade path.
    pub fn to_text(&self) -> Vec<String> {
        match self {
            ColumnValues::Int64(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnValues::Float64(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnValues::Bool(v) => v.iter().map(|x| x.to_string()).collect(),
            ColumnValues::Text(v) => v.clone(),
        }
    }
}

/// One external column: a name, a declared dtype tag, and the value list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColumnPayload {
    pub name: String,
    pub dtype: String,
    pub values: ColumnValues,
}

/// The external representation of a whole table, in column order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TablePayload {
    pub columns: Vec<ColumnPayload>,
    /// One unit string per column, positionally aligned. Empty when unset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_units: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub row_title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub row_names: Vec<String>,
}

impl TablePayload {
    /// Serializes the payload into a canonical byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DatagridError> {
        let body = serde_json::to_string(self)?;
        if body.len() > MAX_REASONABLE_STRING_LEN {
            return Err(DatagridError::PayloadFormat(format!(
                "table body length ({}) exceeds maximum allowed size ({})",
                body.len(),
                MAX_REASONABLE_STRING_LEN
            )));
        }

        let mut buf = Vec::with_capacity(MIN_PAYLOAD_SIZE + body.len());
        let map_err = |e: std::io::Error| DatagridError::PayloadFormat(e.to_string());
        buf.write_all(TABLE_MAGIC).map_err(map_err)?;
        buf.write_all(&PAYLOAD_FORMAT_VERSION.to_le_bytes())
            .map_err(map_err)?;
        buf.write_all(&(body.len() as u32).to_le_bytes())
            .map_err(map_err)?;
        buf.write_all(body.as_bytes()).map_err(map_err)?;
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatagridError> {
        if bytes.len() < MIN_PAYLOAD_SIZE {
            return Err(DatagridError::PayloadFormat(format!(
                "payload is too small to be valid: minimum size {}, got {}",
                MIN_PAYLOAD_SIZE,
                bytes.len()
            )));
        }
        if bytes[..4] != *TABLE_MAGIC {
            return Err(DatagridError::PayloadFormat(
                "invalid table payload magic number".into(),
            ));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != PAYLOAD_FORMAT_VERSION {
            return Err(DatagridError::PayloadFormat(format!(
                "unsupported payload version: expected {}, got {}",
                PAYLOAD_FORMAT_VERSION, version
            )));
        }
        let body_len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
        if bytes.len() != MIN_PAYLOAD_SIZE + body_len {
            return Err(DatagridError::PayloadFormat(format!(
                "payload length {} does not match declared size {}",
                bytes.len(),
                MIN_PAYLOAD_SIZE + body_len
            )));
        }
        let body = std::str::from_utf8(&bytes[MIN_PAYLOAD_SIZE..])
            .map_err(|e| DatagridError::PayloadFormat(e.to_string()))?;
        Ok(serde_json::from_str(body)?)
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
