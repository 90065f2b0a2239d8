//! Dtype dispatch between external payloads and typed arrays.
//!
//! Decoding without compile-time knowledge of the element type goes through
//! an exhaustive match on the parsed [`DataType`] tag; each arm constructs
//! the matching concrete array behind the dtype-erased handle. The `string`
//! tag is deliberately outside this dispatch: text has no external buffer
//! representation.

use crate::array::boolean::BoolArray;
use crate::array::handle::ArrayData;
use crate::array::numeric::NdArray;
use crate::error::DatagridError;
use crate::payload::{ArrayPayload, Attribute};
use crate::types::DataType;
use std::collections::BTreeMap;

/// Decodes an external payload into a typed array without knowing the
/// element type at compile time.
///
/// Fails with `UnsupportedDType` for an unknown tag and for `string`;
/// everything payload-shaped that the per-type decoders reject (length
/// mismatches, foreign tick dtypes) propagates unchanged.
pub fn decode_array(payload: &ArrayPayload) -> Result<Box<dyn ArrayData>, DatagridError> {
    match DataType::parse(&payload.dtype)? {
        DataType::Int8 => Ok(Box::new(NdArray::<i8>::decode(payload)?)),
        DataType::Int16 => Ok(Box::new(NdArray::<i16>::decode(payload)?)),
        DataType::Int32 => Ok(Box::new(NdArray::<i32>::decode(payload)?)),
        DataType::Int64 => Ok(Box::new(NdArray::<i64>::decode(payload)?)),
        DataType::UInt8 => Ok(Box::new(NdArray::<u8>::decode(payload)?)),
        DataType::UInt16 => Ok(Box::new(NdArray::<u16>::decode(payload)?)),
        DataType::UInt32 => Ok(Box::new(NdArray::<u32>::decode(payload)?)),
        DataType::UInt64 => Ok(Box::new(NdArray::<u64>::decode(payload)?)),
        DataType::Float32 => Ok(Box::new(NdArray::<f32>::decode(payload)?)),
        DataType::Float64 => Ok(Box::new(NdArray::<f64>::decode(payload)?)),
        DataType::Bool => Ok(Box::new(BoolArray::decode(payload)?)),
        DataType::String => Err(DatagridError::UnsupportedDType("string".into())),
    }
}

//==================================================================================
// Attribute access helpers (shared by the per-type decoders)
//==================================================================================

/// The collaborator's attribute key convention: `dim_<axis>_<field>`.
pub(crate) fn dim_key(axis: usize, field: &str) -> String {
    format!("dim_{}_{}", axis, field)
}

/// Reads a `Text` attribute; absent decodes as empty, a different attribute
/// kind under the key is a malformed payload.
pub(crate) fn get_text_attr(
    attrs: &BTreeMap<String, Attribute>,
    key: &str,
) -> Result<String, DatagridError> {
    match attrs.get(key) {
        None => Ok(String::new()),
        Some(attr) => attr
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| wrong_kind(key, "text")),
    }
}

/// Reads a `TextList` attribute; absent decodes as an empty list.
pub(crate) fn get_text_list_attr(
    attrs: &BTreeMap<String, Attribute>,
    key: &str,
) -> Result<Vec<String>, DatagridError> {
    match attrs.get(key) {
        None => Ok(Vec::new()),
        Some(attr) => attr
            .as_text_list()
            .map(<[String]>::to_vec)
            .ok_or_else(|| wrong_kind(key, "text list")),
    }
}

/// Reads a `Data` attribute; absent is `None`.
pub(crate) fn get_data_attr<'a>(
    attrs: &'a BTreeMap<String, Attribute>,
    key: &str,
) -> Result<Option<(&'a str, &'a [u8])>, DatagridError> {
    match attrs.get(key) {
        None => Ok(None),
        Some(attr) => attr
            .as_data()
            .map(Some)
            .ok_or_else(|| wrong_kind(key, "data")),
    }
}

fn wrong_kind(key: &str, expected: &str) -> DatagridError {
    DatagridError::PayloadFormat(format!("attribute `{}` is not a {} attribute", key, expected))
}
