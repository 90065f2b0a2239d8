//! Defines the self-describing external representation of a single array.
//! This module is the single source of truth for its serialization,
//! deserialization, and efficient metadata peeking.

use crate::error::DatagridError;
use crate::payload::{
    ARRAY_MAGIC, MAX_PAYLOAD_NDIM, MAX_REASONABLE_STRING_LEN, PAYLOAD_FORMAT_VERSION,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

/// The minimum possible size of a valid array payload in bytes.
/// magic(4) + ver(2) + ndim(4) + dtype_len(2) + attrs_len(4) + data_len(8)
const MIN_PAYLOAD_SIZE: usize = 24;

//==================================================================================
// Public Structs
//==================================================================================

/// A named side-channel metadata field attached to an [`ArrayPayload`].
///
/// The key vocabulary follows the collaborator's attribute naming convention:
/// `unit` for the whole array, and `dim_<i>_title`, `dim_<i>_units`,
/// `dim_<i>_names`, `dim_<i>_values` per axis. Empty fields are never
/// written; readers must treat absence as "empty", not as an error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Attribute {
    /// A single string (titles, units).
    Text(String),
    /// An ordered list of strings (tick display names).
    TextList(Vec<String>),
    /// A flat typed buffer (tick values), tagged with its own dtype.
    Data { dtype: String, data: Vec<u8> },
}

impl Attribute {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Attribute::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Attribute::TextList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<(&str, &[u8])> {
        match self {
            Attribute::Data { dtype, data } => Some((dtype, data)),
            _ => None,
        }
    }
}

/// The metadata extracted from a serialized payload's header, for inspection
/// without reading the (potentially large) data section into a payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPayloadHeader {
    pub format_version: u16,
    /// The dtype tag of the element buffer.
    pub dtype: String,
    pub shape: Vec<u64>,
    /// The size of the data section in bytes.
    pub data_size: usize,
}

/// The external representation of one array: a flat untyped element buffer,
/// its dtype tag and shape, and named side-channel metadata fields.
///
/// For every fixed-width dtype the data section holds the flattened elements
/// in row-major order and native byte order; for `bool` it is bit-packed,
/// one bit per element, least-significant bit first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayPayload {
    pub dtype: String,
    pub shape: Vec<u64>,
    pub data: Vec<u8>,
    pub attrs: BTreeMap<String, Attribute>,
}

//==================================================================================
// Core Implementation
//==================================================================================

impl ArrayPayload {
    pub fn new(dtype: &str, shape: Vec<u64>, data: Vec<u8>) -> Self {
        Self {
            dtype: dtype.to_string(),
            shape,
            data,
            attrs: BTreeMap::new(),
        }
    }

    /// Serializes the payload into a canonical, final byte vector.
    /// The attribute map is a `BTreeMap`, so the metadata section is
    /// deterministic for equal payloads.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DatagridError> {
        if self.shape.len() > MAX_PAYLOAD_NDIM {
            return Err(DatagridError::PayloadFormat(format!(
                "{} dimensions exceed the payload maximum of {}",
                self.shape.len(),
                MAX_PAYLOAD_NDIM
            )));
        }
        let attrs_json = serde_json::to_string(&self.attrs)?;

        let mut buf = Vec::with_capacity(
            MIN_PAYLOAD_SIZE + self.shape.len() * 8 + self.dtype.len() + attrs_json.len()
                + self.data.len(),
        );
        let map_err = |e: std::io::Error| DatagridError::PayloadFormat(e.to_string());

        buf.write_all(ARRAY_MAGIC).map_err(map_err)?;
        buf.write_all(&PAYLOAD_FORMAT_VERSION.to_le_bytes())
            .map_err(map_err)?;
        buf.write_all(&(self.shape.len() as u32).to_le_bytes())
            .map_err(map_err)?;
        for &extent in &self.shape {
            buf.write_all(&extent.to_le_bytes()).map_err(map_err)?;
        }
        write_prefixed_string(&mut buf, &self.dtype, 2)?;
        write_prefixed_string(&mut buf, &attrs_json, 4)?;
        buf.write_all(&(self.data.len() as u64).to_le_bytes())
            .map_err(map_err)?;
        buf.write_all(&self.data).map_err(map_err)?;

        Ok(buf)
    }

    /// Deserializes a full byte slice, including the data section.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DatagridError> {
        let (header, attrs, data_start) = parse_header(bytes)?;

        let data_end = data_start + header.data_size;
        if bytes.len() != data_end {
            return Err(DatagridError::PayloadFormat(format!(
                "payload length {} does not match declared size {}",
                bytes.len(),
                data_end
            )));
        }

        Ok(Self {
            dtype: header.dtype,
            shape: header.shape,
            data: bytes[data_start..data_end].to_vec(),
            attrs,
        })
    }

    /// Peeks into a serialized payload's header without copying the data
    /// section.
    pub fn peek_header(bytes: &[u8]) -> Result<ArrayPayloadHeader, DatagridError> {
        let (header, _, data_start) = parse_header(bytes)?;
        if bytes.len() < data_start + header.data_size {
            return Err(DatagridError::PayloadFormat(
                "declared data size exceeds buffer length".into(),
            ));
        }
        Ok(header)
    }

    /// Inserts a `Text` attribute, dropping empty values (empty metadata is
    /// never written).
    pub fn put_text_attr(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.attrs
                .insert(key.to_string(), Attribute::Text(value.to_string()));
        }
    }

    /// Inserts a `TextList` attribute, dropping empty lists.
    pub fn put_text_list_attr(&mut self, key: &str, values: &[String]) {
        if !values.is_empty() {
            self.attrs
                .insert(key.to_string(), Attribute::TextList(values.to_vec()));
        }
    }

    /// Inserts a `Data` attribute, dropping empty buffers.
    pub fn put_data_attr(&mut self, key: &str, dtype: &str, data: Vec<u8>) {
        if !data.is_empty() {
            self.attrs.insert(
                key.to_string(),
                Attribute::Data {
                    dtype: dtype.to_string(),
                    data,
                },
            );
        }
    }
}

/// Parses everything up to the data section; returns the header, the
/// attribute map, and the offset at which the data section begins.
fn parse_header(
    bytes: &[u8],
) -> Result<(ArrayPayloadHeader, BTreeMap<String, Attribute>, usize), DatagridError> {
    if bytes.len() < MIN_PAYLOAD_SIZE {
        return Err(DatagridError::PayloadFormat(format!(
            "payload is too small to be valid: minimum size {}, got {}",
            MIN_PAYLOAD_SIZE,
            bytes.len()
        )));
    }

    let mut cursor = Cursor::new(bytes);
    let map_err = |e: std::io::Error| DatagridError::PayloadFormat(e.to_string());

    let mut magic_buf = [0u8; 4];
    cursor.read_exact(&mut magic_buf).map_err(map_err)?;
    if magic_buf != *ARRAY_MAGIC {
        return Err(DatagridError::PayloadFormat(
            "invalid array payload magic number".into(),
        ));
    }

    let mut u16_buf = [0u8; 2];
    cursor.read_exact(&mut u16_buf).map_err(map_err)?;
    let version = u16::from_le_bytes(u16_buf);
    if version != PAYLOAD_FORMAT_VERSION {
        return Err(DatagridError::PayloadFormat(format!(
            "unsupported payload version: expected {}, got {}",
            PAYLOAD_FORMAT_VERSION, version
        )));
    }

    let mut u32_buf = [0u8; 4];
    cursor.read_exact(&mut u32_buf).map_err(map_err)?;
    let ndim = u32::from_le_bytes(u32_buf) as usize;
    // Validate before the shape-sized allocation below.
    if ndim > MAX_PAYLOAD_NDIM {
        return Err(DatagridError::PayloadFormat(format!(
            "{} dimensions exceed the payload maximum of {}",
            ndim, MAX_PAYLOAD_NDIM
        )));
    }

    let mut u64_buf = [0u8; 8];
    let mut shape = Vec::with_capacity(ndim);
    for _ in 0..ndim {
        cursor.read_exact(&mut u64_buf).map_err(map_err)?;
        shape.push(u64::from_le_bytes(u64_buf));
    }

    let dtype = read_prefixed_string(&mut cursor, 2)?;
    let attrs_json = read_prefixed_string(&mut cursor, 4)?;
    let attrs: BTreeMap<String, Attribute> = serde_json::from_str(&attrs_json)?;

    cursor.read_exact(&mut u64_buf).map_err(map_err)?;
    let data_size = u64::from_le_bytes(u64_buf) as usize;
    let data_start = cursor.position() as usize;

    if bytes.len() < data_start || data_size > bytes.len() - data_start {
        return Err(DatagridError::PayloadFormat(
            "declared data size exceeds buffer length".into(),
        ));
    }

    Ok((
        ArrayPayloadHeader {
            format_version: version,
            dtype,
            shape,
            data_size,
        },
        attrs,
        data_start,
    ))
}

//==================================================================================
// Private Helpers
//==================================================================================

pub(crate) fn read_prefixed_string(
    cursor: &mut Cursor<&[u8]>,
    len_bytes: usize,
) -> Result<String, DatagridError> {
    let map_err = |e: std::io::Error| DatagridError::PayloadFormat(e.to_string());

    let len = match len_bytes {
        2 => {
            let mut buf = [0u8; 2];
            cursor.read_exact(&mut buf).map_err(map_err)?;
            u16::from_le_bytes(buf) as usize
        }
        4 => {
            let mut buf = [0u8; 4];
            cursor.read_exact(&mut buf).map_err(map_err)?;
            u32::from_le_bytes(buf) as usize
        }
        _ => {
            return Err(DatagridError::Internal(
                "unsupported length prefix size".into(),
            ))
        }
    };

    // Validate length against a sane maximum before allocating.
    if len > MAX_REASONABLE_STRING_LEN {
        return Err(DatagridError::PayloadFormat(format!(
            "string length ({}) exceeds maximum allowed size ({})",
            len, MAX_REASONABLE_STRING_LEN
        )));
    }

    let mut str_buf = vec![0; len];
    cursor.read_exact(&mut str_buf).map_err(map_err)?;
    String::from_utf8(str_buf).map_err(|e| DatagridError::PayloadFormat(e.to_string()))
}

pub(crate) fn write_prefixed_string<W: Write>(
    writer: &mut W,
    s: &str,
    len_bytes: usize,
) -> Result<(), DatagridError> {
    let len = s.len();
    if len > MAX_REASONABLE_STRING_LEN {
        return Err(DatagridError::PayloadFormat(format!(
            "string length ({}) exceeds maximum allowed size ({})",
            len, MAX_REASONABLE_STRING_LEN
        )));
    }
    let map_err = |e: std::io::Error| DatagridError::PayloadFormat(e.to_string());
    match len_bytes {
        2 => writer
            .write_all(&(len as u16).to_le_bytes())
            .map_err(map_err)?,
        4 => writer
            .write_all(&(len as u32).to_le_bytes())
            .map_err(map_err)?,
        _ => {
            return Err(DatagridError::Internal(
                "unsupported length prefix size".into(),
            ))
        }
    }
    writer.write_all(s.as_bytes()).map_err(map_err)
}

//==================================================================================
// Unit Tests
//==================================================================================
