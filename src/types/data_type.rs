//! This module defines the canonical, type-safe representation of element
//! types used throughout the crate.
//!
//! The enum replaces a string-keyed registry: every dtype tag is mapped at
//! compile time, so dispatch over tags is exhaustive and there is no mutable
//! global state behind error messages.

use crate::error::DatagridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical representation of an element type.
///
/// The string form of each variant (`name()` / `parse()`) is the dtype tag
/// exchanged with the external persistence collaborator, matching the
/// tag vocabulary of numpy-style dtype names.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    String,
}

impl DataType {
    /// The canonical dtype tag for this type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }

    /// Parses a dtype tag.
    ///
    /// `object` is accepted as an alias for `string`: it is what the tabular
    /// collaborator calls text columns. Any other tag fails with
    /// [`DatagridError::UnsupportedDType`] naming the offending tag.
    pub fn parse(tag: &str) -> Result<Self, DatagridError> {
        match tag {
            "int8" => Ok(Self::Int8),
            "int16" => Ok(Self::Int16),
            "int32" => Ok(Self::Int32),
            "int64" => Ok(Self::Int64),
            "uint8" => Ok(Self::UInt8),
            "uint16" => Ok(Self::UInt16),
            "uint32" => Ok(Self::UInt32),
            "uint64" => Ok(Self::UInt64),
            "float32" => Ok(Self::Float32),
            "float64" => Ok(Self::Float64),
            "bool" => Ok(Self::Bool),
            "string" | "object" => Ok(Self::String),
            other => Err(DatagridError::UnsupportedDType(other.to_string())),
        }
    }

    /// In-memory width of one element in bytes, `None` for text elements
    /// (which are not stored as a fixed-width contiguous byte run).
    pub fn byte_width(&self) -> Option<usize> {
        match self {
            Self::Int8 | Self::UInt8 | Self::Bool => Some(1),
            Self::Int16 | Self::UInt16 => Some(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => Some(4),
            Self::Int64 | Self::UInt64 | Self::Float64 => Some(8),
            Self::String => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::String)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_every_canonical_tag() {
        let all = [
            DataType::Int8,
            DataType::Int16,
            DataType::Int32,
            DataType::Int64,
            DataType::UInt8,
            DataType::UInt16,
            DataType::UInt32,
            DataType::UInt64,
            DataType::Float32,
            DataType::Float64,
            DataType::Bool,
            DataType::String,
        ];
        for dt in all {
            assert_eq!(DataType::parse(dt.name()).unwrap(), dt);
        }
    }

    #[test]
    fn test_parse_accepts_object_alias() {
        assert_eq!(DataType::parse("object").unwrap(), DataType::String);
    }

    #[test]
    fn test_parse_rejects_unknown_tags() {
        let result = DataType::parse("datetime64");
        assert!(matches!(
            result,
            Err(DatagridError::UnsupportedDType(tag)) if tag == "datetime64"
        ));
    }

    #[test]
    fn test_byte_widths() {
        assert_eq!(DataType::Int8.byte_width(), Some(1));
        assert_eq!(DataType::UInt16.byte_width(), Some(2));
        assert_eq!(DataType::Float32.byte_width(), Some(4));
        assert_eq!(DataType::Float64.byte_width(), Some(8));
        assert_eq!(DataType::Bool.byte_width(), Some(1));
        assert_eq!(DataType::String.byte_width(), None);
    }
}
