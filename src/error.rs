// In: src/error.rs

//! This module defines the single, unified error type for the entire crate.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatagridError {
    // =========================================================================
    // === Array container errors
    // =========================================================================
    /// An empty shape, a zero-length dimension, or an element count that
    /// overflows `u64`.
    #[error("invalid array shape {shape:?}: {reason}")]
    InvalidShape { shape: Vec<u64>, reason: String },

    /// A flat buffer whose length disagrees with the product of the shape.
    #[error("buffer length {actual} does not match shape {shape:?} (expected {expected})")]
    SizeMismatch {
        shape: Vec<u64>,
        expected: u64,
        actual: u64,
    },

    /// Checked multi-index access with a missing, negative, or too-large index.
    #[error("array index out of bounds: {0}")]
    OutOfBounds(String),

    /// An operation the element type cannot support (e.g. raw byte access on a
    /// string-element array).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A dtype tag outside the supported set.
    #[error("unsupported data type tag `{0}`")]
    UnsupportedDType(String),

    // =========================================================================
    // === Table container errors
    // =========================================================================
    #[error("a column named `{0}` already exists in this table")]
    DuplicateColumn(String),

    #[error("column `{name}` has {actual} rows but the table holds {expected}")]
    RowCountMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("there is no column named `{0}` in this table")]
    ColumnNotFound(String),

    /// Typed access to a column whose stored element type differs from the
    /// requested one. Reports both sides, never reinterprets the buffer.
    #[error("column `{name}` stores `{stored}` values, `{requested}` was requested")]
    ColumnTypeMismatch {
        name: String,
        stored: &'static str,
        requested: &'static str,
    },

    #[error("{actual} column units supplied for a table with {expected} columns")]
    UnitCountMismatch { expected: usize, actual: usize },

    // =========================================================================
    // === Payload (external representation) errors
    // =========================================================================
    /// A malformed or inconsistent serialized payload.
    #[error("payload format error: {0}")]
    PayloadFormat(String),

    // =========================================================================
    // === External error wrappers
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (cursor reads
    /// during payload parsing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library during payload metadata
    /// serialization.
    #[error("serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// A safe byte-casting operation failing.
    #[error("byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error

    #[error("internal logic error (this is a bug): {0}")]
    Internal(String),
}

impl From<bytemuck::PodCastError> for DatagridError {
    fn from(err: bytemuck::PodCastError) -> Self {
        DatagridError::PodCast(err.to_string())
    }
}
