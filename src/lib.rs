//! This file is the root of the `datagrid_core` Rust crate.
//!
//! The crate is a typed dynamic container library: a dense multi-dimensional
//! array with dtype-erasure and strided indexing, and a heterogeneous typed
//! table, each paired with a dtype-tag codec for exchanging data with an
//! external persistence collaborator. The containers do no I/O themselves;
//! they decode from and encode to self-describing payloads the collaborator
//! carries to its own storage.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod array;
pub mod config;
pub mod error;
pub mod payload;
pub mod table;
pub mod types;

mod utils;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use array::{decode_array, ArrayData, AxisMeta, BoolArray, NdArray, TextArray};
pub use config::DecodeOptions;
pub use error::DatagridError;
pub use payload::{ArrayPayload, Attribute, ColumnPayload, ColumnValues, TablePayload};
pub use table::{decode_table, decode_table_column, encode_table, Column, Table, TypedColumn};
pub use types::{DataType, Element, Scalar};

/// Turns on env_logger-backed logging at `info` level (overridable through
/// `RUST_LOG`), so coercion warnings from the table decode path reach stderr.
/// Safe to call more than once.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
