// In: src/table/mod.rs

//! The heterogeneous typed table container.
//!
//! A dtype-erased [`Column`] handle over generic [`TypedColumn<T>`] storage,
//! owned by a [`Table`] that enforces unique names and equal lengths, plus
//! the external decode/encode dispatch in [`codec`].

pub mod codec;
pub mod column;
pub mod core;

pub use codec::{decode_table, decode_table_column, encode_table};
pub use column::{Column, TypedColumn};
pub use self::core::Table;

#[cfg(test)]
mod tests;
