// In: src/array/mod.rs

//! The typed multi-dimensional array container.
//!
//! A non-generic capability handle ([`ArrayData`]) for callers that hold
//! arrays of mixed element types, over generic/concrete implementations
//! ([`NdArray<T>`], [`BoolArray`], [`TextArray`]) for compile-time-checked
//! access, with dtype-tag dispatch ([`codec::decode_array`]) at the external
//! boundary.

pub mod axis;
pub mod boolean;
pub mod codec;
pub mod handle;
pub mod layout;
pub mod numeric;
pub mod text;

pub use axis::AxisMeta;
pub use boolean::BoolArray;
pub use codec::decode_array;
pub use handle::ArrayData;
pub use layout::{Layout, MAX_INDEX_DIMS};
pub use numeric::NdArray;
pub use text::TextArray;
