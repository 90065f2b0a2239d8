//! This module defines the scalar traits that tie concrete Rust types to
//! their [`DataType`] tags.
//!
//! `Scalar` covers every type a table column or array may hold; `Element`
//! narrows to the numeric types whose buffers can be viewed as raw bytes.

use crate::payload::ColumnValues;
use crate::types::DataType;
use std::fmt::{Debug, Display};

/// A concrete scalar type with a compile-time dtype tag.
///
/// `Display` doubles as the uniform, locale-independent cell stringification
/// used by table rendering: the same value always stringifies identically.
pub trait Scalar: Clone + Default + PartialEq + Debug + Display + Send + Sync + 'static {
    const DTYPE: DataType;

    /// Converts a slice of this type into the external column value list.
    /// Narrow integers widen to `int64` and `f32` to `float64`; the column's
    /// dtype tag still records the stored type.
    fn collect_values(values: &[Self]) -> ColumnValues;
}

/// A numeric scalar usable as the element type of the generic array
/// container: bit-castable to bytes and zero-initializable.
pub trait Element: Scalar + bytemuck::Pod + num_traits::Zero {}

impl<T> Element for T where T: Scalar + bytemuck::Pod + num_traits::Zero {}

macro_rules! impl_int_scalar {
    ($($t:ty => $dtype:expr),* $(,)?) => {
        $(
            impl Scalar for $t {
                const DTYPE: DataType = $dtype;

                fn collect_values(values: &[Self]) -> ColumnValues {
                    ColumnValues::Int64(values.iter().map(|v| *v as i64).collect())
                }
            }
        )*
    };
}

macro_rules! impl_float_scalar {
    ($($t:ty => $dtype:expr),* $(,)?) => {
        $(
            impl Scalar for $t {
                const DTYPE: DataType = $dtype;

                fn collect_values(values: &[Self]) -> ColumnValues {
                    ColumnValues::Float64(values.iter().map(|v| *v as f64).collect())
                }
            }
        )*
    };
}

impl_int_scalar!(
    i8 => DataType::Int8,
    i16 => DataType::Int16,
    i32 => DataType::Int32,
    i64 => DataType::Int64,
    u8 => DataType::UInt8,
    u16 => DataType::UInt16,
    u32 => DataType::UInt32,
    // NOTE: u64 values above i64::MAX wrap when widened into the external
    // int64 value list; the in-memory containers are unaffected.
    u64 => DataType::UInt64,
);

impl_float_scalar!(
    f32 => DataType::Float32,
    f64 => DataType::Float64,
);

impl Scalar for bool {
    const DTYPE: DataType = DataType::Bool;

    fn collect_values(values: &[Self]) -> ColumnValues {
        ColumnValues::Bool(values.to_vec())
    }
}

impl Scalar for String {
    const DTYPE: DataType = DataType::String;

    fn collect_values(values: &[Self]) -> ColumnValues {
        ColumnValues::Text(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_constants_match_tags() {
        assert_eq!(<i32 as Scalar>::DTYPE.name(), "int32");
        assert_eq!(<u8 as Scalar>::DTYPE.name(), "uint8");
        assert_eq!(<f64 as Scalar>::DTYPE.name(), "float64");
        assert_eq!(<bool as Scalar>::DTYPE.name(), "bool");
        assert_eq!(<String as Scalar>::DTYPE.name(), "string");
    }

    #[test]
    fn test_narrow_integers_widen_to_int64() {
        let values: Vec<i16> = vec![-3, 0, 7];
        match <i16 as Scalar>::collect_values(&values) {
            ColumnValues::Int64(v) => assert_eq!(v, vec![-3, 0, 7]),
            other => panic!("expected Int64 values, got {:?}", other),
        }
    }

    #[test]
    fn test_f32_widens_to_float64() {
        let values: Vec<f32> = vec![1.5, -2.25];
        match <f32 as Scalar>::collect_values(&values) {
            ColumnValues::Float64(v) => assert_eq!(v, vec![1.5, -2.25]),
            other => panic!("expected Float64 values, got {:?}", other),
        }
    }
}
