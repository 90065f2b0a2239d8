//! The generic typed array container for numeric element types.
//!
//! `NdArray<T>` owns a flat row-major buffer plus the per-axis metadata, and
//! is the concrete type behind the dtype-erased [`ArrayData`] handle for
//! every fixed-width numeric dtype. Boolean and string arrays are distinct
//! concrete types (`BoolArray`, `TextArray`): neither element type satisfies
//! the `Pod` contract this implementation relies on for raw byte views.

use crate::array::axis::AxisMeta;
use crate::array::codec;
use crate::array::handle::ArrayData;
use crate::array::layout::Layout;
use crate::error::DatagridError;
use crate::payload::ArrayPayload;
use crate::types::{DataType, Element};
use crate::utils::{safe_bytes_to_typed_vec, typed_slice_to_bytes};
use std::any::Any;
use std::ops::{Index, IndexMut};

/// A dense N-dimensional array of a single numeric element type.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T: Element> {
    layout: Layout,
    data: Vec<T>,
    axes: Vec<AxisMeta<T>>,
    unit: String,
}

impl<T: Element> NdArray<T> {
    /// Creates a zero-filled array of the given shape.
    pub fn zeros(shape: &[u64]) -> Result<Self, DatagridError> {
        let layout = Layout::new(shape.to_vec())?;
        let data = vec![T::zero(); layout.len() as usize];
        Ok(Self::assemble(layout, data))
    }

    /// Takes ownership of a flat buffer. The buffer length must equal the
    /// product of the shape.
    pub fn from_vec(shape: &[u64], data: Vec<T>) -> Result<Self, DatagridError> {
        let layout = Layout::new(shape.to_vec())?;
        if data.len() as u64 != layout.len() {
            return Err(DatagridError::SizeMismatch {
                shape: shape.to_vec(),
                expected: layout.len(),
                actual: data.len() as u64,
            });
        }
        Ok(Self::assemble(layout, data))
    }

    /// Copies a flat slice; the caller keeps ownership of the source.
    pub fn from_slice(shape: &[u64], values: &[T]) -> Result<Self, DatagridError> {
        Self::from_vec(shape, values.to_vec())
    }

    /// 2-D convenience constructor from nested rows. The shape is inferred
    /// as (row count, row width); ragged input is rejected.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, DatagridError> {
        if rows.is_empty() {
            return Err(DatagridError::InvalidShape {
                shape: vec![0],
                reason: "no rows supplied".into(),
            });
        }
        let width = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DatagridError::InvalidShape {
                    shape: vec![rows.len() as u64, width as u64],
                    reason: format!("row {} has {} elements, expected {}", i, row.len(), width),
                });
            }
        }
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows {
            data.extend_from_slice(row);
        }
        Self::from_vec(&[rows.len() as u64, width as u64], data)
    }

    fn assemble(layout: Layout, data: Vec<T>) -> Self {
        let axes = vec![AxisMeta::default(); layout.ndim()];
        Self {
            layout,
            data,
            axes,
            unit: String::new(),
        }
    }

    /// Checked multi-index access; handles striding for the caller.
    pub fn at(&self, index: &[i64]) -> Result<&T, DatagridError> {
        Ok(&self.data[self.layout.offset(index)?])
    }

    pub fn at_mut(&mut self, index: &[i64]) -> Result<&mut T, DatagridError> {
        let offset = self.layout.offset(index)?;
        Ok(&mut self.data[offset])
    }

    /// The flattened element buffer.
    pub fn values(&self) -> &[T] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Metadata for one axis.
    pub fn axis(&self, axis: usize) -> Result<&AxisMeta<T>, DatagridError> {
        self.axes.get(axis).ok_or_else(|| {
            DatagridError::OutOfBounds(format!(
                "axis {} out of range for a {}-dimensional array",
                axis,
                self.axes.len()
            ))
        })
    }

    pub fn axis_mut(&mut self, axis: usize) -> Result<&mut AxisMeta<T>, DatagridError> {
        let ndim = self.axes.len();
        self.axes.get_mut(axis).ok_or_else(|| {
            DatagridError::OutOfBounds(format!(
                "axis {} out of range for a {}-dimensional array",
                axis, ndim
            ))
        })
    }

    /// Reconstructs a typed array from its external representation.
    ///
    /// The payload's dtype tag must match `T`; absent metadata attributes
    /// decode as empty.
    pub fn decode(payload: &ArrayPayload) -> Result<Self, DatagridError> {
        let dtype = DataType::parse(&payload.dtype)?;
        if dtype != T::DTYPE {
            return Err(DatagridError::PayloadFormat(format!(
                "payload carries `{}` elements, `{}` was requested",
                dtype,
                T::DTYPE
            )));
        }
        let layout = Layout::new(payload.shape.clone())?;
        let data: Vec<T> = safe_bytes_to_typed_vec(&payload.data)?;
        if data.len() as u64 != layout.len() {
            return Err(DatagridError::SizeMismatch {
                shape: payload.shape.clone(),
                expected: layout.len(),
                actual: data.len() as u64,
            });
        }

        let mut array = Self::assemble(layout, data);
        array.unit = codec::get_text_attr(&payload.attrs, "unit")?;
        for i in 0..array.axes.len() {
            let axis = &mut array.axes[i];
            axis.title = codec::get_text_attr(&payload.attrs, &codec::dim_key(i, "title"))?;
            axis.unit = codec::get_text_attr(&payload.attrs, &codec::dim_key(i, "units"))?;
            axis.names = codec::get_text_list_attr(&payload.attrs, &codec::dim_key(i, "names"))?;
            if let Some((value_dtype, bytes)) =
                codec::get_data_attr(&payload.attrs, &codec::dim_key(i, "values"))?
            {
                if DataType::parse(value_dtype)? != T::DTYPE {
                    return Err(DatagridError::PayloadFormat(format!(
                        "axis {} tick values carry `{}` elements in a `{}` array",
                        i,
                        value_dtype,
                        T::DTYPE
                    )));
                }
                axis.values = safe_bytes_to_typed_vec(bytes)?;
            }
        }
        Ok(array)
    }
}

/// Fast element access via direct indexing of the flattened buffer. No
/// multi-dimensional bounds handling; callers stride manually.
impl<T: Element> Index<usize> for NdArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Element> IndexMut<usize> for NdArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

/// Unchecked 2-D access: `array[(row, col)]` computes
/// `row * stride[0] + col` and assumes two dimensions.
impl<T: Element> Index<(usize, usize)> for NdArray<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.layout.offset_2d(row, col)]
    }
}

impl<T: Element> IndexMut<(usize, usize)> for NdArray<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let offset = self.layout.offset_2d(row, col);
        &mut self.data[offset]
    }
}

impl<T: Element> ArrayData for NdArray<T> {
    fn dtype(&self) -> DataType {
        T::DTYPE
    }

    fn shape(&self) -> &[u64] {
        self.layout.shape()
    }

    fn strides(&self) -> &[u64] {
        self.layout.strides()
    }

    fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    fn len(&self) -> u64 {
        self.layout.len()
    }

    fn byte_size(&self) -> usize {
        self.data.len() * std::mem::size_of::<T>()
    }

    fn as_bytes(&self) -> Result<&[u8], DatagridError> {
        Ok(bytemuck::cast_slice(&self.data))
    }

    fn as_bytes_mut(&mut self) -> Result<&mut [u8], DatagridError> {
        Ok(bytemuck::cast_slice_mut(&mut self.data))
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn set_unit(&mut self, unit: &str) {
        self.unit = unit.to_string();
    }

    fn encode(&self) -> Result<ArrayPayload, DatagridError> {
        let mut payload = ArrayPayload::new(
            T::DTYPE.name(),
            self.layout.shape().to_vec(),
            typed_slice_to_bytes(&self.data),
        );
        payload.put_text_attr("unit", &self.unit);
        for (i, axis) in self.axes.iter().enumerate() {
            payload.put_text_attr(&codec::dim_key(i, "title"), &axis.title);
            payload.put_text_attr(&codec::dim_key(i, "units"), &axis.unit);
            payload.put_text_list_attr(&codec::dim_key(i, "names"), &axis.names);
            payload.put_data_attr(
                &codec::dim_key(i, "values"),
                T::DTYPE.name(),
                typed_slice_to_bytes(&axis.values),
            );
        }
        Ok(payload)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
