//! The boolean array container.
//!
//! Boolean arrays are a distinct concrete representation, not an
//! instantiation of the generic numeric template: the external form is
//! bit-packed (one bit per element), which cannot expose element references,
//! and `bool` does not satisfy the `Pod` contract the generic byte views
//! rely on. Internally elements are widened to one byte each (0 or 1), so
//! raw byte views work like any other fixed-width array.

use crate::array::axis::AxisMeta;
use crate::array::codec;
use crate::array::handle::ArrayData;
use crate::array::layout::Layout;
use crate::error::DatagridError;
use crate::payload::ArrayPayload;
use crate::types::DataType;
use bitvec::prelude::*;
use std::any::Any;

/// A dense N-dimensional array of booleans, one byte per element in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolArray {
    layout: Layout,
    data: Vec<u8>,
    axes: Vec<AxisMeta<bool>>,
    unit: String,
}

impl BoolArray {
    /// Creates an all-false array of the given shape.
    pub fn new(shape: &[u64]) -> Result<Self, DatagridError> {
        let layout = Layout::new(shape.to_vec())?;
        let data = vec![0u8; layout.len() as usize];
        Ok(Self::assemble(layout, data))
    }

    /// Takes ownership of a flat element vector.
    pub fn from_vec(shape: &[u64], values: Vec<bool>) -> Result<Self, DatagridError> {
        let layout = Layout::new(shape.to_vec())?;
        if values.len() as u64 != layout.len() {
            return Err(DatagridError::SizeMismatch {
                shape: shape.to_vec(),
                expected: layout.len(),
                actual: values.len() as u64,
            });
        }
        let data = values.into_iter().map(u8::from).collect();
        Ok(Self::assemble(layout, data))
    }

    pub fn from_slice(shape: &[u64], values: &[bool]) -> Result<Self, DatagridError> {
        Self::from_vec(shape, values.to_vec())
    }

    fn assemble(layout: Layout, data: Vec<u8>) -> Self {
        let axes = vec![AxisMeta::default(); layout.ndim()];
        Self {
            layout,
            data,
            axes,
            unit: String::new(),
        }
    }

    /// Checked multi-index read.
    pub fn get(&self, index: &[i64]) -> Result<bool, DatagridError> {
        Ok(self.data[self.layout.offset(index)?] != 0)
    }

    /// Checked multi-index write.
    pub fn set(&mut self, index: &[i64], value: bool) -> Result<(), DatagridError> {
        let offset = self.layout.offset(index)?;
        self.data[offset] = u8::from(value);
        Ok(())
    }

    /// Unchecked flat read.
    pub fn value(&self, index: usize) -> bool {
        self.data[index] != 0
    }

    /// Unchecked flat write.
    pub fn set_value(&mut self, index: usize, value: bool) {
        self.data[index] = u8::from(value);
    }

    /// The flattened elements as booleans.
    pub fn to_vec(&self) -> Vec<bool> {
        self.data.iter().map(|&b| b != 0).collect()
    }

    pub fn axis(&self, axis: usize) -> Result<&AxisMeta<bool>, DatagridError> {
        self.axes.get(axis).ok_or_else(|| {
            DatagridError::OutOfBounds(format!(
                "axis {} out of range for a {}-dimensional array",
                axis,
                self.axes.len()
            ))
        })
    }

    pub fn axis_mut(&mut self, axis: usize) -> Result<&mut AxisMeta<bool>, DatagridError> {
        let ndim = self.axes.len();
        self.axes.get_mut(axis).ok_or_else(|| {
            DatagridError::OutOfBounds(format!(
                "axis {} out of range for a {}-dimensional array",
                axis, ndim
            ))
        })
    }

    /// Reconstructs a boolean array from its bit-packed external form.
    pub fn decode(payload: &ArrayPayload) -> Result<Self, DatagridError> {
        let dtype = DataType::parse(&payload.dtype)?;
        if dtype != DataType::Bool {
            return Err(DatagridError::PayloadFormat(format!(
                "payload carries `{}` elements, `bool` was requested",
                dtype
            )));
        }
        let layout = Layout::new(payload.shape.clone())?;
        let data = unpack_bits(&payload.data, layout.len(), layout.shape())?;

        let mut array = Self::assemble(layout, data);
        array.unit = codec::get_text_attr(&payload.attrs, "unit")?;
        for i in 0..array.axes.len() {
            let axis = &mut array.axes[i];
            axis.title = codec::get_text_attr(&payload.attrs, &codec::dim_key(i, "title"))?;
            axis.unit = codec::get_text_attr(&payload.attrs, &codec::dim_key(i, "units"))?;
            axis.names = codec::get_text_list_attr(&payload.attrs, &codec::dim_key(i, "names"))?;
        }
        Ok(array)
    }
}

/// Widens a bit-packed buffer (least-significant bit first) into one byte
/// per element. The packed length must be exactly `ceil(count / 8)` bytes.
fn unpack_bits(packed: &[u8], count: u64, shape: &[u64]) -> Result<Vec<u8>, DatagridError> {
    let expected_bytes = ((count + 7) / 8) as usize;
    if packed.len() != expected_bytes {
        return Err(DatagridError::SizeMismatch {
            shape: shape.to_vec(),
            expected: expected_bytes as u64,
            actual: packed.len() as u64,
        });
    }
    let bits = packed.view_bits::<Lsb0>();
    Ok(bits[..count as usize].iter().by_vals().map(u8::from).collect())
}

/// Packs one-byte elements into the bit-per-element external form.
fn pack_bits(widened: &[u8]) -> Vec<u8> {
    let mut bits = BitVec::<u8, Lsb0>::with_capacity(widened.len());
    for &b in widened {
        bits.push(b != 0);
    }
    bits.into_vec()
}

impl ArrayData for BoolArray {
    fn dtype(&self) -> DataType {
        DataType::Bool
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
        self.data.len()
    }

    /// The widened (one byte per element) buffer, each byte 0 or 1.
    fn as_bytes(&self) -> Result<&[u8], DatagridError> {
        Ok(&self.data)
    }

    fn as_bytes_mut(&mut self) -> Result<&mut [u8], DatagridError> {
        Ok(&mut self.data)
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn set_unit(&mut self, unit: &str) {
        self.unit = unit.to_string();
    }

    fn encode(&self) -> Result<ArrayPayload, DatagridError> {
        let mut payload = ArrayPayload::new(
            DataType::Bool.name(),
            self.layout.shape().to_vec(),
            pack_bits(&self.data),
        );
        payload.put_text_attr("unit", &self.unit);
        for (i, axis) in self.axes.iter().enumerate() {
            payload.put_text_attr(&codec::dim_key(i, "title"), &axis.title);
            payload.put_text_attr(&codec::dim_key(i, "units"), &axis.unit);
            payload.put_text_list_attr(&codec::dim_key(i, "names"), &axis.names);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_is_one_byte_per_element() {
        let array = BoolArray::from_vec(&[3], vec![true, false, true]).unwrap();
        assert_eq!(array.as_bytes().unwrap(), &[1, 0, 1]);
        assert_eq!(array.byte_size(), 3);
    }

    #[test]
    fn test_checked_access() {
        let mut array = BoolArray::new(&[2, 2]).unwrap();
        array.set(&[1, 0], true).unwrap();
        assert!(array.get(&[1, 0]).unwrap());
        assert!(!array.get(&[0, 0]).unwrap());
        assert!(matches!(
            array.get(&[2, 0]),
            Err(DatagridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_bit_packing_roundtrip_non_multiple_of_eight() {
        // 11 elements force a partial trailing byte.
        let values: Vec<bool> = (0..11).map(|i| i % 3 == 0).collect();
        let array = BoolArray::from_vec(&[11], values.clone()).unwrap();
        let payload = array.encode().unwrap();
        assert_eq!(payload.data.len(), 2);

        let back = BoolArray::decode(&payload).unwrap();
        assert_eq!(back.to_vec(), values);
        assert_eq!(back.shape(), array.shape());
    }

    #[test]
    fn test_decode_rejects_wrong_packed_length() {
        let array = BoolArray::from_vec(&[9], vec![true; 9]).unwrap();
        let mut payload = array.encode().unwrap();
        payload.data.push(0);
        assert!(matches!(
            BoolArray::decode(&payload),
            Err(DatagridError::SizeMismatch { .. })
        ));
    }
}
