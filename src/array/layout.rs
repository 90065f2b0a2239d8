//! The pure, stateless core of the array container: a shape and its derived
//! row-major strides.
//!
//! Every concrete array type embeds a [`Layout`], so the shape/stride
//! invariants and the checked index arithmetic live in exactly one place.
//! Strides are never settable: they are recomputed from the shape at
//! construction and nowhere else.

use crate::error::DatagridError;

/// Checked multi-index access supports at most this many axes.
pub const MAX_INDEX_DIMS: usize = 10;

/// A fixed shape and its derived strides, row-major (C-order): the last axis
/// is contiguous with stride 1, and `stride[i] = stride[i+1] * shape[i+1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Vec<u64>,
    strides: Vec<u64>,
}

impl Layout {
    /// Builds a layout from a shape.
    ///
    /// The shape must be non-empty with strictly positive extents, and its
    /// product must fit in `u64`; anything else fails with `InvalidShape`.
    pub fn new(shape: Vec<u64>) -> Result<Self, DatagridError> {
        if shape.is_empty() {
            return Err(DatagridError::InvalidShape {
                shape,
                reason: "shape must have at least one dimension".into(),
            });
        }
        let mut count: u64 = 1;
        for &extent in &shape {
            if extent == 0 {
                return Err(DatagridError::InvalidShape {
                    shape: shape.clone(),
                    reason: "zero-length dimension".into(),
                });
            }
            count = match count.checked_mul(extent) {
                Some(c) => c,
                None => {
                    return Err(DatagridError::InvalidShape {
                        shape: shape.clone(),
                        reason: "element count overflows u64".into(),
                    })
                }
            };
        }

        let ndim = shape.len();
        let mut strides = vec![1u64; ndim];
        for i in (0..ndim - 1).rev() {
            strides[i] = strides[i + 1] * shape[i + 1];
        }

        Ok(Self { shape, strides })
    }

    pub fn shape(&self) -> &[u64] {
        &self.shape
    }

    pub fn strides(&self) -> &[u64] {
        &self.strides
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total element count (product of the shape).
    pub fn len(&self) -> u64 {
        // stride[0] * shape[0] is the product of all extents.
        self.strides[0] * self.shape[0]
    }

    /// Computes the flat buffer offset for a checked multi-index.
    ///
    /// Every supplied axis is validated before any offset contribution is
    /// computed, so the first detected violation determines the failure and
    /// no garbled partial offset can escape. Fails with `OutOfBounds` when
    /// the dimensionality exceeds [`MAX_INDEX_DIMS`], when the number of
    /// indices does not match the dimensionality, or when any index is
    /// negative or reaches its axis's extent.
    pub fn offset(&self, index: &[i64]) -> Result<usize, DatagridError> {
        if self.ndim() > MAX_INDEX_DIMS {
            return Err(DatagridError::OutOfBounds(format!(
                "checked access supports at most {} dimensions, array has {}",
                MAX_INDEX_DIMS,
                self.ndim()
            )));
        }
        if index.len() != self.ndim() {
            return Err(DatagridError::OutOfBounds(format!(
                "{} indices supplied for a {}-dimensional array",
                index.len(),
                self.ndim()
            )));
        }
        for (axis, (&i, &extent)) in index.iter().zip(&self.shape).enumerate() {
            if i < 0 || i as u64 >= extent {
                return Err(DatagridError::OutOfBounds(format!(
                    "index {} is out of range for axis {} with extent {}",
                    i, axis, extent
                )));
            }
        }

        let mut offset = 0u64;
        for (&i, &stride) in index.iter().zip(&self.strides) {
            offset += i as u64 * stride;
        }
        Ok(offset as usize)
    }

    /// Unchecked 2-D offset: `row * stride[0] + col`. Assumes two dimensions;
    /// no bounds handling beyond what the underlying buffer enforces.
    pub fn offset_2d(&self, row: usize, col: usize) -> usize {
        row * self.strides[0] as usize + col
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
