//! The dtype-erased capability handle over a concrete array.
//!
//! Callers that must hold or serialize arrays of mixed element types (a
//! decode dispatcher, a collection of datasets) hold a `Box<dyn ArrayData>`;
//! once the concrete type is known, `as_any` recovers typed access. The
//! handle never owns a second copy of the data: it is the same object seen
//! through a narrower contract.

use crate::error::DatagridError;
use crate::payload::ArrayPayload;
use crate::types::DataType;
use std::any::Any;
use std::fmt::Debug;

pub trait ArrayData: Debug {
    /// The element type tag.
    fn dtype(&self) -> DataType;

    /// Per-axis extents.
    fn shape(&self) -> &[u64];

    /// Derived row-major strides.
    fn strides(&self) -> &[u64];

    /// Number of axes.
    fn ndim(&self) -> usize;

    /// Total element count across all axes.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the element buffer in bytes.
    fn byte_size(&self) -> usize;

    /// Read-only view of the raw element buffer.
    ///
    /// Fails with `UnsupportedOperation` for string-element arrays, whose
    /// elements are not a fixed-width contiguous byte run.
    fn as_bytes(&self) -> Result<&[u8], DatagridError>;

    /// Mutable view of the raw element buffer; same text-element restriction.
    fn as_bytes_mut(&mut self) -> Result<&mut [u8], DatagridError>;

    /// Unit of the array's values as a whole (per-axis units live in the
    /// axis metadata of the concrete type).
    fn unit(&self) -> &str;

    fn set_unit(&mut self, unit: &str);

    /// Converts the array into its external representation, attaching the
    /// per-axis metadata as named side-channel fields.
    fn encode(&self) -> Result<ArrayPayload, DatagridError>;

    /// Downcasting support for recovering the concrete array type.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
