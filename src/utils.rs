//! Shared byte/typed-slice conversion helpers.
//!
//! All casts between element buffers and raw bytes go through this module so
//! that alignment and length checking live in exactly one place. Relies on
//! `bytemuck` for safety; panic-free.

use crate::error::DatagridError;
use bytemuck::Pod;

/// Copies a typed slice into a fresh byte vector.
pub fn typed_slice_to_bytes<T: Pod>(values: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(values).to_vec()
}

/// Copies a byte slice into a fresh typed vector.
///
/// The source need not be aligned for `T` (byte buffers from a payload never
/// are), but its length must be an exact multiple of `size_of::<T>()`.
pub fn safe_bytes_to_typed_vec<T: Pod>(bytes: &[u8]) -> Result<Vec<T>, DatagridError> {
    let width = std::mem::size_of::<T>();
    if width == 0 || bytes.len() % width != 0 {
        return Err(DatagridError::PodCast(format!(
            "byte buffer of length {} is not a whole number of {}-byte elements",
            bytes.len(),
            width
        )));
    }
    Ok(bytemuck::pod_collect_to_vec(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_bytes_roundtrip_u32() {
        let original: Vec<u32> = vec![1, 2, 0xDEADBEEF];
        let bytes = typed_slice_to_bytes(&original);
        assert_eq!(bytes.len(), 12);
        let back: Vec<u32> = safe_bytes_to_typed_vec(&bytes).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_unaligned_source_is_copied_not_cast() {
        // Slicing one byte in guarantees a misaligned source for u64.
        let bytes = typed_slice_to_bytes(&[1u64, 2, 3]);
        let mut shifted = vec![0u8];
        shifted.extend_from_slice(&bytes);
        let back: Vec<u64> = safe_bytes_to_typed_vec(&shifted[1..]).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn test_ragged_length_is_rejected() {
        let bytes = vec![1u8, 2, 3, 4, 5, 6, 7];
        let result = safe_bytes_to_typed_vec::<u32>(&bytes);
        assert!(matches!(result, Err(DatagridError::PodCast(_))));
    }
}
