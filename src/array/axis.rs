//! Per-axis descriptive metadata.
//!
//! Each array carries one `AxisMeta` per dimension, sized to the
//! dimensionality at construction with every entry starting unset. This makes
//! it statically obvious which axes carry metadata, instead of a list that
//! silently grows on first write.

use crate::types::Scalar;

/// Optional annotation for one axis: a title, coordinate ("tick") values of
/// the array's element type, display names for those ticks, and a unit.
///
/// Tick counts are advisory and are not validated against the axis extent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisMeta<T: Scalar> {
    pub title: String,
    pub unit: String,
    pub values: Vec<T>,
    pub names: Vec<String>,
}

impl<T: Scalar> AxisMeta<T> {
    /// True when no field has been set.
    pub fn is_unset(&self) -> bool {
        self.title.is_empty() && self.unit.is_empty() && self.values.is_empty() && self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axis_is_unset() {
        let axis = AxisMeta::<f64>::default();
        assert!(axis.is_unset());
    }

    #[test]
    fn test_any_field_marks_the_axis_set() {
        let mut axis = AxisMeta::<i32>::default();
        axis.values = vec![10, 20];
        assert!(!axis.is_unset());
    }
}
