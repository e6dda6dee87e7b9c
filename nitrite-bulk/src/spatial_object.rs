//! The capability set every bulk-loadable object provides.

use crate::errors::{SpatialError, SpatialResult};

/// Stable identifier of a spatial object (64-bit, same width as Nitrite ids)
pub type SpatialId = u64;

/// An object with an identity and an axis-aligned extent in `dimensionality()`
/// dimensions.
///
/// Axes are zero-based: `min(0)`/`max(0)` describe the first axis. The bulk
/// split algorithms only read these values and never keep the object past
/// the call that was handed it.
///
/// # Examples
///
/// ```rust
/// use nitrite_bulk::{BoundingBox, SpatialEntry, SpatialObject};
///
/// let entry = SpatialEntry::new(1, BoundingBox::new(vec![0.0, 1.0], vec![2.0, 3.0]).unwrap());
/// assert_eq!(entry.dimensionality(), 2);
/// assert_eq!(entry.min(1), 1.0);
/// assert_eq!(entry.max(0), 2.0);
/// ```
pub trait SpatialObject {
    /// Returns the identifier of this object.
    fn id(&self) -> SpatialId;

    /// Returns the number of axes of this object.
    fn dimensionality(&self) -> usize;

    /// Returns the lower bound on `axis`.
    fn min(&self, axis: usize) -> f64;

    /// Returns the upper bound on `axis`.
    fn max(&self, axis: usize) -> f64;
}

impl<T: SpatialObject + ?Sized> SpatialObject for &T {
    #[inline]
    fn id(&self) -> SpatialId {
        (**self).id()
    }

    #[inline]
    fn dimensionality(&self) -> usize {
        (**self).dimensionality()
    }

    #[inline]
    fn min(&self, axis: usize) -> f64 {
        (**self).min(axis)
    }

    #[inline]
    fn max(&self, axis: usize) -> f64 {
        (**self).max(axis)
    }
}

/// Checks that every object shares the dimensionality of the first one.
///
/// Returns the common dimensionality, or `None` for an empty input.
pub fn uniform_dimensionality<O: SpatialObject>(objects: &[O]) -> SpatialResult<Option<usize>> {
    let Some(first) = objects.first() else {
        return Ok(None);
    };

    let expected = first.dimensionality();
    if expected == 0 {
        return Err(SpatialError::invalid_argument(format!(
            "object {} has no dimensions",
            first.id()
        )));
    }

    for object in &objects[1..] {
        let found = object.dimensionality();
        if found != expected {
            return Err(SpatialError::DimensionMismatch {
                id: object.id(),
                expected,
                found,
            });
        }
    }

    Ok(Some(expected))
}

/// Collects the lower-left corner of an object.
pub(crate) fn lower_corner<O: SpatialObject>(object: &O) -> Vec<f64> {
    (0..object.dimensionality()).map(|axis| object.min(axis)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding_box::{BoundingBox, SpatialEntry};

    fn entry(id: SpatialId, min: Vec<f64>, max: Vec<f64>) -> SpatialEntry {
        SpatialEntry::new(id, BoundingBox::new(min, max).unwrap())
    }

    #[test]
    fn test_uniform_dimensionality_empty() {
        let objects: Vec<SpatialEntry> = vec![];
        assert_eq!(uniform_dimensionality(&objects).unwrap(), None);
    }

    #[test]
    fn test_uniform_dimensionality_ok() {
        let objects = vec![
            entry(1, vec![0.0, 0.0], vec![1.0, 1.0]),
            entry(2, vec![2.0, 2.0], vec![3.0, 3.0]),
        ];
        assert_eq!(uniform_dimensionality(&objects).unwrap(), Some(2));
    }

    #[test]
    fn test_uniform_dimensionality_mismatch() {
        let objects = vec![
            entry(1, vec![0.0, 0.0], vec![1.0, 1.0]),
            entry(2, vec![2.0, 2.0, 2.0], vec![3.0, 3.0, 3.0]),
        ];
        let err = uniform_dimensionality(&objects).unwrap_err();
        assert_eq!(
            err,
            SpatialError::DimensionMismatch {
                id: 2,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_reference_delegates() {
        let e = entry(9, vec![1.0, 2.0], vec![3.0, 4.0]);
        let r = &e;
        assert_eq!(SpatialObject::id(&r), 9);
        assert_eq!(SpatialObject::dimensionality(&r), 2);
        assert_eq!(SpatialObject::min(&r, 1), 2.0);
        assert_eq!(SpatialObject::max(&r, 0), 3.0);
    }

    #[test]
    fn test_lower_corner() {
        let e = entry(1, vec![-1.0, 5.0, 2.0], vec![0.0, 6.0, 9.0]);
        assert_eq!(lower_corner(&e), vec![-1.0, 5.0, 2.0]);
    }
}
