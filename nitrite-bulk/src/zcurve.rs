//! Z-order (Morton) curve utilities for spatial locality.
//!
//! The Z-curve maps an n-dimensional point to a single key by interleaving
//! the bits of its coordinates. Sorting keys lexicographically visits space
//! quadrant by quadrant, so points that are close together mostly end up
//! close together in key order. The Z-curve bulk split relies on this to
//! group nearby objects into the same partition.
//!
//! ## Key Layout
//! Every coordinate is mapped to a `u64` whose unsigned order matches
//! `f64::total_cmp`, so no two distinct coordinates share a word. The key
//! holds 64 bit planes, most significant first; inside a plane axis 0 comes
//! first. A `d`-dimensional key is therefore `8 * d` bytes long.

use crate::bounding_box::BoundingBox;
use crate::errors::{SpatialError, SpatialResult};

/// Number of bits each axis contributes to a key
pub const BITS_PER_AXIS: usize = u64::BITS as usize;

/// A Z-order key. Compare with the derived lexicographic `Ord`.
pub type ZValue = Vec<u8>;

/// Interleaves the bits of one word per axis into a Z-order key.
///
/// # Example
/// ```
/// use nitrite_bulk::zcurve::interleave_bits;
///
/// let key = interleave_bits(&[u64::MAX, 0]);
/// assert_eq!(key, vec![0xAA; 16]);
/// ```
pub fn interleave_bits(words: &[u64]) -> ZValue {
    let mut key = vec![0u8; words.len() * BITS_PER_AXIS / 8];
    let mut pos = 0usize;

    for bit in (0..BITS_PER_AXIS).rev() {
        for word in words {
            if (word >> bit) & 1 == 1 {
                key[pos / 8] |= 0x80 >> (pos % 8);
            }
            pos += 1;
        }
    }

    key
}

/// Computes Z-order keys for a set of points.
///
/// With one dimension the keys sort exactly like the coordinates under
/// `f64::total_cmp`.
///
/// # Errors
/// Returns `InvalidArgument` if the points differ in dimensionality (the
/// message names the offending point's index) or are zero-dimensional.
pub fn zvalues(points: &[Vec<f64>]) -> SpatialResult<Vec<ZValue>> {
    let Some(first) = points.first() else {
        return Ok(Vec::new());
    };

    let dim = first.len();
    if dim == 0 {
        return Err(SpatialError::invalid_argument(
            "cannot compute a z-value for a zero-dimensional point",
        ));
    }

    let mismatch = points.iter().enumerate().find(|(_, p)| p.len() != dim);
    if let Some((index, point)) = mismatch {
        return Err(SpatialError::invalid_argument(format!(
            "point {} has {} dimensions, expected {}",
            index,
            point.len(),
            dim
        )));
    }

    Ok(points
        .iter()
        .map(|point| {
            let words: Vec<u64> = point.iter().map(|v| order_preserving_bits(*v)).collect();
            interleave_bits(&words)
        })
        .collect())
}

/// Computes the Z-order key of a single point against a reference box.
///
/// Coordinates outside `bounds` are clamped to its faces.
pub fn zvalue_bounded(point: &[f64], bounds: &BoundingBox) -> SpatialResult<ZValue> {
    if point.len() != bounds.dimensionality() {
        return Err(SpatialError::invalid_argument(format!(
            "point has {} dimensions but bounds have {}",
            point.len(),
            bounds.dimensionality()
        )));
    }

    let words: Vec<u64> = point
        .iter()
        .enumerate()
        .map(|(d, v)| order_preserving_bits(v.clamp(bounds.min(d), bounds.max(d))))
        .collect();
    Ok(interleave_bits(&words))
}

/// Maps `value` onto a `u64` whose unsigned order is `f64::total_cmp` order.
///
/// Negative values have every bit flipped, non-negative values only the sign
/// bit, which lines both halves up below and above `1 << 63`.
fn order_preserving_bits(value: f64) -> u64 {
    let bits = value.to_bits();
    if bits >> 63 == 1 {
        !bits
    } else {
        bits | 1 << 63
    }
}
