use std::hash::Hash;

use crate::errors::{SpatialError, SpatialResult};
use crate::spatial_object::{uniform_dimensionality, SpatialId, SpatialObject};

/// An n-dimensional axis-aligned bounding box.
///
/// `BoundingBox` stores one lower and one upper coordinate per axis. It is
/// the extent of a [`SpatialEntry`] and the summary a tree builder computes
/// for each partition returned by the bulk split.
///
/// # Examples
///
/// ```rust
/// use nitrite_bulk::BoundingBox;
///
/// let bbox = BoundingBox::new(vec![0.0, 0.0], vec![100.0, 50.0]).unwrap();
/// assert_eq!(bbox.dimensionality(), 2);
/// assert_eq!(bbox.extent(0), 100.0);
/// assert!(bbox.contains_point(&[50.0, 25.0]));
/// ```
#[derive(Clone, PartialEq, Debug, serde::Deserialize, serde::Serialize)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl Eq for BoundingBox {}

impl Hash for BoundingBox {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for v in self.min.iter().chain(self.max.iter()) {
            // -0.0 == 0.0, so both must hash alike
            let v = if *v == 0.0 { 0.0f64 } else { *v };
            v.to_bits().hash(state);
        }
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingBox[{:?}, {:?}]", self.min, self.max)
    }
}

impl BoundingBox {
    /// Creates a new bounding box from its lower and upper corners.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the corners are empty, have different
    /// lengths, or `min[d] > max[d]` on some axis (NaN counts as invalid).
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> SpatialResult<BoundingBox> {
        if min.is_empty() {
            return Err(SpatialError::invalid_argument(
                "bounding box needs at least one dimension",
            ));
        }
        if min.len() != max.len() {
            return Err(SpatialError::invalid_argument(format!(
                "bounding box corners differ in length ({} vs {})",
                min.len(),
                max.len()
            )));
        }
        let invalid = |d: &usize| min[*d].is_nan() || max[*d].is_nan() || min[*d] > max[*d];
        if let Some(axis) = (0..min.len()).find(invalid) {
            return Err(SpatialError::invalid_argument(format!(
                "bounding box min > max on axis {}",
                axis
            )));
        }
        Ok(BoundingBox { min, max })
    }

    /// Creates a degenerate bounding box covering a single point.
    pub fn point(coords: Vec<f64>) -> SpatialResult<BoundingBox> {
        Self::new(coords.clone(), coords)
    }

    /// Computes the minimum bounding box of a set of spatial objects.
    ///
    /// Returns `Ok(None)` for an empty set. This is a single pass taking the
    /// per-axis minimum of lower bounds and maximum of upper bounds.
    pub fn enclosing<O: SpatialObject>(objects: &[O]) -> SpatialResult<Option<BoundingBox>> {
        let Some(dim) = uniform_dimensionality(objects)? else {
            return Ok(None);
        };

        let mut min = vec![f64::INFINITY; dim];
        let mut max = vec![f64::NEG_INFINITY; dim];
        for object in objects {
            for d in 0..dim {
                min[d] = min[d].min(object.min(d));
                max[d] = max[d].max(object.max(d));
            }
        }

        Ok(Some(BoundingBox { min, max }))
    }

    /// Returns the number of axes.
    pub fn dimensionality(&self) -> usize {
        self.min.len()
    }

    /// Returns the lower bound on `axis`.
    pub fn min(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    /// Returns the upper bound on `axis`.
    pub fn max(&self, axis: usize) -> f64 {
        self.max[axis]
    }

    /// Returns the lower corner.
    pub fn min_coords(&self) -> &[f64] {
        &self.min
    }

    /// Returns the upper corner.
    pub fn max_coords(&self) -> &[f64] {
        &self.max
    }

    /// Returns `max - min` on `axis`.
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    /// Returns the product of all extents.
    pub fn volume(&self) -> f64 {
        (0..self.dimensionality()).map(|d| self.extent(d)).product()
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Vec<f64> {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| (lo + hi) / 2.0)
            .collect()
    }

    /// Returns the axis with the largest extent.
    ///
    /// A later axis only wins if its extent is strictly larger, so ties go to
    /// the lowest axis index. A box with no extent at all returns axis 0.
    pub fn max_extension_axis(&self) -> usize {
        let mut split_axis = 0;
        let mut max_extent = self.extent(0);
        for d in 1..self.dimensionality() {
            let extent = self.extent(d);
            if max_extent < extent {
                max_extent = extent;
                split_axis = d;
            }
        }
        split_axis
    }

    /// Checks if this bounding box contains a point.
    pub fn contains_point(&self, point: &[f64]) -> bool {
        point.len() == self.dimensionality()
            && point
                .iter()
                .enumerate()
                .all(|(d, v)| *v >= self.min[d] && *v <= self.max[d])
    }

    /// Checks if this bounding box contains another bounding box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.dimensionality() == other.dimensionality()
            && (0..self.dimensionality())
                .all(|d| other.min[d] >= self.min[d] && other.max[d] <= self.max[d])
    }

    /// Checks if this bounding box intersects another bounding box.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.dimensionality() == other.dimensionality()
            && (0..self.dimensionality())
                .all(|d| self.min[d] <= other.max[d] && self.max[d] >= other.min[d])
    }

    /// Returns the union of this bounding box with another.
    pub fn union(&self, other: &BoundingBox) -> SpatialResult<BoundingBox> {
        let mut result = self.clone();
        result.expand(other)?;
        Ok(result)
    }

    /// Grows this bounding box to cover `other`.
    pub fn expand(&mut self, other: &BoundingBox) -> SpatialResult<()> {
        if self.dimensionality() != other.dimensionality() {
            return Err(SpatialError::invalid_argument(format!(
                "cannot combine {}-d and {}-d bounding boxes",
                self.dimensionality(),
                other.dimensionality()
            )));
        }
        for d in 0..self.dimensionality() {
            self.min[d] = self.min[d].min(other.min[d]);
            self.max[d] = self.max[d].max(other.max[d]);
        }
        Ok(())
    }

    /// Checks if this bounding box is a point (zero extent on every axis).
    pub fn is_point(&self) -> bool {
        self.min == self.max
    }
}

/// An identified bounding box, the default [`SpatialObject`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct SpatialEntry {
    pub id: SpatialId,
    pub bbox: BoundingBox,
}

impl SpatialEntry {
    pub fn new(id: SpatialId, bbox: BoundingBox) -> Self {
        Self { id, bbox }
    }

    /// Creates an entry for a single point.
    pub fn point(id: SpatialId, coords: Vec<f64>) -> SpatialResult<Self> {
        Ok(Self::new(id, BoundingBox::point(coords)?))
    }
}

impl SpatialObject for SpatialEntry {
    #[inline]
    fn id(&self) -> SpatialId {
        self.id
    }

    #[inline]
    fn dimensionality(&self) -> usize {
        self.bbox.dimensionality()
    }

    #[inline]
    fn min(&self, axis: usize) -> f64 {
        self.bbox.min(axis)
    }

    #[inline]
    fn max(&self, axis: usize) -> f64 {
        self.bbox.max(axis)
    }
}
