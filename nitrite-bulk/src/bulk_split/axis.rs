//! Ordering of spatial objects along a single axis.

use std::cmp::Ordering;

use crate::spatial_object::SpatialObject;

/// Which bound of an object's extent a [`SpatialComparator`] looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBound {
    Min,
    Max,
}

/// Orders spatial objects ascending by one bound on one axis.
///
/// Values are compared with [`f64::total_cmp`], so NaN bounds sort after
/// every number instead of breaking the sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpatialComparator {
    axis: usize,
    bound: AxisBound,
}

impl SpatialComparator {
    pub fn new(axis: usize, bound: AxisBound) -> Self {
        Self { axis, bound }
    }

    /// Comparator on the lower bound of `axis`, the one bulk splitting uses.
    pub fn by_min(axis: usize) -> Self {
        Self::new(axis, AxisBound::Min)
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn bound(&self) -> AxisBound {
        self.bound
    }

    #[inline]
    fn value<O: SpatialObject>(&self, object: &O) -> f64 {
        match self.bound {
            AxisBound::Min => object.min(self.axis),
            AxisBound::Max => object.max(self.axis),
        }
    }

    pub fn compare<O: SpatialObject>(&self, a: &O, b: &O) -> Ordering {
        self.value(a).total_cmp(&self.value(b))
    }

    /// Stable sort: objects with equal bounds keep their relative order.
    pub fn sort<O: SpatialObject>(&self, objects: &mut [O]) {
        objects.sort_by(|a, b| self.compare(a, b));
    }
}
