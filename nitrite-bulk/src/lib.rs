//! # Nitrite Bulk - Bulk-Load Partitioning for Nitrite R-Trees
//!
//! This crate divides a complete, already-known set of spatial objects into
//! groups that respect an R-Tree's minimum and maximum fanout while keeping
//! nearby objects together. Each group is meant to become one tree node; the
//! tree builder repeats the split on the node summaries until a single root
//! is left.
//!
//! ## Features
//!
//! - **Maximal Extension**: sort on the most spread-out axis, re-evaluated for
//!   every partition
//! - **Z-Curve**: one global sort along a Z-order space-filling curve
//! - **Fanout Safe**: the last partition is never starved below the minimum
//! - **N-Dimensional**: any dimensionality, checked to be uniform per call
//! - **Zero Copy**: partitions hold references into the caller's slice
//! - **Traceable**: optional callback receives a structured event per step
//!
//! ## Quick Start
//!
//! ```rust
//! use nitrite_bulk::{partition, BoundingBox, BulkStrategy, SpatialEntry, SpatialResult};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let entries: Vec<SpatialEntry> = (0..100)
//!     .map(|i| -> SpatialResult<SpatialEntry> {
//!         let x = (i % 10) as f64;
//!         let y = (i / 10) as f64;
//!         let bbox = BoundingBox::new(vec![x, y], vec![x + 1.0, y + 1.0])?;
//!         Ok(SpatialEntry::new(i, bbox))
//!     })
//!     .collect::<SpatialResult<_>>()?;
//!
//! let leaves = partition(&entries, 4, 10, BulkStrategy::ZCurve)?;
//! assert_eq!(leaves.len(), 10);
//!
//! // Summaries for the next tree level
//! let summaries: Vec<BoundingBox> = leaves
//!     .iter()
//!     .map(|leaf| BoundingBox::enclosing(leaf))
//!     .collect::<Result<Option<Vec<_>>, _>>()?
//!     .unwrap_or_default();
//! assert_eq!(summaries.len(), 10);
//! # Ok(())
//! # }
//! ```

pub mod bounding_box;
pub mod bulk_split;
pub mod config;
pub mod errors;
pub mod spatial_object;
pub mod zcurve;

pub use bounding_box::{BoundingBox, SpatialEntry};
pub use bulk_split::{
    partition, partition_by_name, partition_traced, BulkSplit, BulkStrategy, Partition,
    SplitTrace,
};
pub use config::{BulkSplitBuilder, BulkSplitConfig};
pub use errors::{SpatialError, SpatialResult};
pub use spatial_object::{SpatialId, SpatialObject};
pub use zcurve::ZValue;
