//! Error and result types for bulk split operations.

use thiserror::Error;

use crate::spatial_object::SpatialId;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while partitioning spatial objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// A caller supplied an argument outside the operation's contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An object does not share the dimensionality of the rest of the input.
    #[error("Dimension mismatch for object {id}: expected {expected} dimensions, found {found}")]
    DimensionMismatch {
        id: SpatialId,
        expected: usize,
        found: usize,
    },
}

impl SpatialError {
    /// Shorthand for [`SpatialError::InvalidArgument`].
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        SpatialError::InvalidArgument(msg.into())
    }
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;
