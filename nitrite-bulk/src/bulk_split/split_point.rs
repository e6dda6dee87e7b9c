//! Fanout-safe choice of the next partition size.

use crate::errors::{SpatialError, SpatialResult};

/// Computes how many of the remaining `num_entries` objects go into the next
/// partition.
///
/// - everything, when the rest fits into one partition;
/// - `num_entries - min_entries`, when a full partition would leave fewer
///   than `min_entries` behind;
/// - `max_entries` otherwise.
///
/// The last partition is therefore never smaller than `min_entries`.
///
/// # Errors
/// Returns `InvalidArgument` if `num_entries < min_entries`.
pub fn choose_bulk_split_point(
    num_entries: usize,
    min_entries: usize,
    max_entries: usize,
) -> SpatialResult<usize> {
    if num_entries < min_entries {
        return Err(SpatialError::invalid_argument(format!(
            "num_entries < min_entries ({} < {})",
            num_entries, min_entries
        )));
    }

    if num_entries <= max_entries {
        Ok(num_entries)
    } else if num_entries < max_entries + min_entries {
        Ok(num_entries - min_entries)
    } else {
        Ok(max_entries)
    }
}

/// Validates a pair of fanout bounds.
///
/// A zero bound would let the split loop stall, and `min > max` cannot be
/// satisfied by any partition.
pub fn check_fanout(min_entries: usize, max_entries: usize) -> SpatialResult<()> {
    if min_entries == 0 {
        return Err(SpatialError::invalid_argument("min_entries must be positive"));
    }
    if min_entries > max_entries {
        return Err(SpatialError::invalid_argument(format!(
            "min_entries > max_entries ({} > {})",
            min_entries, max_entries
        )));
    }
    Ok(())
}
