//! Bulk split along the axis of maximal extension.
//!
//! Every round looks at the objects that are still unassigned, picks the
//! axis on which they spread the most, sorts them on that axis and cuts the
//! next partition from the front. The axis can change from round to round
//! because the remaining set shrinks.

use super::axis::SpatialComparator;
use super::split_point::choose_bulk_split_point;
use super::trace::{SplitTrace, Tracer};
use super::{BulkStrategy, Partition};
use crate::bounding_box::BoundingBox;
use crate::errors::SpatialResult;
use crate::spatial_object::SpatialObject;

/// Partitions `objects` using the maximal extension strategy.
pub(crate) fn maximal_extension_partition<'a, O: SpatialObject>(
    objects: &'a [O],
    min_entries: usize,
    max_entries: usize,
    tracer: &mut Tracer<'_>,
) -> SpatialResult<Vec<Partition<'a, O>>> {
    let mut buffer: Vec<&'a O> = objects.iter().collect();
    let mut partitions = Vec::new();
    let mut cursor = 0;

    while cursor < buffer.len() {
        let remaining = &mut buffer[cursor..];
        let split_axis = choose_maximal_extended_split_axis(remaining)?;
        let split_point = choose_bulk_split_point(remaining.len(), min_entries, max_entries)?;

        SpatialComparator::by_min(split_axis).sort(remaining);

        let partition = remaining[..split_point].to_vec();
        cursor += split_point;

        log::trace!(
            "max extension round {}: axis {}, split point {}, {} objects left",
            partitions.len(),
            split_axis,
            split_point,
            buffer.len() - cursor
        );
        tracer.emit(|| SplitTrace::Round {
            round: partitions.len(),
            axis: Some(split_axis),
            split_point,
            remaining: buffer.len() - cursor,
            ids: partition.iter().map(|o| o.id()).collect(),
        });

        partitions.push(partition);
    }

    tracer.emit(|| SplitTrace::Finished {
        strategy: BulkStrategy::MaxExtension,
        partitions: partitions.len(),
    });
    Ok(partitions)
}

/// Returns the axis on which `objects` have the largest extent.
///
/// The extent of an axis is the maximum upper bound minus the minimum lower
/// bound over all objects. Ties go to the lowest axis.
pub(crate) fn choose_maximal_extended_split_axis<O: SpatialObject>(
    objects: &[O],
) -> SpatialResult<usize> {
    Ok(BoundingBox::enclosing(objects)?
        .map(|mbr| mbr.max_extension_axis())
        .unwrap_or(0))
}
