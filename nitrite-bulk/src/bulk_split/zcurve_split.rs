//! Bulk split along a Z-order curve.
//!
//! All objects are sorted once by the Z-value of their lower corner, then
//! consecutive runs are cut into partitions. Unlike the maximal extension
//! strategy there is no re-sorting between partitions.

use super::split_point::choose_bulk_split_point;
use super::trace::{SplitTrace, Tracer};
use super::{BulkStrategy, Partition};
use crate::errors::SpatialResult;
use crate::spatial_object::{lower_corner, uniform_dimensionality, SpatialObject};
use crate::zcurve::{zvalues, ZValue};

/// Partitions `objects` by their Z-values.
pub(crate) fn zvalue_partition<'a, O: SpatialObject>(
    objects: &'a [O],
    min_entries: usize,
    max_entries: usize,
    tracer: &mut Tracer<'_>,
) -> SpatialResult<Vec<Partition<'a, O>>> {
    uniform_dimensionality(objects)?;
    let points: Vec<Vec<f64>> = objects.iter().map(lower_corner).collect();
    let keys = zvalues(&points)?;

    let mut keyed: Vec<(ZValue, &'a O)> = keys.into_iter().zip(objects.iter()).collect();
    keyed.sort_by(|(z1, o1), (z2, o2)| z1.cmp(z2).then_with(|| o1.id().cmp(&o2.id())));
    let sorted: Vec<&'a O> = keyed.into_iter().map(|(_, object)| object).collect();

    log::trace!("z-curve sorted {} objects", sorted.len());
    tracer.emit(|| SplitTrace::Sorted {
        strategy: BulkStrategy::ZCurve,
        len: sorted.len(),
    });

    let mut partitions = Vec::new();
    let mut cursor = 0;
    while cursor < sorted.len() {
        let split_point =
            choose_bulk_split_point(sorted.len() - cursor, min_entries, max_entries)?;
        let partition = sorted[cursor..cursor + split_point].to_vec();
        cursor += split_point;

        log::trace!(
            "z-curve round {}: split point {}, {} objects left",
            partitions.len(),
            split_point,
            sorted.len() - cursor
        );
        tracer.emit(|| SplitTrace::Round {
            round: partitions.len(),
            axis: None,
            split_point,
            remaining: sorted.len() - cursor,
            ids: partition.iter().map(|o| o.id()).collect(),
        });

        partitions.push(partition);
    }

    tracer.emit(|| SplitTrace::Finished {
        strategy: BulkStrategy::ZCurve,
        partitions: partitions.len(),
    });
    Ok(partitions)
}
