//! Structured trace events emitted while a bulk split runs.

use super::BulkStrategy;
use crate::spatial_object::SpatialId;

/// One step of a bulk split, handed to the caller's tracing callback.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitTrace {
    /// The Z-curve strategy finished its single global sort.
    Sorted { strategy: BulkStrategy, len: usize },
    /// A partition was cut from the front of the remaining objects.
    Round {
        round: usize,
        /// Axis the objects were sorted on; `None` for the Z-curve strategy.
        axis: Option<usize>,
        split_point: usize,
        remaining: usize,
        ids: Vec<SpatialId>,
    },
    /// All objects have been assigned.
    Finished {
        strategy: BulkStrategy,
        partitions: usize,
    },
}

/// Optional callback wrapper; events are only built when someone listens.
pub(crate) struct Tracer<'t> {
    callback: Option<&'t mut dyn FnMut(&SplitTrace)>,
}

impl<'t> Tracer<'t> {
    pub(crate) fn new(callback: Option<&'t mut dyn FnMut(&SplitTrace)>) -> Self {
        Self { callback }
    }

    pub(crate) fn silent() -> Self {
        Self { callback: None }
    }

    #[inline]
    pub(crate) fn emit(&mut self, event: impl FnOnce() -> SplitTrace) {
        if let Some(callback) = self.callback.as_deref_mut() {
            callback(&event());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_tracer_never_builds_events() {
        let mut tracer = Tracer::silent();
        tracer.emit(|| panic!("event must not be built"));
    }

    #[test]
    fn test_tracer_forwards_events() {
        let mut seen = Vec::new();
        let mut callback = |event: &SplitTrace| seen.push(event.clone());
        {
            let mut tracer = Tracer::new(Some(&mut callback));
            tracer.emit(|| SplitTrace::Finished {
                strategy: BulkStrategy::ZCurve,
                partitions: 3,
            });
        }
        assert_eq!(
            seen,
            vec![SplitTrace::Finished {
                strategy: BulkStrategy::ZCurve,
                partitions: 3
            }]
        );
    }
}
