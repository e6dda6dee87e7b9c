//! Bulk split of spatial objects into R-Tree sized partitions.
//!
//! Bulk loading builds an index from a complete set of objects in one pass.
//! This module only decides the grouping: every partition returned here is
//! meant to become one node, and a tree builder calls back in with the node
//! summaries to build the next level.
//!
//! Two strategies are available:
//! - [`BulkStrategy::MaxExtension`] repeatedly sorts the remaining objects on
//!   the axis with the largest extent and cuts a partition from the front.
//! - [`BulkStrategy::ZCurve`] sorts all objects once along a Z-order curve and
//!   cuts consecutive runs.
//!
//! Both use [`choose_bulk_split_point`] to size partitions, so every
//! partition holds between `min_entries` and `max_entries` objects as long as
//! `max_entries + 1 >= 2 * min_entries`.

pub mod axis;
mod max_extension;
pub mod split_point;
pub mod trace;
mod zcurve_split;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::config::{BulkSplitBuilder, BulkSplitConfig};
use crate::errors::{SpatialError, SpatialResult};
use crate::spatial_object::{uniform_dimensionality, SpatialObject};

pub use axis::{AxisBound, SpatialComparator};
pub use split_point::{check_fanout, choose_bulk_split_point};
pub use trace::SplitTrace;

use max_extension::maximal_extension_partition;
use trace::Tracer;
use zcurve_split::zvalue_partition;

/// One group of objects, in the order the strategy produced them.
pub type Partition<'a, O> = Vec<&'a O>;

/// Available strategies for bulk loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BulkStrategy {
    /// Split on the axis with the largest extent, re-evaluated per partition.
    #[default]
    MaxExtension,
    /// Order by the Z-value of each object's lower corner.
    ZCurve,
}

impl BulkStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            BulkStrategy::MaxExtension => "MAX_EXTENSION",
            BulkStrategy::ZCurve => "ZCURVE",
        }
    }
}

impl Display for BulkStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BulkStrategy {
    type Err = SpatialError;

    /// Parses a strategy tag, ignoring case, `_` and `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        match normalized.as_str() {
            "MAXEXTENSION" => Ok(BulkStrategy::MaxExtension),
            "ZCURVE" => Ok(BulkStrategy::ZCurve),
            _ => Err(SpatialError::invalid_argument(format!(
                "Unknown bulk load strategy: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for BulkStrategy {
    type Error = SpatialError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BulkStrategy> for String {
    fn from(strategy: BulkStrategy) -> Self {
        strategy.name().to_string()
    }
}

/// Partitions `objects` according to `strategy`.
///
/// # Errors
/// - `InvalidArgument` if `min_entries` is zero or larger than `max_entries`,
///   if the objects have no dimensions, or if a non-empty input holds fewer
///   than `min_entries` objects.
/// - `DimensionMismatch` if the objects do not share one dimensionality.
///
/// # Example
/// ```
/// use nitrite_bulk::{partition, BulkStrategy, SpatialEntry};
///
/// let objects: Vec<_> = (0..10)
///     .map(|i| SpatialEntry::point(i, vec![i as f64, 0.0]).unwrap())
///     .collect();
///
/// let partitions = partition(&objects, 3, 5, BulkStrategy::MaxExtension).unwrap();
/// assert_eq!(partitions.len(), 2);
/// assert!(partitions.iter().all(|p| p.len() == 5));
/// ```
pub fn partition<'a, O: SpatialObject>(
    objects: &'a [O],
    min_entries: usize,
    max_entries: usize,
    strategy: BulkStrategy,
) -> SpatialResult<Vec<Partition<'a, O>>> {
    run(objects, min_entries, max_entries, strategy, Tracer::silent())
}

/// Like [`partition`], reporting every step to `tracer`.
pub fn partition_traced<'a, O: SpatialObject>(
    objects: &'a [O],
    min_entries: usize,
    max_entries: usize,
    strategy: BulkStrategy,
    tracer: &mut dyn FnMut(&SplitTrace),
) -> SpatialResult<Vec<Partition<'a, O>>> {
    run(objects, min_entries, max_entries, strategy, Tracer::new(Some(tracer)))
}

/// Like [`partition`], with the strategy given by its tag.
///
/// An unknown tag fails with `InvalidArgument` before any work is done.
pub fn partition_by_name<'a, O: SpatialObject>(
    objects: &'a [O],
    min_entries: usize,
    max_entries: usize,
    strategy: &str,
) -> SpatialResult<Vec<Partition<'a, O>>> {
    let strategy = strategy.parse::<BulkStrategy>()?;
    partition(objects, min_entries, max_entries, strategy)
}

fn run<'a, O: SpatialObject>(
    objects: &'a [O],
    min_entries: usize,
    max_entries: usize,
    strategy: BulkStrategy,
    mut tracer: Tracer<'_>,
) -> SpatialResult<Vec<Partition<'a, O>>> {
    check_fanout(min_entries, max_entries)?;
    uniform_dimensionality(objects)?;

    log::debug!(
        "Bulk split of {} objects using {} (min {}, max {})",
        objects.len(),
        strategy,
        min_entries,
        max_entries
    );

    let partitions = match strategy {
        BulkStrategy::MaxExtension => {
            maximal_extension_partition(objects, min_entries, max_entries, &mut tracer)?
        }
        BulkStrategy::ZCurve => zvalue_partition(objects, min_entries, max_entries, &mut tracer)?,
    };

    log::debug!("Bulk split produced {} partitions", partitions.len());
    Ok(partitions)
}

/// A configured bulk splitter.
///
/// Holds validated fanout bounds and a strategy so callers building one tree
/// level after another do not have to repeat them.
///
/// # Example
/// ```
/// use nitrite_bulk::{BulkSplit, BulkStrategy, SpatialEntry};
///
/// let splitter = BulkSplit::builder()
///     .min_entries(2)
///     .max_entries(4)
///     .strategy(BulkStrategy::ZCurve)
///     .build()
///     .unwrap();
///
/// let objects: Vec<_> = (0..9)
///     .map(|i| SpatialEntry::point(i, vec![i as f64, (i % 3) as f64]).unwrap())
///     .collect();
/// let partitions = splitter.partition(&objects).unwrap();
/// assert_eq!(partitions.iter().map(|p| p.len()).sum::<usize>(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkSplit {
    config: BulkSplitConfig,
}

impl BulkSplit {
    /// Creates a splitter after validating `config`.
    pub fn new(config: BulkSplitConfig) -> SpatialResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn builder() -> BulkSplitBuilder {
        BulkSplitBuilder::new()
    }

    pub fn config(&self) -> &BulkSplitConfig {
        &self.config
    }

    pub fn partition<'a, O: SpatialObject>(
        &self,
        objects: &'a [O],
    ) -> SpatialResult<Vec<Partition<'a, O>>> {
        partition(
            objects,
            self.config.min_entries,
            self.config.max_entries,
            self.config.strategy,
        )
    }

    pub fn partition_traced<'a, O: SpatialObject>(
        &self,
        objects: &'a [O],
        tracer: &mut dyn FnMut(&SplitTrace),
    ) -> SpatialResult<Vec<Partition<'a, O>>> {
        partition_traced(
            objects,
            self.config.min_entries,
            self.config.max_entries,
            self.config.strategy,
            tracer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounding_box::{BoundingBox, SpatialEntry};
    use crate::spatial_object::SpatialId;

    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    fn grid(n: u64) -> Vec<SpatialEntry> {
        (0..n)
            .map(|i| SpatialEntry::point(i, vec![(i % 7) as f64, (i / 7) as f64]).unwrap())
            .collect()
    }

    fn flattened_ids(partitions: &[Partition<'_, SpatialEntry>]) -> Vec<SpatialId> {
        let mut ids: Vec<SpatialId> = partitions.iter().flatten().map(|o| o.id).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("MAX_EXTENSION".parse::<BulkStrategy>().unwrap(), BulkStrategy::MaxExtension);
        assert_eq!("max-extension".parse::<BulkStrategy>().unwrap(), BulkStrategy::MaxExtension);
        assert_eq!("ZCURVE".parse::<BulkStrategy>().unwrap(), BulkStrategy::ZCurve);
        assert_eq!("z_curve".parse::<BulkStrategy>().unwrap(), BulkStrategy::ZCurve);
        assert!(matches!(
            "HILBERT".parse::<BulkStrategy>(),
            Err(SpatialError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_strategy_display_round_trip() {
        for strategy in [BulkStrategy::MaxExtension, BulkStrategy::ZCurve] {
            assert_eq!(strategy.to_string().parse::<BulkStrategy>().unwrap(), strategy);
        }
        assert_eq!(BulkStrategy::default(), BulkStrategy::MaxExtension);
    }

    #[test]
    fn test_strategy_serde() {
        let json = serde_json::to_string(&BulkStrategy::ZCurve).unwrap();
        assert_eq!(json, "\"ZCURVE\"");
        let parsed: BulkStrategy = serde_json::from_str("\"MAX_EXTENSION\"").unwrap();
        assert_eq!(parsed, BulkStrategy::MaxExtension);
        assert!(serde_json::from_str::<BulkStrategy>("\"STR\"").is_err());
    }

    #[test]
    fn test_partition_both_strategies() {
        let objects = grid(30);
        for strategy in [BulkStrategy::MaxExtension, BulkStrategy::ZCurve] {
            let partitions = partition(&objects, 3, 5, strategy).unwrap();
            assert_eq!(flattened_ids(&partitions), (0..30).collect::<Vec<_>>());
            assert!(partitions.iter().all(|p| p.len() >= 3 && p.len() <= 5));
        }
    }

    #[test]
    fn test_partition_returns_references_to_input() {
        let objects = grid(4);
        let partitions = partition(&objects, 1, 2, BulkStrategy::ZCurve).unwrap();
        for object in partitions.iter().flatten() {
            assert!(objects.iter().any(|o| std::ptr::eq(o, *object)));
        }
    }

    #[test]
    fn test_partition_by_name_unknown_strategy() {
        let objects = grid(10);
        let result = partition_by_name(&objects, 3, 5, "HILBERT");
        assert!(matches!(result, Err(SpatialError::InvalidArgument(_))));
    }

    #[test]
    fn test_partition_by_name() {
        let objects = grid(10);
        let partitions = partition_by_name(&objects, 3, 5, "ZCURVE").unwrap();
        assert_eq!(partitions.len(), 2);
    }

    #[test]
    fn test_partition_invalid_fanout() {
        let objects = grid(10);
        assert!(matches!(
            partition(&objects, 0, 5, BulkStrategy::MaxExtension),
            Err(SpatialError::InvalidArgument(_))
        ));
        assert!(matches!(
            partition(&objects, 6, 5, BulkStrategy::ZCurve),
            Err(SpatialError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_partition_dimension_mismatch() {
        let objects = vec![
            SpatialEntry::point(1, vec![0.0, 0.0]).unwrap(),
            SpatialEntry::new(2, BoundingBox::new(vec![0.0; 3], vec![1.0; 3]).unwrap()),
        ];
        for strategy in [BulkStrategy::MaxExtension, BulkStrategy::ZCurve] {
            assert_eq!(
                partition(&objects, 1, 2, strategy).unwrap_err(),
                SpatialError::DimensionMismatch {
                    id: 2,
                    expected: 2,
                    found: 3
                }
            );
        }
    }

    #[test]
    fn test_partition_empty_input() {
        let objects: Vec<SpatialEntry> = vec![];
        for strategy in [BulkStrategy::MaxExtension, BulkStrategy::ZCurve] {
            assert!(partition(&objects, 2, 4, strategy).unwrap().is_empty());
        }
    }

    #[test]
    fn test_partition_traced_counts_rounds() {
        let objects = grid(23);
        let mut rounds = 0;
        let mut finished = None;
        let mut tracer = |event: &SplitTrace| match event {
            SplitTrace::Round { .. } => rounds += 1,
            SplitTrace::Finished { partitions, .. } => finished = Some(*partitions),
            SplitTrace::Sorted { .. } => {}
        };

        let partitions =
            partition_traced(&objects, 2, 5, BulkStrategy::MaxExtension, &mut tracer).unwrap();
        assert_eq!(rounds, partitions.len());
        assert_eq!(finished, Some(partitions.len()));
    }

    #[test]
    fn test_bulk_split_new_validates() {
        let config = BulkSplitConfig {
            min_entries: 5,
            max_entries: 2,
            strategy: BulkStrategy::ZCurve,
        };
        assert!(BulkSplit::new(config).is_err());

        let splitter = BulkSplit::default();
        assert_eq!(splitter.config(), &BulkSplitConfig::default());
    }

    #[test]
    fn test_bulk_split_partition() {
        let splitter = BulkSplit::builder()
            .min_entries(2)
            .max_entries(3)
            .strategy(BulkStrategy::ZCurve)
            .build()
            .unwrap();
        let objects = grid(11);

        let direct = partition(&objects, 2, 3, BulkStrategy::ZCurve).unwrap();
        let configured = splitter.partition(&objects).unwrap();
        assert_eq!(flattened_ids(&direct), flattened_ids(&configured));
        assert_eq!(direct, configured);

        let mut events = 0;
        let traced = splitter
            .partition_traced(&objects, &mut |_: &SplitTrace| events += 1)
            .unwrap();
        assert_eq!(traced, configured);
        // sorted + one per partition + finished
        assert_eq!(events, configured.len() + 2);
    }
}
