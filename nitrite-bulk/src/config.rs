//! Bulk split configuration and its fluent builder.

use crate::bulk_split::{check_fanout, BulkSplit, BulkStrategy};
use crate::errors::{SpatialError, SpatialResult};

/// Default maximum number of entries per partition (R-Tree leaf fanout)
pub const DEFAULT_MAX_ENTRIES: usize = 64;

/// Default minimum number of entries per partition (about 40% of max)
pub const DEFAULT_MIN_ENTRIES: usize = 25;

/// Fanout bounds and strategy for a bulk split.
///
/// Can be (de)serialized, e.g. as part of an index definition:
///
/// ```rust
/// use nitrite_bulk::{BulkSplitConfig, BulkStrategy};
///
/// let config: BulkSplitConfig =
///     serde_json::from_str(r#"{"min_entries": 4, "max_entries": 10, "strategy": "ZCURVE"}"#)
///         .unwrap();
/// assert_eq!(config.strategy, BulkStrategy::ZCurve);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BulkSplitConfig {
    /// The minimum number of entries in a partition
    pub min_entries: usize,
    /// The maximum number of entries in a partition
    pub max_entries: usize,
    /// The bulk load strategy
    pub strategy: BulkStrategy,
}

impl Default for BulkSplitConfig {
    fn default() -> Self {
        Self {
            min_entries: DEFAULT_MIN_ENTRIES,
            max_entries: DEFAULT_MAX_ENTRIES,
            strategy: BulkStrategy::default(),
        }
    }
}

impl BulkSplitConfig {
    /// Checks that the fanout bounds can be satisfied.
    pub fn validate(&self) -> SpatialResult<()> {
        check_fanout(self.min_entries, self.max_entries)
    }
}

/// Builder for a [`BulkSplit`].
///
/// Setter errors are captured and reported by [`BulkSplitBuilder::build`], so
/// the chain itself never fails halfway.
#[derive(Debug, Default)]
pub struct BulkSplitBuilder {
    error: Option<SpatialError>,
    config: BulkSplitConfig,
}

impl BulkSplitBuilder {
    /// Creates a new builder with the default configuration.
    pub fn new() -> Self {
        BulkSplitBuilder {
            error: None,
            config: BulkSplitConfig::default(),
        }
    }

    /// Sets the minimum number of entries in a partition. Must be positive.
    pub fn min_entries(mut self, min_entries: usize) -> Self {
        if self.error.is_none() && min_entries == 0 {
            self.error = Some(SpatialError::invalid_argument(
                "min_entries must be positive",
            ));
        }
        self.config.min_entries = min_entries;
        self
    }

    /// Sets the maximum number of entries in a partition. Must be positive.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        if self.error.is_none() && max_entries == 0 {
            self.error = Some(SpatialError::invalid_argument(
                "max_entries must be positive",
            ));
        }
        self.config.max_entries = max_entries;
        self
    }

    pub fn strategy(mut self, strategy: BulkStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Sets the strategy from its tag; an unknown tag is reported by `build`.
    pub fn strategy_name(mut self, name: &str) -> Self {
        match name.parse() {
            Ok(strategy) => self.config.strategy = strategy,
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
            }
        }
        self
    }

    /// Validates the configuration and creates the splitter.
    pub fn build(self) -> SpatialResult<BulkSplit> {
        if let Some(e) = self.error {
            log::error!("Invalid bulk split configuration: {}", e);
            return Err(e);
        }
        BulkSplit::new(self.config)
    }
}
