//! Skip list configuration.

use tofu_value::{Kind, TofuError, TofuResult};

/// Largest supported level count.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Construction parameters of a [`SkipList`](crate::SkipList).
#[derive(Clone, Debug, PartialEq)]
pub struct SkipListConfig {
    /// Kind of every stored value; [`Kind::Any`] accepts all kinds.
    pub kind: Kind,
    /// Number of levels, in `1..=64`.
    pub max_level: usize,
    /// Chance of promoting a node one level higher, in `(0, 1)`.
    pub probability: f64,
    /// Fixed seed for level selection. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SkipListConfig {
    fn default() -> Self {
        SkipListConfig {
            kind: Kind::Any,
            max_level: 16,
            probability: 0.5,
            seed: None,
        }
    }
}

impl SkipListConfig {
    /// Default configuration for values of `kind`.
    pub fn with_kind(kind: Kind) -> Self {
        SkipListConfig {
            kind,
            ..SkipListConfig::default()
        }
    }

    #[must_use]
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn validate(&self) -> TofuResult<()> {
        if !(1..=MAX_LEVEL_LIMIT).contains(&self.max_level) {
            return Err(TofuError::InvalidArgument {
                reason: "skip list max_level must be in 1..=64",
            });
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(TofuError::InvalidArgument {
                reason: "skip list probability must be in (0, 1)",
            });
        }
        Ok(())
    }
}
