//! Initial partitions for local-search refinement
//!
//! Both builders are direct, single-pass constructors:
//! - **Equal interval**: the value range cut into `k` bins of equal width
//! - **Quantile**: the sorted samples cut into `k` groups of (nearly) equal size

use natbreaks_core::{validate_class_count, ClassPartition, Result, SortedSampleSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How to seed the local-search refiner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialStrategy {
    /// Equal-count groups
    #[default]
    Quantile,
    /// Equal-width value bins
    EqualInterval,
}

impl InitialStrategy {
    /// Build the initial partition for this strategy
    pub fn build(self, samples: &SortedSampleSet, k: usize) -> Result<ClassPartition<'_>> {
        match self {
            InitialStrategy::Quantile => quantile(samples, k),
            InitialStrategy::EqualInterval => equal_interval(samples, k),
        }
    }
}

/// Split the value range into `k` bins of equal width.
///
/// A value lying exactly on a bin edge belongs to the upper bin, and the
/// maximum belongs to the last bin. Bins left empty by gaps in the data (or
/// by a zero-width range) are repaired by moving the fewest boundaries needed
/// for every class to hold at least one sample.
pub fn equal_interval(samples: &SortedSampleSet, k: usize) -> Result<ClassPartition<'_>> {
    validate_class_count(samples, k)?;

    let values = samples.values();
    let min = samples.min();
    let width = (samples.max() - min) / k as f64;

    let mut starts: Vec<usize> = (0..k)
        .map(|c| {
            if c == 0 {
                return 0;
            }
            let edge = min + c as f64 * width;
            values.partition_point(|&v| v < edge)
        })
        .collect();

    if repair_empty_classes(&mut starts, values.len()) {
        warn!(classes = k, "equal-interval bins were empty; boundaries moved to keep every class populated");
    }

    ClassPartition::from_starts(samples, starts)
}

/// Split the sorted samples into `k` groups whose sizes differ by at most
/// one; class `c` starts at `⌊c·n/k⌋`.
pub fn quantile(samples: &SortedSampleSet, k: usize) -> Result<ClassPartition<'_>> {
    validate_class_count(samples, k)?;

    let n = samples.len();
    let starts = (0..k).map(|c| c * n / k).collect();
    ClassPartition::from_starts(samples, starts)
}

/// Force `starts` to increase strictly while leaving room for one sample per
/// remaining class. Returns whether anything moved.
fn repair_empty_classes(starts: &mut [usize], n: usize) -> bool {
    let k = starts.len();
    let mut moved = false;
    for c in 1..k {
        let repaired = starts[c].max(starts[c - 1] + 1).min(n - (k - c));
        if repaired != starts[c] {
            starts[c] = repaired;
            moved = true;
        }
    }
    moved
}
