//! Sorted sample sets and per-class running statistics
//!
//! Every classifier works on a [`SortedSampleSet`]: an ascending, non-empty,
//! immutable run of finite values. Squared-deviation sums are taken relative
//! to the smallest value so that surfaces with a large offset (elevations in
//! the thousands with a spread of a few metres) do not lose precision to
//! cancellation.

use std::ops::Range;

use crate::error::{Error, Result};

/// Running count, sum and sum of squares of a class.
///
/// Sums are accumulated on `value - offset`; the within-class sum of squared
/// deviations is invariant under that shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStatistics {
    count: usize,
    sum: f64,
    sum_sq: f64,
    offset: f64,
}

impl ClassStatistics {
    /// Empty statistics accumulating relative to `offset`
    pub fn new(offset: f64) -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_sq: 0.0,
            offset,
        }
    }

    /// Add one value
    pub fn push(&mut self, value: f64) {
        let d = value - self.offset;
        self.count += 1;
        self.sum += d;
        self.sum_sq += d * d;
    }

    /// Number of values
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sum of the values
    pub fn sum(&self) -> f64 {
        self.sum + self.count as f64 * self.offset
    }

    /// Sum of the squared values
    pub fn sum_sq(&self) -> f64 {
        let n = self.count as f64;
        self.sum_sq + 2.0 * self.offset * self.sum + n * self.offset * self.offset
    }

    /// Mean of the values, `None` for an empty class
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.offset + self.sum / self.count as f64)
        }
    }

    /// Sum of squared deviations from the class mean.
    ///
    /// Rounding can push `sum_sq - sum²/n` marginally below zero; the result
    /// is clamped at zero.
    pub fn ssd(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_sq - self.sum * self.sum / self.count as f64).max(0.0)
    }
}

/// Ascending, non-empty sequence of finite sample values.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedSampleSet {
    values: Vec<f64>,
    /// prefix_sum[i] = Σ (values[..i] - min)
    prefix_sum: Vec<f64>,
    /// prefix_sq[i] = Σ (values[..i] - min)²
    prefix_sq: Vec<f64>,
}

impl SortedSampleSet {
    /// Build a sample set, sorting the values if they are not already sorted.
    ///
    /// Fails with [`Error::InvalidPartitionRequest`] on empty input and with
    /// [`Error::NonFiniteSample`] on NaN or infinite values.
    pub fn new(mut values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::invalid_request("sample set is empty"));
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::NonFiniteSample { index, value });
        }
        if !values.windows(2).all(|w| w[0] <= w[1]) {
            values.sort_by(f64::total_cmp);
        }

        let offset = values[0];
        let mut prefix_sum = Vec::with_capacity(values.len() + 1);
        let mut prefix_sq = Vec::with_capacity(values.len() + 1);
        let (mut s, mut sq) = (0.0, 0.0);
        prefix_sum.push(s);
        prefix_sq.push(sq);
        for &v in &values {
            let d = v - offset;
            s += d;
            sq += d * d;
            prefix_sum.push(s);
            prefix_sq.push(sq);
        }

        Ok(Self {
            values,
            prefix_sum,
            prefix_sq,
        })
    }

    /// Build a sample set from a slice (copies and sorts)
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }

    /// Number of samples (always > 0)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sorted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at sorted position `index`
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Offset the running sums are taken relative to (the minimum)
    pub fn offset(&self) -> f64 {
        self.values[0]
    }

    /// Whether every sample holds the same value
    pub fn is_degenerate(&self) -> bool {
        self.min() == self.max()
    }

    /// Statistics of the contiguous run `range` in O(1)
    pub fn range_stats(&self, range: Range<usize>) -> ClassStatistics {
        debug_assert!(range.start <= range.end && range.end <= self.len());
        ClassStatistics {
            count: range.end - range.start,
            sum: self.prefix_sum[range.end] - self.prefix_sum[range.start],
            sum_sq: self.prefix_sq[range.end] - self.prefix_sq[range.start],
            offset: self.offset(),
        }
    }

    /// Sum of squared deviations of `range` about its own mean
    pub fn range_ssd(&self, range: Range<usize>) -> f64 {
        self.range_stats(range).ssd()
    }

    /// Sum of squared deviations of the whole set about its mean (SDAM)
    pub fn total_ssd(&self) -> f64 {
        self.range_ssd(0..self.len())
    }
}
