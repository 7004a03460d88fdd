//! Contiguous class partitions over a sorted sample set

use std::ops::Range;

use crate::error::{Error, Result};
use crate::samples::{ClassStatistics, SortedSampleSet};

/// An ordered split of a [`SortedSampleSet`] into `k` non-empty, contiguous
/// classes.
///
/// Stored as the start index of each class into the shared sorted array;
/// class `c` spans `starts[c]..starts[c + 1]` (the last class runs to the
/// end of the samples).
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPartition<'a> {
    samples: &'a SortedSampleSet,
    starts: Vec<usize>,
}

impl<'a> ClassPartition<'a> {
    /// Build a partition from class start indices.
    ///
    /// `starts` must begin at 0, increase strictly, and stay below the sample
    /// count, so that every class holds at least one sample.
    pub fn from_starts(samples: &'a SortedSampleSet, starts: Vec<usize>) -> Result<Self> {
        if starts.is_empty() {
            return Err(Error::invalid_request("partition has no classes"));
        }
        if starts[0] != 0 {
            return Err(Error::invalid_request(format!(
                "first class must start at index 0, got {}",
                starts[0]
            )));
        }
        if let Some(w) = starts.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::invalid_request(format!(
                "class starts must increase strictly ({} then {})",
                w[0], w[1]
            )));
        }
        let last = starts[starts.len() - 1];
        if last >= samples.len() {
            return Err(Error::invalid_request(format!(
                "class start {} out of range for {} samples",
                last,
                samples.len()
            )));
        }
        Ok(Self { samples, starts })
    }

    /// The single-class partition
    pub fn single(samples: &'a SortedSampleSet) -> Self {
        Self {
            samples,
            starts: vec![0],
        }
    }

    pub fn samples(&self) -> &'a SortedSampleSet {
        self.samples
    }

    /// Class start indices
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Number of classes
    pub fn class_count(&self) -> usize {
        self.starts.len()
    }

    /// Index range of class `class` in the sorted samples
    pub fn class_range(&self, class: usize) -> Range<usize> {
        let end = self
            .starts
            .get(class + 1)
            .copied()
            .unwrap_or(self.samples.len());
        self.starts[class]..end
    }

    /// Sorted values of class `class`
    pub fn class_values(&self, class: usize) -> &'a [f64] {
        &self.samples.values()[self.class_range(class)]
    }

    pub fn class_stats(&self, class: usize) -> ClassStatistics {
        self.samples.range_stats(self.class_range(class))
    }

    /// Number of samples per class
    pub fn class_sizes(&self) -> Vec<usize> {
        (0..self.class_count()).map(|c| self.class_range(c).len()).collect()
    }

    /// Iterate over the classes as value slices
    pub fn classes(&self) -> impl Iterator<Item = &'a [f64]> + '_ {
        (0..self.class_count()).map(move |c| self.class_values(c))
    }

    /// Total within-class sum of squared deviations
    pub fn tssd(&self) -> f64 {
        (0..self.class_count())
            .map(|c| self.samples.range_ssd(self.class_range(c)))
            .sum()
    }

    /// Goodness of variance fit: `1 - TSSD / SDAM`.
    ///
    /// Returns 1.0 for a degenerate sample set, where every partition is
    /// already perfect.
    pub fn goodness_of_variance_fit(&self) -> f64 {
        let sdam = self.samples.total_ssd();
        if sdam <= 0.0 {
            return 1.0;
        }
        (1.0 - self.tssd() / sdam).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn samples() -> SortedSampleSet {
        SortedSampleSet::new(vec![1.0, 2.0, 3.0, 10.0, 11.0, 12.0]).unwrap()
    }

    #[test]
    fn test_from_starts_valid() {
        let s = samples();
        let p = ClassPartition::from_starts(&s, vec![0, 3]).unwrap();
        assert_eq!(p.class_count(), 2);
        assert_eq!(p.class_values(0), &[1.0, 2.0, 3.0]);
        assert_eq!(p.class_values(1), &[10.0, 11.0, 12.0]);
        assert_eq!(p.class_sizes(), vec![3, 3]);
        assert_relative_eq!(p.tssd(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_starts_rejects_bad_shapes() {
        let s = samples();
        assert!(ClassPartition::from_starts(&s, vec![]).is_err());
        assert!(ClassPartition::from_starts(&s, vec![1, 3]).is_err());
        assert!(ClassPartition::from_starts(&s, vec![0, 3, 3]).is_err());
        assert!(ClassPartition::from_starts(&s, vec![0, 6]).is_err());
    }

    #[test]
    fn test_classes_concatenate_to_samples() {
        let s = samples();
        let p = ClassPartition::from_starts(&s, vec![0, 1, 4]).unwrap();
        let joined: Vec<f64> = p.classes().flatten().copied().collect();
        assert_eq!(joined, s.values());
    }

    #[test]
    fn test_goodness_of_variance_fit() {
        let s = samples();
        assert_relative_eq!(ClassPartition::single(&s).goodness_of_variance_fit(), 0.0, epsilon = 1e-12);
        let p = ClassPartition::from_starts(&s, vec![0, 3]).unwrap();
        assert!(p.goodness_of_variance_fit() > 0.95);

        let flat = SortedSampleSet::new(vec![2.0; 3]).unwrap();
        assert_eq!(ClassPartition::single(&flat).goodness_of_variance_fit(), 1.0);
    }
}
