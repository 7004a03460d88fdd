//! Natural breaks classification
//!
//! Splits sampled values into ordered, contiguous classes that minimize
//! within-class variance:
//! - **Exact**: Fisher-Jenks dynamic program, globally optimal, O(n²·k)
//! - **Local search**: boundary-swap refinement of an equal-interval or
//!   quantile partition, cheap but heuristic
//!
//! [`natural_breaks`] runs either method end to end and returns the
//! breakpoints and reclassification table.

mod breaks;
mod exact;
mod initial;
mod refine;

pub use breaks::{map_breaks, Breakpoints, ReclassEntry, ReclassTable, REMAP_GAP};
pub use exact::{exact_partition, ExactPartitioner};
pub use initial::{equal_interval, quantile, InitialStrategy};
pub use refine::{refine, LocalSearchRefiner, RefineParams, RefineSummary, Refinement};

use natbreaks_core::{ClassPartition, Result, SortedSampleSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which partitioning method to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "method")]
pub enum Method {
    /// Fisher-Jenks dynamic program
    #[default]
    Exact,
    /// Seeded local search
    LocalSearch { seed: InitialStrategy },
}

/// Parameters for natural breaks classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreaksParams {
    /// Number of classes (default: 5)
    pub class_count: usize,
    /// Partitioning method (default: exact)
    pub method: Method,
    /// Local-search settings; ignored by the exact method
    pub refine: RefineParams,
    /// Output labels, one per class (default: 1..=k)
    pub output_labels: Option<Vec<i32>>,
}

impl Default for BreaksParams {
    fn default() -> Self {
        Self {
            class_count: 5,
            method: Method::Exact,
            refine: RefineParams::default(),
            output_labels: None,
        }
    }
}

/// Result of a natural breaks classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub breaks: Breakpoints,
    pub table: ReclassTable,
    /// Samples per class
    pub class_sizes: Vec<usize>,
    /// Total within-class sum of squared deviations
    pub tssd: f64,
    /// Goodness of variance fit, 1 - TSSD / SDAM
    pub gvf: f64,
    /// Present for the local-search method
    pub refinement: Option<RefineSummary>,
}

impl Classification {
    fn from_partition(
        partition: &ClassPartition<'_>,
        labels: Option<&[i32]>,
        refinement: Option<RefineSummary>,
    ) -> Result<Self> {
        let (breaks, table) = map_breaks(partition, labels)?;
        Ok(Self {
            breaks,
            table,
            class_sizes: partition.class_sizes(),
            tssd: partition.tssd(),
            gvf: partition.goodness_of_variance_fit(),
            refinement,
        })
    }
}

/// Classify `values` (any order, finite) into `params.class_count` natural
/// breaks classes.
///
/// # Example
/// ```
/// use natbreaks_algorithms::classification::{natural_breaks, BreaksParams};
///
/// let params = BreaksParams { class_count: 2, ..Default::default() };
/// let result = natural_breaks(&[5.0, 1.0, 100.0, 3.0, 2.0, 4.0], &params).unwrap();
/// assert_eq!(result.breaks.as_slice(), &[1.0, 5.0, 100.0]);
/// ```
pub fn natural_breaks(values: &[f64], params: &BreaksParams) -> Result<Classification> {
    let samples = SortedSampleSet::from_slice(values)?;
    classify_samples(&samples, params)
}

/// [`natural_breaks`] on an already-built sample set
pub fn classify_samples(samples: &SortedSampleSet, params: &BreaksParams) -> Result<Classification> {
    natbreaks_core::validate_class_count(samples, params.class_count)?;
    if let Some(labels) = &params.output_labels {
        if labels.len() != params.class_count {
            return Err(natbreaks_core::Error::invalid_request(format!(
                "{} output labels given for {} classes",
                labels.len(),
                params.class_count
            )));
        }
    }
    if samples.is_degenerate() && params.class_count > 1 {
        warn!(
            value = samples.min(),
            classes = params.class_count,
            "all samples are identical; classes will share one bound"
        );
    }

    let labels = params.output_labels.as_deref();
    let result = match params.method {
        Method::Exact => {
            let partition = exact_partition(samples, params.class_count)?;
            Classification::from_partition(&partition, labels, None)?
        }
        Method::LocalSearch { seed } => {
            let refinement =
                LocalSearchRefiner::new(seed, params.refine).run(samples, params.class_count)?;
            Classification::from_partition(&refinement.partition, labels, Some(refinement.summary))?
        }
    };

    debug!(
        method = ?params.method,
        tssd = result.tssd,
        gvf = result.gvf,
        "classification finished"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use natbreaks_core::Error;

    #[test]
    fn test_exact_end_to_end() {
        let params = BreaksParams {
            class_count: 3,
            ..Default::default()
        };
        let r = natural_breaks(&[9.0, 1.0, 5.0, 1.0, 9.0, 5.0, 1.0, 5.0, 9.0], &params).unwrap();
        assert_eq!(r.breaks.as_slice(), &[1.0, 1.0, 5.0, 9.0]);
        assert_eq!(r.class_sizes, vec![3, 3, 3]);
        assert_eq!(r.gvf, 1.0);
        assert!(r.refinement.is_none());
    }

    #[test]
    fn test_local_search_end_to_end() {
        let params = BreaksParams {
            class_count: 2,
            method: Method::LocalSearch {
                seed: InitialStrategy::Quantile,
            },
            ..Default::default()
        };
        let r = natural_breaks(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0], &params).unwrap();
        assert_eq!(r.breaks.as_slice(), &[1.0, 5.0, 100.0]);
        assert!(r.refinement.unwrap().converged);
    }

    #[test]
    fn test_labels_checked_before_work() {
        let params = BreaksParams {
            class_count: 2,
            output_labels: Some(vec![7]),
            ..Default::default()
        };
        let err = natural_breaks(&[1.0, 2.0, 3.0], &params).unwrap_err();
        assert!(matches!(err, Error::InvalidPartitionRequest(_)));
    }

    #[test]
    fn test_empty_input() {
        let err = natural_breaks(&[], &BreaksParams::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidPartitionRequest(_)));
    }
}
