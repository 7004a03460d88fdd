//! Exact natural breaks (Fisher-Jenks dynamic program)
//!
//! Finds the contiguous split of sorted values into `k` classes with the
//! smallest total within-class sum of squared deviations. Because the
//! objective is additive over classes and optimal classes are contiguous on
//! sorted data, the best split of the first `i` values into `j` classes is
//! the best split of some shorter prefix into `j - 1` classes plus one
//! trailing class. Cost is O(n²·k) time and O(n·k) space.

use ndarray::Array2;
use natbreaks_core::{
    validate_class_count, ClassPartition, ClassStatistics, Classifier, Result, SortedSampleSet,
};
use tracing::debug;

use crate::maybe_rayon::*;

/// Exact natural breaks classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPartitioner;

impl Classifier for ExactPartitioner {
    fn name(&self) -> &'static str {
        "Jenks (exact)"
    }

    fn description(&self) -> &'static str {
        "Globally variance-optimal contiguous classes by Fisher's dynamic program"
    }

    fn classify<'a>(
        &self,
        samples: &'a SortedSampleSet,
        class_count: usize,
    ) -> Result<ClassPartition<'a>> {
        exact_partition(samples, class_count)
    }
}

/// Optimal contiguous partition of `samples` into `k` classes.
///
/// Tables are indexed `[[j, i]]`: `cost[[j, i]]` is the minimum TSSD of the
/// first `i` samples split into `j` classes, and `start[[j, i]]` is the index
/// of the first sample of the last of those classes. Rows of a column `j`
/// only read column `j - 1`, so they are evaluated in parallel.
///
/// When several splits reach bit-identical minimal cost the one whose last
/// class starts at the smallest index is kept, in both sequential and
/// parallel builds. Splits that are only equal in exact arithmetic may
/// round to slightly different costs, and then the cheaper rounding wins.
pub fn exact_partition(samples: &SortedSampleSet, k: usize) -> Result<ClassPartition<'_>> {
    validate_class_count(samples, k)?;
    if k == 1 {
        return Ok(ClassPartition::single(samples));
    }

    let n = samples.len();
    debug!(samples = n, classes = k, "building Fisher-Jenks tables");

    let mut cost = Array2::<f64>::from_elem((k + 1, n + 1), f64::INFINITY);
    let mut start = Array2::<usize>::zeros((k + 1, n + 1));

    // One class: the prefix itself.
    let mut prefix = ClassStatistics::new(samples.offset());
    cost[[1, 0]] = 0.0;
    for i in 1..=n {
        prefix.push(samples.value(i - 1));
        cost[[1, i]] = prefix.ssd();
    }

    for j in 2..=k {
        // The last column is only read at i = n by the backtrack.
        let rows: Vec<usize> = if j == k { vec![n] } else { (j..=n).collect() };
        let previous = cost.row(j - 1).to_vec();
        let best: Vec<(usize, f64, usize)> = rows
            .into_par_iter()
            .map(|i| {
                let (c, s) = best_last_class(samples, &previous, i, j);
                (i, c, s)
            })
            .collect();

        for (i, c, s) in best {
            cost[[j, i]] = c;
            start[[j, i]] = s;
        }
    }

    let mut starts = vec![0; k];
    let mut end = n;
    for j in (2..=k).rev() {
        let s = start[[j, end]];
        starts[j - 1] = s;
        end = s;
    }
    debug!(tssd = cost[[k, n]], "Fisher-Jenks optimum found");

    ClassPartition::from_starts(samples, starts)
}

/// Best start of the trailing class when splitting the first `i` samples
/// into `j` classes, given the optimal costs for `j - 1` classes.
///
/// The trailing window grows backward from `i - 1`, keeping its running sums
/// so each candidate costs O(1). Bit-identical costs go to the later-scanned
/// (smaller) start.
fn best_last_class(
    samples: &SortedSampleSet,
    previous: &[f64],
    i: usize,
    j: usize,
) -> (f64, usize) {
    let mut window = ClassStatistics::new(samples.offset());
    let mut best_cost = f64::INFINITY;
    let mut best_start = i - 1;

    for s in (j - 1..i).rev() {
        window.push(samples.value(s));
        let candidate = previous[s] + window.ssd();
        if candidate <= best_cost {
            best_cost = candidate;
            best_start = s;
        }
    }

    (best_cost, best_start)
}
