//! Local-search refinement of a contiguous partition
//!
//! Heuristic alternative to the exact dynamic program: starting from any
//! contiguous partition, walk the class boundaries and move single samples
//! across a boundary whenever that lowers the within-class variance. The
//! result is never worse than the starting partition, but it is not
//! guaranteed to be optimal.

use natbreaks_core::{ClassPartition, Classifier, Result, SortedSampleSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::initial::InitialStrategy;

/// Parameters for local-search refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineParams {
    /// Hard cap on improvement passes over the class boundaries (default: 10)
    pub max_passes: usize,
    /// Stop once a whole pass accepts no move (default: true). With `false`
    /// every one of `max_passes` passes runs, as the legacy tool did.
    pub stop_on_convergence: bool,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            max_passes: 10,
            stop_on_convergence: true,
        }
    }
}

/// What a refinement run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineSummary {
    /// Passes actually run
    pub passes: usize,
    /// Boundary moves accepted over all passes
    pub swaps: usize,
    /// Whether the final pass accepted no move, i.e. the partition is a
    /// local optimum under single-sample moves
    pub converged: bool,
}

/// Result of [`refine`]
#[derive(Debug, Clone)]
pub struct Refinement<'a> {
    pub partition: ClassPartition<'a>,
    pub summary: RefineSummary,
}

/// Local-search classifier: seed with an initial strategy, then refine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSearchRefiner {
    pub seed: InitialStrategy,
    pub params: RefineParams,
}

impl LocalSearchRefiner {
    pub fn new(seed: InitialStrategy, params: RefineParams) -> Self {
        Self { seed, params }
    }

    /// Seed and refine, keeping the run summary
    pub fn run<'a>(&self, samples: &'a SortedSampleSet, class_count: usize) -> Result<Refinement<'a>> {
        let initial = self.seed.build(samples, class_count)?;
        refine(&initial, &self.params)
    }
}

impl Classifier for LocalSearchRefiner {
    fn name(&self) -> &'static str {
        "Jenks (local search)"
    }

    fn description(&self) -> &'static str {
        "Boundary-swap refinement of an equal-interval or quantile partition"
    }

    fn classify<'a>(
        &self,
        samples: &'a SortedSampleSet,
        class_count: usize,
    ) -> Result<ClassPartition<'a>> {
        Ok(self.run(samples, class_count)?.partition)
    }
}

/// Improve `initial` by single-sample boundary moves.
///
/// Each pass visits the boundaries between classes `c` and `c + 1` in order.
/// First the largest sample of `c` is tried in `c + 1`; if that does not
/// strictly lower the cost, the smallest sample of `c + 1` is tried in `c`.
/// A move that would empty a class is never tried. Only the two classes
/// beside the boundary change, so their combined cost decides.
pub fn refine<'a>(initial: &ClassPartition<'a>, params: &RefineParams) -> Result<Refinement<'a>> {
    let samples = initial.samples();
    let k = initial.class_count();

    // bounds[c]..bounds[c + 1] is class c.
    let mut bounds: Vec<usize> = initial.starts().to_vec();
    bounds.push(samples.len());

    let cost = |lo: usize, hi: usize| samples.range_ssd(lo..hi);

    let mut summary = RefineSummary {
        passes: 0,
        swaps: 0,
        converged: k == 1,
    };

    for _ in 0..params.max_passes {
        if k == 1 {
            break;
        }
        let mut accepted = 0;

        for c in 0..k - 1 {
            let (lo, mid, hi) = (bounds[c], bounds[c + 1], bounds[c + 2]);
            let current = cost(lo, mid) + cost(mid, hi);

            if mid - lo > 1 && cost(lo, mid - 1) + cost(mid - 1, hi) < current {
                bounds[c + 1] = mid - 1;
                accepted += 1;
                continue;
            }
            if hi - mid > 1 && cost(lo, mid + 1) + cost(mid + 1, hi) < current {
                bounds[c + 1] = mid + 1;
                accepted += 1;
            }
        }

        summary.passes += 1;
        summary.swaps += accepted;
        summary.converged = accepted == 0;
        debug!(pass = summary.passes, accepted, "refinement pass");

        if summary.converged && params.stop_on_convergence {
            break;
        }
    }

    bounds.pop();
    let partition = ClassPartition::from_starts(samples, bounds)?;

    Ok(Refinement { partition, summary })
}
