//! Breakpoints and reclassification tables from a finished partition

use std::fmt::Write as _;

use natbreaks_core::{ClassPartition, Error, Result};
use serde::{Deserialize, Serialize};

/// Gap inserted between the upper bound of one class and the lower bound of
/// the next in [`ReclassTable::remap_string`].
pub const REMAP_GAP: f64 = 0.000001;

/// Ordered class boundaries: `k + 1` non-decreasing values.
///
/// `breaks[0]` is the smallest sample and `breaks[k]` the largest;
/// `breaks[i + 1]` is the inclusive upper bound of class `i` and the exclusive
/// lower bound of class `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f64>", try_from = "Vec<f64>")]
pub struct Breakpoints(Vec<f64>);

impl TryFrom<Vec<f64>> for Breakpoints {
    type Error = Error;

    fn try_from(breaks: Vec<f64>) -> Result<Self> {
        Self::new(breaks)
    }
}

impl From<Breakpoints> for Vec<f64> {
    fn from(breaks: Breakpoints) -> Self {
        breaks.0
    }
}

impl Breakpoints {
    /// Breakpoints from the actual data values: the minimum of the first
    /// class, then the maximum of every class.
    pub fn from_partition(partition: &ClassPartition<'_>) -> Self {
        let mut breaks = Vec::with_capacity(partition.class_count() + 1);
        breaks.push(partition.samples().min());
        breaks.extend(
            partition
                .classes()
                .map(|class| class[class.len() - 1]),
        );
        Self(breaks)
    }

    /// Validate a caller-supplied breakpoint list
    pub fn new(breaks: Vec<f64>) -> Result<Self> {
        if breaks.len() < 2 {
            return Err(Error::invalid_request(format!(
                "need at least 2 breakpoints, got {}",
                breaks.len()
            )));
        }
        if breaks.iter().any(|b| !b.is_finite()) {
            return Err(Error::invalid_request("breakpoints must be finite"));
        }
        if breaks.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::invalid_request("breakpoints must be non-decreasing"));
        }
        Ok(Self(breaks))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of classes the breakpoints delimit
    pub fn class_count(&self) -> usize {
        self.0.len() - 1
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }
}

/// One row of a reclassification table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReclassEntry {
    /// Lower bound (inclusive for the first class, exclusive otherwise)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
    /// Output label for this class
    pub label: i32,
}

impl ReclassEntry {
    pub fn new(lower: f64, upper: f64, label: i32) -> Self {
        Self { lower, upper, label }
    }
}

/// Value range → class label table, in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReclassTable {
    entries: Vec<ReclassEntry>,
}

impl ReclassTable {
    /// Build a table from breakpoints, labeling classes `1..=k` unless
    /// `labels` (exactly `k` of them) are given.
    pub fn from_breakpoints(breaks: &Breakpoints, labels: Option<&[i32]>) -> Result<Self> {
        let k = breaks.class_count();
        let labels: Vec<i32> = match labels {
            Some(labels) if labels.len() != k => {
                return Err(Error::invalid_request(format!(
                    "{} output labels given for {} classes",
                    labels.len(),
                    k
                )));
            }
            Some(labels) => labels.to_vec(),
            None => (1..=k as i32).collect(),
        };

        let entries = breaks
            .as_slice()
            .windows(2)
            .zip(labels)
            .map(|(w, label)| ReclassEntry::new(w[0], w[1], label))
            .collect();

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ReclassEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of the class containing `value`.
    ///
    /// Classes are closed on the upper end, so a value equal to a breakpoint
    /// belongs to the lower class; with zero-width classes the first of them
    /// wins. Values outside `[breaks[0], breaks[k]]` and NaN have no class.
    pub fn class_of(&self, value: f64) -> Option<i32> {
        let first = self.entries.first()?;
        if !(value >= first.lower) {
            return None;
        }
        let idx = self.entries.partition_point(|e| e.upper < value);
        self.entries.get(idx).map(|e| e.label)
    }

    /// Widen the end classes so the table covers `[min, max]`.
    ///
    /// Breaks drawn from samples rarely reach the extremes of the surface they
    /// are painted back onto; the first class takes everything down to `min`
    /// and the last everything up to `max`. Bounds already wider are kept.
    pub fn extend_to(mut self, min: f64, max: f64) -> Self {
        if let Some(first) = self.entries.first_mut() {
            first.lower = first.lower.min(min);
        }
        if let Some(last) = self.entries.last_mut() {
            last.upper = last.upper.max(max);
        }
        self
    }

    /// The table as `"lower upper label;"` triples with six decimals.
    ///
    /// Each lower bound after the first is the previous upper bound plus
    /// [`REMAP_GAP`], the range-remap syntax external reclassify tools accept.
    pub fn remap_string(&self) -> String {
        let mut out = String::new();
        let mut lower = self.entries.first().map(|e| e.lower).unwrap_or(0.0);
        for entry in &self.entries {
            let _ = write!(out, "{:.6} {:.6} {};", lower, entry.upper, entry.label);
            lower = entry.upper + REMAP_GAP;
        }
        out
    }
}

/// Breakpoints and reclassification table for a finished partition.
pub fn map_breaks(
    partition: &ClassPartition<'_>,
    labels: Option<&[i32]>,
) -> Result<(Breakpoints, ReclassTable)> {
    let breaks = Breakpoints::from_partition(partition);
    let table = ReclassTable::from_breakpoints(&breaks, labels)?;
    Ok((breaks, table))
}
