//! # natbreaks core
//!
//! Core types for natural breaks classification.
//!
//! This crate provides:
//! - `SortedSampleSet` and `ClassStatistics`: sorted observations with O(1)
//!   run statistics
//! - `ClassPartition`: contiguous class splits scored by within-class variance
//! - `Raster<T>` and `GeoTransform`: in-memory grids to sample from and
//!   reclassify into
//! - The `Classifier` trait shared by every partitioning strategy

pub mod error;
pub mod partition;
pub mod raster;
pub mod samples;

pub use error::{Error, Result};
pub use partition::ClassPartition;
pub use raster::{GeoTransform, Raster, RasterElement};
pub use samples::{ClassStatistics, SortedSampleSet};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::partition::ClassPartition;
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
    pub use crate::samples::{ClassStatistics, SortedSampleSet};
    pub use crate::Classifier;
}

/// A strategy that splits sorted samples into `class_count` contiguous,
/// variance-minimizing classes.
pub trait Classifier {
    /// Returns the classifier name
    fn name(&self) -> &'static str;

    /// Returns a description of what the classifier does
    fn description(&self) -> &'static str;

    /// Partition `samples` into exactly `class_count` classes.
    ///
    /// Fails with [`Error::InvalidPartitionRequest`] when `class_count` is 0
    /// or exceeds the number of samples.
    fn classify<'a>(
        &self,
        samples: &'a SortedSampleSet,
        class_count: usize,
    ) -> Result<ClassPartition<'a>>;
}

/// Check that `class_count` classes can be drawn from `samples`
pub fn validate_class_count(samples: &SortedSampleSet, class_count: usize) -> Result<()> {
    if class_count < 1 {
        return Err(Error::invalid_request("class count must be at least 1"));
    }
    if class_count > samples.len() {
        return Err(Error::invalid_request(format!(
            "class count {} exceeds sample count {}",
            class_count,
            samples.len()
        )));
    }
    Ok(())
}
