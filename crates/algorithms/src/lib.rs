//! # natbreaks algorithms
//!
//! Natural breaks classification and its raster collaborators.
//!
//! - **classification**: exact Fisher-Jenks, local-search refinement,
//!   equal-interval and quantile seeds, breakpoints and reclass tables
//! - **sampling**: draw sample values from a raster surface
//! - **reclassify**: paint class labels back onto a raster

pub mod classification;
pub mod reclassify;
pub mod sampling;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classification::{
        equal_interval, exact_partition, map_breaks, natural_breaks, quantile, refine,
        Breakpoints, BreaksParams, Classification, ExactPartitioner, InitialStrategy,
        LocalSearchRefiner, Method, ReclassEntry, ReclassTable, RefineParams,
    };
    pub use crate::reclassify::{reclassify, ReclassifyParams};
    pub use crate::sampling::{sample_at_points, sample_raster, SampleParams};
    pub use natbreaks_core::prelude::*;
}
