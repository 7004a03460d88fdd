//! Drawing sample values from a raster surface
//!
//! Cells holding no-data, NaN or infinite values never become samples.

use natbreaks_core::raster::{Raster, RasterElement};
use natbreaks_core::{Error, Result, SortedSampleSet};
use tracing::debug;

/// Parameters for whole-raster sampling
#[derive(Debug, Clone, Default)]
pub struct SampleParams {
    /// Keep at most this many samples, evenly spaced over the valid cells in
    /// row-major order. `None` keeps every valid cell. Bounding the count keeps
    /// the exact classifier's quadratic cost in check on large surfaces.
    pub max_samples: Option<usize>,
}

/// Sample the valid cells of `raster`.
pub fn sample_raster<T: RasterElement>(
    raster: &Raster<T>,
    params: &SampleParams,
) -> Result<SortedSampleSet> {
    if params.max_samples == Some(0) {
        return Err(Error::InvalidParameter {
            name: "max_samples",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }

    let valid: Vec<f64> = raster
        .data()
        .iter()
        .filter(|&&v| !raster.is_nodata(v))
        .filter_map(|&v| v.to_sample())
        .collect();

    let values = match params.max_samples {
        Some(max) if valid.len() > max => {
            let m = valid.len();
            (0..max).map(|i| valid[i * m / max]).collect()
        }
        _ => valid,
    };

    debug!(cells = raster.len(), samples = values.len(), "sampled raster");
    non_empty(values)
}

/// Sample `raster` under observation locations given in map coordinates.
///
/// Points outside the grid or over no-data cells are skipped.
pub fn sample_at_points<T: RasterElement>(
    raster: &Raster<T>,
    points: &[(f64, f64)],
) -> Result<SortedSampleSet> {
    let values: Vec<f64> = points
        .iter()
        .filter_map(|&(x, y)| raster.value_at(x, y))
        .filter(|&v| !raster.is_nodata(v))
        .filter_map(|v| v.to_sample())
        .collect();

    debug!(
        points = points.len(),
        skipped = points.len() - values.len(),
        "sampled raster at observation points"
    );
    non_empty(values)
}

fn non_empty(values: Vec<f64>) -> Result<SortedSampleSet> {
    if values.is_empty() {
        return Err(Error::invalid_request("no valid samples found"));
    }
    SortedSampleSet::new(values)
}
