//! Raster reclassification
//!
//! Paint each cell of a surface with the label of the natural breaks class
//! its value falls in.

use ndarray::Array2;
use natbreaks_core::raster::{Raster, RasterElement};
use natbreaks_core::{Error, Result};

use crate::classification::ReclassTable;
use crate::maybe_rayon::*;

/// Parameters for reclassification
#[derive(Debug, Clone)]
pub struct ReclassifyParams {
    /// Output for valid cells outside every class range (default: NaN)
    pub default_value: f64,
    /// Stretch the first and last classes to the raster's own valid range, so
    /// cells beyond the sampled extremes still get the nearest end class
    /// (default: false)
    pub extend_to_surface: bool,
}

impl Default for ReclassifyParams {
    fn default() -> Self {
        Self {
            default_value: f64::NAN,
            extend_to_surface: false,
        }
    }
}

/// Reclassify raster values through a reclassification table.
///
/// Each valid cell takes the label of the class whose range contains it
/// (ranges closed on the upper end, see [`ReclassTable::class_of`]).
/// No-data cells stay NaN in the output.
///
/// # Example
/// ```ignore
/// let result = natural_breaks(samples.values(), &params)?;
/// let classes = reclassify(&dem, &result.table, ReclassifyParams::default())?;
/// ```
pub fn reclassify<T: RasterElement>(
    raster: &Raster<T>,
    table: &ReclassTable,
    params: ReclassifyParams,
) -> Result<Raster<f64>> {
    let (rows, cols) = raster.shape();
    let default = params.default_value;
    let input = raster.data();

    let extended;
    let table = match raster.value_range() {
        Some((min, max)) if params.extend_to_surface => {
            extended = table.clone().extend_to(min, max);
            &extended
        }
        _ => table,
    };

    let data: Vec<f64> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f64::NAN; cols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let val = input[(row, col)];
                if raster.is_nodata(val) {
                    continue;
                }
                let Some(v) = val.to_sample() else {
                    continue;
                };
                *out = table.class_of(v).map_or(default, f64::from);
            }
            row_data
        })
        .collect();

    let mut output = raster.with_same_meta::<f64>();
    output.set_nodata(Some(f64::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::{natural_breaks, Breakpoints, BreaksParams};
    use crate::sampling::sample_at_points;
    use natbreaks_core::GeoTransform;

    fn make_surface() -> Raster<f64> {
        let values = vec![
            1.0, 2.0, 3.0, //
            4.0, 5.0, 100.0, //
            0.0, 150.0, f64::NAN,
        ];
        let mut r = Raster::from_vec(values, 3, 3).unwrap();
        r.set_transform(GeoTransform::new(0.0, 3.0, 1.0, -1.0));
        r
    }

    fn table() -> ReclassTable {
        let breaks = Breakpoints::new(vec![1.0, 5.0, 100.0]).unwrap();
        ReclassTable::from_breakpoints(&breaks, None).unwrap()
    }

    #[test]
    fn test_reclassify_classes() {
        let result = reclassify(&make_surface(), &table(), ReclassifyParams::default()).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), 1.0);
        assert_eq!(result.get(1, 1).unwrap(), 1.0);
        assert_eq!(result.get(1, 2).unwrap(), 2.0);
    }

    #[test]
    fn test_reclassify_out_of_range() {
        let params = ReclassifyParams {
            default_value: 0.0,
            ..Default::default()
        };
        let result = reclassify(&make_surface(), &table(), params).unwrap();
        assert_eq!(result.get(2, 0).unwrap(), 0.0);
        assert_eq!(result.get(2, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_reclassify_nodata() {
        let result = reclassify(&make_surface(), &table(), ReclassifyParams::default()).unwrap();
        assert!(result.get(2, 2).unwrap().is_nan());
        assert_eq!(result.transform(), make_surface().transform());
    }

    #[test]
    fn test_reclassify_surface_wider_than_samples() {
        let mut r = Raster::from_vec(vec![1.0, 2.0, 3.0, 50.0, 60.0, 120.0], 2, 3).unwrap();
        r.set_transform(GeoTransform::new(0.0, 2.0, 1.0, -1.0));
        let params = BreaksParams {
            class_count: 2,
            ..Default::default()
        };
        let samples = sample_at_points(&r, &[(1.5, 1.5), (2.5, 1.5), (0.5, 0.5), (1.5, 0.5)]).unwrap();
        let result = natural_breaks(samples.values(), &params).unwrap();
        assert_eq!(result.breaks.as_slice(), &[2.0, 3.0, 60.0]);

        let clipped = reclassify(&r, &result.table, ReclassifyParams::default()).unwrap();
        assert!(clipped.get(0, 0).unwrap().is_nan());
        assert!(clipped.get(1, 2).unwrap().is_nan());

        let params = ReclassifyParams {
            extend_to_surface: true,
            ..Default::default()
        };
        let extended = reclassify(&r, &result.table, params).unwrap();
        let labels: Vec<f64> = extended.data().iter().copied().collect();
        assert_eq!(labels, vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_reclassify_integer_surface() {
        let mut r = Raster::from_vec(vec![1_i16, 1, 1, 5, 5, 5, 9, 9, -1], 3, 3).unwrap();
        r.set_nodata(Some(-1));
        let params = BreaksParams {
            class_count: 3,
            output_labels: Some(vec![10, 50, 90]),
            ..Default::default()
        };
        let breaks = natural_breaks(&[1.0, 1.0, 1.0, 5.0, 5.0, 5.0, 9.0, 9.0], &params).unwrap();
        let result = reclassify(&r, &breaks.table, ReclassifyParams::default()).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), 10.0);
        assert_eq!(result.get(1, 0).unwrap(), 50.0);
        assert_eq!(result.get(2, 1).unwrap(), 90.0);
        assert!(result.get(2, 2).unwrap().is_nan());
    }
}
