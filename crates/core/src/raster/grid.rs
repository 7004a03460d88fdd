//! Main Raster type

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, RasterElement};
use ndarray::Array2;

/// A georeferenced 2D grid of cell values stored row-major as (row, col).
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    data: Array2<T>,
    transform: GeoTransform,
    nodata: Option<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Create a new raster filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    /// Create a new raster filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    /// Create a raster from row-major values
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;
        Ok(Self::from_array(array))
    }

    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            nodata: None,
        }
    }

    /// A zero-filled raster with this raster's transform and a different
    /// cell type
    pub fn with_same_meta<U: RasterElement>(&self) -> Raster<U> {
        Raster {
            data: Array2::zeros(self.data.dim()),
            transform: self.transform,
            nodata: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        match self.data.get_mut((row, col)) {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            }),
        }
    }

    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Check if a value is no-data for this raster
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    /// Value of the cell under a map location, `None` outside the grid
    pub fn value_at(&self, x: f64, y: f64) -> Option<T> {
        let (rows, cols) = self.shape();
        self.transform
            .cell_at(x, y, rows, cols)
            .map(|(row, col)| self.data[(row, col)])
    }

    /// Smallest and largest valid cell as samples, `None` when no cell is valid
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .filter(|&&v| !self.is_nodata(v))
            .filter_map(|&v| v.to_sample())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster: Raster<f32> = Raster::new(100, 200);
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
    }

    #[test]
    fn test_raster_access() {
        let mut raster: Raster<f64> = Raster::new(10, 10);
        raster.set(5, 5, 42.0).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 42.0);
        assert!(raster.get(10, 0).is_err());
        assert!(raster.set(0, 10, 1.0).is_err());
    }

    #[test]
    fn test_from_vec_dimension_check() {
        assert!(Raster::from_vec(vec![1.0_f64; 5], 2, 3).is_err());
        let r = Raster::from_vec(vec![1_i32, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(r.get(1, 0).unwrap(), 4);
    }

    #[test]
    fn test_value_at() {
        let mut r = Raster::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
        r.set_transform(GeoTransform::new(0.0, 2.0, 1.0, -1.0));
        assert_eq!(r.value_at(1.5, 1.5), Some(2.0));
        assert_eq!(r.value_at(0.5, 0.5), Some(3.0));
        assert_eq!(r.value_at(5.0, 0.5), None);
    }

    #[test]
    fn test_value_range() {
        let mut r = Raster::from_vec(vec![4_i16, -3, 12, -9999], 2, 2).unwrap();
        assert_eq!(r.value_range(), Some((-9999.0, 12.0)));
        r.set_nodata(Some(-9999));
        assert_eq!(r.value_range(), Some((-3.0, 12.0)));

        let empty = Raster::filled(2, 2, f64::NAN);
        assert_eq!(empty.value_range(), None);
    }
}
