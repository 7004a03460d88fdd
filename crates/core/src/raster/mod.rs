//! In-memory raster grids
//!
//! Just enough of a georeferenced grid to sample a surface and paint class
//! labels back onto it; reading and writing raster files is left to callers.

mod element;
mod geotransform;
mod grid;

pub use element::RasterElement;
pub use geotransform::GeoTransform;
pub use grid::Raster;
