//! Raster export (JPEG, PNG).

pub mod raster;
