//! Satellite raster loading, band selection and rendering

/// Viridis colormap lookup
pub mod colormap;
/// TIFF band metadata and per-band decoding
pub mod dataset;
/// GDAL band description and nodata tags
pub mod metadata;
/// Figure rendering for a single band
pub mod render;
/// NIR-preferring display band selection
pub mod selection;

pub use dataset::{Band, BandInfo, Raster, SampleType};
pub use selection::{BandSelection, SelectionReason, choose_display_band};
