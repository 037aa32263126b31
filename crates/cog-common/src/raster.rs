//! Decoded raster data and per-source value metadata.

use serde::{Deserialize, Serialize};

/// A decoded raster window: one f64 sample array per band.
///
/// Bands are row-major and all of equal length; renderers reject sets that
/// violate that rather than index past a short band.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBandSet {
    bands: Vec<Vec<f64>>,
}

impl RasterBandSet {
    pub fn new(bands: Vec<Vec<f64>>) -> Self {
        Self { bands }
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Samples of one band, by zero-based index.
    pub fn band(&self, index: usize) -> Option<&[f64]> {
        self.bands.get(index).map(Vec::as_slice)
    }

    /// Sample count of the first band, zero for an empty set.
    pub fn samples_per_band(&self) -> usize {
        self.bands.first().map_or(0, Vec::len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.bands.iter().map(Vec::as_slice)
    }
}

/// Sample-to-physical mapping and the no-data sentinel of a source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterMetadata {
    pub offset: f64,
    pub scale: f64,
    pub no_data: Option<f64>,
}

impl RasterMetadata {
    /// physical = offset + raw * scale
    pub fn physical(&self, raw: f64) -> f64 {
        self.offset + raw * self.scale
    }

    /// Exact equality against the sentinel; a NaN sentinel matches nothing.
    pub fn is_no_data(&self, value: f64) -> bool {
        self.no_data.map_or(false, |nd| value == nd)
    }
}

impl Default for RasterMetadata {
    fn default() -> Self {
        Self {
            offset: 0.0,
            scale: 1.0,
            no_data: None,
        }
    }
}
