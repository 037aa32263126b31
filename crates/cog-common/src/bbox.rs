//! Planar bounding boxes.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in a planar CRS.
///
/// Coordinates are (x, y) pairs in whatever units the producing projection
/// uses; the projection routines document which CRS applies. For geographic
/// boxes x is longitude and y is latitude, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bbox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// `[min_x, min_y, max_x, max_y]`, the order used by TileJSON bounds.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}
