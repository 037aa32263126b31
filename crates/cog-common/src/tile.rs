//! Slippy-map tile addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge length of every served tile, in pixels.
pub const TILE_SIZE: usize = 256;

/// A tile address in the standard z/x/y pyramid.
///
/// Row 0 is the northernmost row, matching the XYZ convention used by
/// map clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

impl TileIndex {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for TileIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}
