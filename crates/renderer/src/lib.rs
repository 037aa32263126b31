//! Image rendering for COG tile visualization.
//!
//! Implements the four tile rendering modes:
//! - Photo (natural color from the first three bands)
//! - Terrain-RGB elevation encoding
//! - Color scale mapping of a single band
//! - Treatment (two-source normalized difference)
//!
//! plus color scale evaluation and PNG encoding of the results.

pub mod png;
pub mod raster;
pub mod scale;

pub use raster::{render_color, render_photo, render_terrain, render_treatment};
pub use scale::{ColorScale, Rgb};
