//! Coordinate reference system transformations.
//!
//! Web Mercator addresses tiles, WGS84 geographic is the interchange frame
//! and UTM provides raster extents in projected meters. All projections are
//! implemented from scratch without external dependencies.

pub mod mercator;
pub mod tiling;
pub mod utm;

pub use tiling::{TilePixel, TileScheme};
pub use utm::UtmZone;
