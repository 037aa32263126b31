//! Shared types for the COG tile protocol: tile addressing, raster data
//! containers, color scale parameters and the error taxonomy.

pub mod bbox;
pub mod error;
pub mod image;
pub mod raster;
pub mod style;
pub mod tile;
pub mod tilejson;

pub use bbox::Bbox;
pub use error::{CogError, CogResult};
pub use image::TileImage;
pub use raster::{RasterBandSet, RasterMetadata};
pub use style::ColorScaleSpec;
pub use tile::{TileIndex, TILE_SIZE};
pub use tilejson::TileJson;
