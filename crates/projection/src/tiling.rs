//! Tile scheme: conversions between tile indices, pixels and CRS extents.

use cog_common::{Bbox, TileIndex, TILE_SIZE};

use crate::mercator::{self, MAX_EXTENT, ORIGIN_SHIFT};
use crate::utm::UtmZone;

/// Position of a geographic point inside the pyramid at one zoom: the tile
/// holding it plus the pixel row/column within that tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePixel {
    pub tile: TileIndex,
    pub row: u32,
    pub column: u32,
}

/// Pyramid configuration: tile size plus the UTM zone used when raster
/// extents are wanted in projected meters.
///
/// Bbox reprojections transform the two corners independently. That is an
/// approximation (the true edges curve), but it is exact at the corners and
/// is what the raster readers expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileScheme {
    tile_size: u32,
    utm: UtmZone,
}

impl TileScheme {
    /// 256 px tiles with UTM zone 31N.
    pub fn new() -> Self {
        Self {
            tile_size: TILE_SIZE as u32,
            utm: UtmZone::zone_31_north(),
        }
    }

    /// Same pyramid with a different UTM zone.
    pub fn with_utm_zone(utm: UtmZone) -> Self {
        Self {
            tile_size: TILE_SIZE as u32,
            utm,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn utm_zone(&self) -> &UtmZone {
        &self.utm
    }

    /// Mercator extent of a tile.
    pub fn tile_mercator_bbox(&self, tile: TileIndex) -> Bbox {
        mercator::tile_bbox(tile.z, tile.x, tile.y)
    }

    /// UTM extent of a tile.
    pub fn tile_utm_bbox(&self, tile: TileIndex) -> Bbox {
        self.mercator_bbox_to_utm(&self.tile_mercator_bbox(tile))
    }

    /// Geographic extent of a mercator box.
    pub fn mercator_bbox_to_geographic(&self, bbox: &Bbox) -> Bbox {
        let (min_lon, min_lat) = mercator::mercator_to_geographic(bbox.min_x, bbox.min_y);
        let (max_lon, max_lat) = mercator::mercator_to_geographic(bbox.max_x, bbox.max_y);
        Bbox::new(min_lon, min_lat, max_lon, max_lat)
    }

    /// UTM extent of a mercator box, via the geographic frame.
    pub fn mercator_bbox_to_utm(&self, bbox: &Bbox) -> Bbox {
        self.geographic_bbox_to_utm(&self.mercator_bbox_to_geographic(bbox))
    }

    /// UTM extent of a geographic box.
    pub fn geographic_bbox_to_utm(&self, bbox: &Bbox) -> Bbox {
        let (min_x, min_y) = self.utm.forward(bbox.min_x, bbox.min_y);
        let (max_x, max_y) = self.utm.forward(bbox.max_x, bbox.max_y);
        Bbox::new(min_x, min_y, max_x, max_y)
    }

    /// Geographic extent of a UTM box.
    pub fn utm_bbox_to_geographic(&self, bbox: &Bbox) -> Bbox {
        let (min_lon, min_lat) = self.utm.inverse(bbox.min_x, bbox.min_y);
        let (max_lon, max_lat) = self.utm.inverse(bbox.max_x, bbox.max_y);
        Bbox::new(min_lon, min_lat, max_lon, max_lat)
    }

    /// Fractional zoom whose nominal resolution matches `resolution` meters
    /// per pixel. Callers round or clamp as needed.
    pub fn zoom_from_resolution(&self, resolution: f64) -> f64 {
        (MAX_EXTENT / (f64::from(self.tile_size) * resolution)).log2()
    }

    /// Tile and intra-tile pixel containing a geographic point.
    pub fn tile_pixel_from_lat_lon(&self, lat: f64, lon: f64, zoom: u32) -> TilePixel {
        let (mx, my) = mercator::geographic_to_mercator(lon, lat);
        let size = f64::from(self.tile_size);
        let world = size * f64::powi(2.0, zoom as i32);

        let pixel_x = (mx + ORIGIN_SHIFT) / MAX_EXTENT * world;
        let pixel_y = -(my - ORIGIN_SHIFT) / MAX_EXTENT * world;

        TilePixel {
            tile: TileIndex::new(
                zoom,
                (pixel_x / size).floor() as u32,
                (pixel_y / size).floor() as u32,
            ),
            row: (pixel_y % size).floor() as u32,
            column: (pixel_x % size).floor() as u32,
        }
    }
}

impl Default for TileScheme {
    fn default() -> Self {
        Self::new()
    }
}
