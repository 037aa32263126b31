//! Web Mercator (EPSG:3857) point mapping and tile extents.

use cog_common::Bbox;

/// Spherical earth radius used by Web Mercator, meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Mercator coordinate of the projection edge, meters.
///
/// The world square spans `[-ORIGIN_SHIFT, ORIGIN_SHIFT]` on both axes.
pub const ORIGIN_SHIFT: f64 = 20_037_508.342_789_244;

/// Full world width in mercator meters.
pub const MAX_EXTENT: f64 = 2.0 * ORIGIN_SHIFT;

/// Geographic (lon, lat) degrees to mercator (x, y) meters.
///
/// Outputs clamp to the world square, so poleward latitudes land on the
/// top or bottom edge instead of diverging. NaN inputs pass through.
pub fn geographic_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS
        * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
            .tan()
            .ln();
    (
        x.clamp(-ORIGIN_SHIFT, ORIGIN_SHIFT),
        y.clamp(-ORIGIN_SHIFT, ORIGIN_SHIFT),
    )
}

/// Mercator (x, y) meters to geographic (lon, lat) degrees.
pub fn mercator_to_geographic(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS).to_degrees();
    let lat = (std::f64::consts::FRAC_PI_2 - 2.0 * (-y / EARTH_RADIUS).exp().atan()).to_degrees();
    (lon, lat)
}

/// Mercator extent of a tile. Row 0 is the top of the world, so the world
/// corners come out exact at every zoom.
pub fn tile_bbox(z: u32, x: u32, y: u32) -> Bbox {
    let tiles = f64::powi(2.0, z as i32);
    let span = MAX_EXTENT / tiles;
    let min_x = -ORIGIN_SHIFT + x as f64 * span;
    let max_y = ORIGIN_SHIFT - y as f64 * span;
    Bbox::new(min_x, max_y - span, min_x + span, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn test_equator_origin_maps_to_zero() {
        let (x, y) = geographic_to_mercator(0.0, 0.0);
        assert!(x.abs() < EPSILON);
        assert!(y.abs() < EPSILON);
    }

    #[test]
    fn test_antimeridian_maps_to_world_edge() {
        let (x, _) = geographic_to_mercator(180.0, 0.0);
        assert!((x - ORIGIN_SHIFT).abs() < 1e-3, "x = {}", x);
    }

    #[test]
    fn test_pole_clamps_to_world_edge() {
        let (_, y) = geographic_to_mercator(0.0, 90.0);
        assert_eq!(y, ORIGIN_SHIFT);
        let (_, y) = geographic_to_mercator(0.0, -90.0);
        assert_eq!(y, -ORIGIN_SHIFT);
    }

    #[test]
    fn test_point_round_trip() {
        for &(lon, lat) in &[(2.17, 41.38), (-3.7, 40.4), (151.2, -33.87), (0.0, 0.0)] {
            let (x, y) = geographic_to_mercator(lon, lat);
            let (lon2, lat2) = mercator_to_geographic(x, y);
            assert!((lon - lon2).abs() < EPSILON, "lon {} vs {}", lon, lon2);
            assert!((lat - lat2).abs() < EPSILON, "lat {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_zoom_zero_tile_covers_the_world() {
        let bbox = tile_bbox(0, 0, 0);
        assert_eq!(bbox.min_x, -ORIGIN_SHIFT);
        assert_eq!(bbox.min_y, -ORIGIN_SHIFT);
        assert_eq!(bbox.max_x, ORIGIN_SHIFT);
        assert_eq!(bbox.max_y, ORIGIN_SHIFT);
    }

    #[test]
    fn test_zoom_one_quadrants() {
        // Top-left quadrant.
        let bbox = tile_bbox(1, 0, 0);
        assert_eq!(bbox.min_x, -ORIGIN_SHIFT);
        assert_eq!(bbox.max_x, 0.0);
        assert_eq!(bbox.min_y, 0.0);
        assert_eq!(bbox.max_y, ORIGIN_SHIFT);

        // Bottom-right quadrant.
        let bbox = tile_bbox(1, 1, 1);
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.max_x, ORIGIN_SHIFT);
        assert_eq!(bbox.min_y, -ORIGIN_SHIFT);
        assert_eq!(bbox.max_y, 0.0);
    }

    #[test]
    fn test_neighbor_tiles_share_edges() {
        let left = tile_bbox(5, 10, 12);
        let right = tile_bbox(5, 11, 12);
        let below = tile_bbox(5, 10, 13);
        assert_eq!(left.max_x, right.min_x);
        assert_eq!(left.min_y, below.max_y);
    }
}
