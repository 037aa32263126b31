//! Point queries against a raster source.

use tracing::debug;

use cog_common::CogResult;
use projection::TileScheme;

use crate::source::RasterSource;

/// Physical value of every band at a geographic point.
///
/// The zoom is clamped into the source's TileJSON zoom range and
/// defaults to the maximum. Returns one value per band, in band order;
/// a no-data sample or a point outside the decoded window reads as NaN.
pub async fn location_values(
    source: &dyn RasterSource,
    scheme: &TileScheme,
    request_url: &str,
    lat: f64,
    lon: f64,
    zoom: Option<u32>,
) -> CogResult<Vec<f64>> {
    let descriptor = source.tilejson(request_url).await?;
    let zoom = match zoom {
        Some(z) => z
            .min(u32::from(descriptor.maxzoom))
            .max(u32::from(descriptor.minzoom)),
        None => u32::from(descriptor.maxzoom),
    };

    let pixel = scheme.tile_pixel_from_lat_lon(lat, lon, zoom);
    debug!(
        lat,
        lon,
        zoom,
        z = pixel.tile.z,
        x = pixel.tile.x,
        y = pixel.tile.y,
        row = pixel.row,
        column = pixel.column,
        "sampling location"
    );

    let (bands, metadata) =
        tokio::try_join!(source.raw_tile(pixel.tile), source.metadata())?;

    let index = (pixel.row * scheme.tile_size() + pixel.column) as usize;
    let values = bands
        .iter()
        .map(|band| match band.get(index) {
            Some(&raw) if !metadata.is_no_data(raw) => metadata.physical(raw),
            _ => f64::NAN,
        })
        .collect();

    Ok(values)
}
