//! Request dispatch.
//!
//! [`CogProtocol`] is the protocol front door. It parses a composite
//! request URL, fetches decoded raster data through the
//! [`RasterSourceProvider`] seam and hands the bands to the renderer
//! matching the request's mode. Each request is independent; the only
//! state here is the provider and the tiling scheme.

use std::sync::Arc;

use tracing::info;

use cog_common::{CogError, CogResult, TileImage, TileJson, TILE_SIZE};
use projection::TileScheme;
use renderer::{render_color, render_photo, render_terrain, render_treatment};

use crate::request::{RenderMode, RenderRequest, RequestKind};
use crate::sampling;
use crate::source::RasterSourceProvider;

/// What a protocol request resolves to.
#[derive(Debug, Clone)]
pub enum ProtocolResponse {
    /// Tile-grid descriptor, for `json` requests.
    TileJson(TileJson),
    /// Rendered tile, for `image` requests.
    Image(TileImage),
}

/// Protocol entry point.
pub struct CogProtocol {
    provider: Arc<dyn RasterSourceProvider>,
    scheme: TileScheme,
}

impl CogProtocol {
    /// Protocol over a source provider, with the default tiling scheme.
    pub fn new(provider: Arc<dyn RasterSourceProvider>) -> Self {
        Self {
            provider,
            scheme: TileScheme::new(),
        }
    }

    /// Replace the tiling scheme, usually to change the UTM zone.
    pub fn with_scheme(mut self, scheme: TileScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn scheme(&self) -> &TileScheme {
        &self.scheme
    }

    /// Serve one request of the given kind.
    pub async fn handle(&self, kind: &str, url: &str) -> CogResult<ProtocolResponse> {
        match RequestKind::parse(kind)? {
            RequestKind::Json => Ok(ProtocolResponse::TileJson(self.descriptor(url).await?)),
            RequestKind::Image => Ok(ProtocolResponse::Image(self.render_tile(url).await?)),
        }
    }

    /// Tile-grid descriptor for the primary source of a request URL.
    ///
    /// The source sees the original URL so it can template tile
    /// requests back through the protocol, fragment included.
    pub async fn descriptor(&self, url: &str) -> CogResult<TileJson> {
        let source = self.provider.open(primary_source_url(url))?;
        source.tilejson(url).await
    }

    /// Render one tile from a composite request URL.
    pub async fn render_tile(&self, url: &str) -> CogResult<TileImage> {
        let request = RenderRequest::parse(url)?;
        let tile = request.tile;
        info!(
            url = request.url.as_str(),
            z = tile.z,
            x = tile.x,
            y = tile.y,
            mode = request.mode.name(),
            "rendering tile"
        );

        let source = self.provider.open(&request.url)?;

        let rgba = match &request.mode {
            RenderMode::Photo => {
                let (bands, metadata) =
                    tokio::try_join!(source.raw_tile(tile), source.metadata())?;
                render_photo(&bands, &metadata)?
            }
            RenderMode::Dem => {
                let (bands, metadata) =
                    tokio::try_join!(source.raw_tile(tile), source.metadata())?;
                render_terrain(&bands, &metadata)?
            }
            RenderMode::Color(spec) => {
                let (bands, metadata) =
                    tokio::try_join!(source.raw_tile(tile), source.metadata())?;
                render_color(&bands, &metadata, spec)?
            }
            RenderMode::Treatment {
                secondary_url,
                scale,
            } => {
                let secondary = self.provider.open(secondary_url)?;
                // The secondary source contributes only band data; the
                // offset/scale/no-data description comes from the
                // primary.
                let (bands, metadata, bands2) = tokio::try_join!(
                    source.raw_tile(tile),
                    source.metadata(),
                    secondary.raw_tile(tile),
                )?;
                render_treatment(&bands, &bands2, &metadata, scale)?
            }
        };

        if rgba.len() != TILE_SIZE * TILE_SIZE * 4 {
            return Err(CogError::Source(format!(
                "raster window has {} samples, expected {}",
                rgba.len() / 4,
                TILE_SIZE * TILE_SIZE
            )));
        }

        Ok(TileImage::new(TILE_SIZE as u32, TILE_SIZE as u32, rgba))
    }

    /// Physical values of every band at a geographic point.
    pub async fn location_values(
        &self,
        url: &str,
        lat: f64,
        lon: f64,
        zoom: Option<u32>,
    ) -> CogResult<Vec<f64>> {
        let source = self.provider.open(primary_source_url(url))?;
        sampling::location_values(source.as_ref(), &self.scheme, url, lat, lon, zoom).await
    }
}

/// The primary raster URL of a composite request URL: scheme, fragment
/// and any secondary source stripped.
pub fn primary_source_url(url: &str) -> &str {
    let rest = url.strip_prefix("cog://").unwrap_or(url);
    let sources = rest.split_once('#').map_or(rest, |(sources, _)| sources);
    sources.split_once('|').map_or(sources, |(primary, _)| primary)
}
