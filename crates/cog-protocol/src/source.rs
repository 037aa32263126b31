//! Raster source collaborator interface.
//!
//! The protocol core never decodes raster files itself. It asks a
//! [`RasterSource`] for decoded band windows and descriptive metadata
//! and treats the answers as authoritative. Decode errors, network
//! failures, caching and retries all live behind this seam.

use std::sync::Arc;

use async_trait::async_trait;

use cog_common::{CogResult, RasterBandSet, RasterMetadata, TileIndex, TileJson};

/// Decoded access to one raster source.
#[async_trait]
pub trait RasterSource: Send + Sync {
    /// Read the decoded band window for a tile.
    ///
    /// Bands come back in source order, all of equal length
    /// tile-width x tile-height.
    async fn raw_tile(&self, tile: TileIndex) -> CogResult<RasterBandSet>;

    /// Describe how raw samples map to physical units.
    async fn metadata(&self) -> CogResult<RasterMetadata>;

    /// Build the tile-grid descriptor for this source.
    ///
    /// `request_url` is the original composite URL of the descriptor
    /// request; implementations embed it in the tile URL template so
    /// the host requests tiles back through the same protocol.
    async fn tilejson(&self, request_url: &str) -> CogResult<TileJson>;
}

/// Opens raster sources by URL.
///
/// Implementations may cache opened sources per URL; the protocol
/// opens one per request and holds it only for that request's
/// lifetime.
pub trait RasterSourceProvider: Send + Sync {
    fn open(&self, url: &str) -> CogResult<Arc<dyn RasterSource>>;
}
