//! COG tile protocol implementation.
//!
//! Parses composite `cog://` request URLs, fetches decoded raster data
//! through the [`RasterSource`] collaborator trait and renders tiles
//! with the matching renderer:
//! - `json` requests resolve to a TileJSON descriptor
//! - `image` requests resolve to a rendered 256x256 RGBA tile

pub mod dispatch;
pub mod request;
pub mod sampling;
pub mod source;

pub use dispatch::{primary_source_url, CogProtocol, ProtocolResponse};
pub use request::{RenderMode, RenderRequest, RequestKind};
pub use sampling::location_values;
pub use source::{RasterSource, RasterSourceProvider};
