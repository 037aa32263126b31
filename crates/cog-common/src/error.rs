//! Error taxonomy for the COG tile protocol.

use thiserror::Error;

/// Convenience alias for protocol results.
pub type CogResult<T> = Result<T, CogError>;

/// Errors produced while parsing and serving `cog://` requests.
///
/// Per-pixel sentinels (no-data, NaN, infinities) are not errors; they
/// render as transparent pixels instead.
#[derive(Error, Debug)]
pub enum CogError {
    // === Request Errors ===
    /// Request string does not match `cog://<url>/<z>/<x>/<y>`.
    #[error("Invalid COG protocol URL '{0}'")]
    MalformedRequest(String),

    /// Request kind other than "json" or "image".
    #[error("Unsupported request kind '{0}'")]
    UnsupportedKind(String),

    // === Color Scale Errors ===
    /// A color fragment was present but carried no parameters.
    #[error("Color params are not defined")]
    MissingColorParams,

    /// Color parameters that cannot be compiled into a scale.
    #[error("Invalid color scale: {0}")]
    InvalidColorScale(String),

    // === Rendering Errors ===
    /// Treatment request without a second source URL.
    #[error("Treatment mode requires a second source URL")]
    MissingSecondarySource,

    /// A renderer was fed fewer bands than its mode consumes.
    #[error("Band count mismatch: expected {expected} bands, got {got}")]
    BandCountMismatch { expected: usize, got: usize },

    /// Bands of different lengths cannot be combined per pixel.
    #[error("Band length mismatch: {left} vs {right} samples")]
    BandLengthMismatch { left: usize, right: usize },

    /// PNG encoding failure.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    // === Source Errors ===
    /// Failure reported by a raster source implementation.
    #[error("Raster source error: {0}")]
    Source(String),
}

impl From<serde_json::Error> for CogError {
    fn from(err: serde_json::Error) -> Self {
        CogError::Source(err.to_string())
    }
}
