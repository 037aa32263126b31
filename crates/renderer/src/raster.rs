//! Per-mode tile renderers.
//!
//! Each renderer is a pure function from decoded band data to a row-major
//! RGBA buffer, four bytes per sample. Numeric edge cases at the pixel
//! level (no-data, NaN, infinities) become transparent pixels, never
//! errors; structural problems (missing bands, unequal band lengths) do
//! error.

use tracing::trace;

use cog_common::{CogError, CogResult, ColorScaleSpec, RasterBandSet, RasterMetadata};

use crate::scale::ColorScale;

/// Terrain-RGB base elevation, meters.
const TERRAIN_BASE: f64 = -10_000.0;

/// Terrain-RGB height resolution, meters per step.
const TERRAIN_INTERVAL: f64 = 0.1;

/// Scaling factor applied to the treatment normalized difference.
const TREATMENT_FACTOR: f64 = 10_000.0;

/// Physical value the treatment mode renders as transparent, in addition
/// to the source's own no-data sentinel.
const TREATMENT_SENTINEL: f64 = -0.1;

fn first_band(data: &RasterBandSet) -> CogResult<&[f64]> {
    data.band(0).ok_or(CogError::BandCountMismatch {
        expected: 1,
        got: 0,
    })
}

fn check_band_lengths(left: &[f64], right: &[f64]) -> CogResult<()> {
    if left.len() != right.len() {
        return Err(CogError::BandLengthMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(())
}

/// Quantize a sample to one byte, clamping to the displayable range.
/// NaN quantizes to 0.
fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Natural-color rendering of the first three bands.
///
/// Samples pass straight through as 8-bit channel values; a pixel turns
/// transparent only when its red, green and blue samples all equal the
/// no-data sentinel.
pub fn render_photo(data: &RasterBandSet, metadata: &RasterMetadata) -> CogResult<Vec<u8>> {
    let (red, green, blue) = match (data.band(0), data.band(1), data.band(2)) {
        (Some(r), Some(g), Some(b)) => (r, g, b),
        _ => {
            return Err(CogError::BandCountMismatch {
                expected: 3,
                got: data.band_count(),
            })
        }
    };
    check_band_lengths(red, green)?;
    check_band_lengths(red, blue)?;

    let pixels = red.len();
    let mut rgba = vec![0u8; pixels * 4];
    for i in 0..pixels {
        if metadata.is_no_data(red[i])
            && metadata.is_no_data(green[i])
            && metadata.is_no_data(blue[i])
        {
            continue;
        }
        let idx = i * 4;
        rgba[idx] = clamp_channel(red[i]);
        rgba[idx + 1] = clamp_channel(green[i]);
        rgba[idx + 2] = clamp_channel(blue[i]);
        rgba[idx + 3] = 255;
    }

    Ok(rgba)
}

/// Terrain-RGB encoding of the first band.
///
/// Packs physical elevation into the channels so that clients recover it
/// as `-10000 + ((R * 256 * 256 + G * 256 + B) * 0.1)`. No-data and NaN
/// elevations are transparent.
pub fn render_terrain(data: &RasterBandSet, metadata: &RasterMetadata) -> CogResult<Vec<u8>> {
    let band = first_band(data)?;

    let pixels = band.len();
    let mut rgba = vec![0u8; pixels * 4];
    for i in 0..pixels {
        let elevation = metadata.physical(band[i]);
        if metadata.is_no_data(elevation) || elevation.is_nan() {
            continue;
        }
        let steps = (elevation - TERRAIN_BASE) / TERRAIN_INTERVAL;
        let idx = i * 4;
        rgba[idx] = clamp_channel((steps / 65_536.0).floor() % 256.0);
        rgba[idx + 1] = clamp_channel((steps / 256.0).floor() % 256.0);
        rgba[idx + 2] = clamp_channel(steps.floor() % 256.0);
        rgba[idx + 3] = 255;
    }

    Ok(rgba)
}

/// Color scale rendering of the first band.
///
/// Each sample maps to physical units and through the compiled scale.
/// No-data, NaN and infinite physical values are transparent.
pub fn render_color(
    data: &RasterBandSet,
    metadata: &RasterMetadata,
    spec: &ColorScaleSpec,
) -> CogResult<Vec<u8>> {
    let band = first_band(data)?;
    let scale = ColorScale::new(spec)?;

    let pixels = band.len();
    let mut rgba = vec![0u8; pixels * 4];
    for i in 0..pixels {
        let value = metadata.physical(band[i]);
        if metadata.is_no_data(value) || value.is_nan() || value.is_infinite() {
            continue;
        }
        let color = scale.color_at(value);
        let idx = i * 4;
        rgba[idx] = color.r;
        rgba[idx + 1] = color.g;
        rgba[idx + 2] = color.b;
        rgba[idx + 3] = 255;
    }

    Ok(rgba)
}

/// Two-source normalized-difference rendering through a color scale.
///
/// Per pixel, `diff = (a - b) / (a + b) * 10000`, with the denominator
/// replaced by 1 when the sum is zero or NaN, then the source's
/// offset/scale transform applies. The result is transparent when it is
/// no-data, NaN, infinite or exactly -0.1.
pub fn render_treatment(
    data: &RasterBandSet,
    data2: &RasterBandSet,
    metadata: &RasterMetadata,
    spec: &ColorScaleSpec,
) -> CogResult<Vec<u8>> {
    let band = first_band(data)?;
    let band2 = first_band(data2)?;
    check_band_lengths(band, band2)?;
    let scale = ColorScale::new(spec)?;

    let mut min_px = f64::INFINITY;
    let mut max_px = f64::NEG_INFINITY;

    let pixels = band.len();
    let mut rgba = vec![0u8; pixels * 4];
    for i in 0..pixels {
        let value = band[i];
        let value2 = band2[i];

        let sum = value + value2;
        let denominator = if sum == 0.0 || sum.is_nan() { 1.0 } else { sum };
        let diff = (value - value2) / denominator * TREATMENT_FACTOR;
        let result = metadata.physical(diff);

        if metadata.is_no_data(result)
            || result.is_nan()
            || result.is_infinite()
            || result == TREATMENT_SENTINEL
        {
            continue;
        }

        min_px = min_px.min(result);
        max_px = max_px.max(result);

        let color = scale.color_at(result);
        let idx = i * 4;
        rgba[idx] = color.r;
        rgba[idx + 1] = color.g;
        rgba[idx + 2] = color.b;
        rgba[idx + 3] = 255;
    }

    trace!(min_px, max_px, "treatment physical value range");

    Ok(rgba)
}
