//! Tests for PNG encoding of rendered tiles.
//!
//! Covers format selection (indexed vs RGBA), transparency handling and
//! the chunk-level structure of the output.

use cog_common::TileImage;
use renderer::png::{create_png, create_png_auto, encode_tile};

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

// ============================================================================
// Helper functions
// ============================================================================

/// Walk the chunk list of an encoded PNG, returning (type, data_len) pairs.
fn chunk_list(png: &[u8]) -> Vec<(String, usize)> {
    assert_eq!(&png[0..8], &PNG_SIGNATURE);
    let mut chunks = Vec::new();
    let mut offset = 8;
    while offset < png.len() {
        let len = u32::from_be_bytes([
            png[offset],
            png[offset + 1],
            png[offset + 2],
            png[offset + 3],
        ]) as usize;
        let chunk_type = String::from_utf8(png[offset + 4..offset + 8].to_vec()).unwrap();
        chunks.push((chunk_type, len));
        // length + type + data + crc
        offset += 12 + len;
    }
    chunks
}

fn chunk_types(png: &[u8]) -> Vec<String> {
    chunk_list(png).into_iter().map(|(t, _)| t).collect()
}

/// Gradient tile with far more than 256 colors.
fn continuous_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x % 256) as u8,
                (y % 256) as u8,
                ((x * y) % 256) as u8,
                255,
            ]);
        }
    }
    pixels
}

/// Two-color tile with a transparent left half, like a stepped scale over
/// a raster edge.
fn stepped_pixels(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for _ in 0..height {
        for x in 0..width {
            if x < width / 2 {
                pixels.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                pixels.extend_from_slice(&[26, 152, 80, 255]);
            }
        }
    }
    pixels
}

// ============================================================================
// format selection tests
// ============================================================================

#[test]
fn test_few_colors_use_indexed_png() {
    let pixels = stepped_pixels(256, 256);
    let png = create_png_auto(&pixels, 256, 256).unwrap();

    let types = chunk_types(&png);
    assert_eq!(types.first().map(String::as_str), Some("IHDR"));
    assert!(types.contains(&"PLTE".to_string()));
    assert_eq!(types.last().map(String::as_str), Some("IEND"));

    // Color type 3 lives at byte 9 of the IHDR data.
    assert_eq!(png[8 + 8 + 9], 3);
}

#[test]
fn test_many_colors_fall_back_to_rgba() {
    let pixels = continuous_pixels(256, 256);
    let png = create_png_auto(&pixels, 256, 256).unwrap();

    let types = chunk_types(&png);
    assert!(!types.contains(&"PLTE".to_string()));
    assert_eq!(png[8 + 8 + 9], 6);
}

#[test]
fn test_indexed_is_smaller_than_rgba_for_stepped_tiles() {
    let pixels = stepped_pixels(256, 256);
    let indexed = create_png_auto(&pixels, 256, 256).unwrap();
    let rgba = create_png(&pixels, 256, 256).unwrap();
    assert!(indexed.len() < rgba.len());
}

// ============================================================================
// transparency tests
// ============================================================================

#[test]
fn test_transparent_pixels_add_a_trns_chunk() {
    let pixels = stepped_pixels(64, 64);
    let png = create_png_auto(&pixels, 64, 64).unwrap();
    assert!(chunk_types(&png).contains(&"tRNS".to_string()));
}

#[test]
fn test_opaque_tiles_skip_trns() {
    let mut pixels = Vec::new();
    for _ in 0..64 * 64 {
        pixels.extend_from_slice(&[10, 20, 30, 255]);
    }
    let png = create_png_auto(&pixels, 64, 64).unwrap();
    let types = chunk_types(&png);
    assert!(types.contains(&"PLTE".to_string()));
    assert!(!types.contains(&"tRNS".to_string()));
}

// ============================================================================
// structural tests
// ============================================================================

#[test]
fn test_ihdr_dimensions_match_the_tile() {
    let image = TileImage::new(256, 256, stepped_pixels(256, 256));
    let png = encode_tile(&image).unwrap();

    let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    assert_eq!(width, 256);
    assert_eq!(height, 256);
}

#[test]
fn test_chunk_walk_covers_the_whole_file() {
    // chunk_list panics on malformed offsets, so walking both formats
    // end to end is itself the assertion.
    let indexed = create_png_auto(&stepped_pixels(32, 32), 32, 32).unwrap();
    let rgba = create_png(&continuous_pixels(32, 32), 32, 32).unwrap();
    assert!(chunk_list(&indexed).len() >= 4);
    assert!(chunk_list(&rgba).len() >= 3);
}

#[test]
fn test_size_mismatch_is_an_error() {
    let pixels = continuous_pixels(16, 16);
    assert!(create_png(&pixels, 32, 32).is_err());
}
