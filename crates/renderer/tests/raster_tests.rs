//! Tests for the tile renderers.

use cog_common::{CogError, ColorScaleSpec, RasterBandSet, RasterMetadata};
use renderer::{render_color, render_photo, render_terrain, render_treatment};

fn metadata(offset: f64, scale: f64, no_data: Option<f64>) -> RasterMetadata {
    RasterMetadata {
        offset,
        scale,
        no_data,
    }
}

fn pixel(rgba: &[u8], i: usize) -> [u8; 4] {
    [rgba[i * 4], rgba[i * 4 + 1], rgba[i * 4 + 2], rgba[i * 4 + 3]]
}

/// Unpack an encoded Terrain-RGB pixel back to meters.
fn decode_terrain(px: [u8; 4]) -> f64 {
    -10_000.0
        + ((f64::from(px[0]) * 256.0 * 256.0 + f64::from(px[1]) * 256.0 + f64::from(px[2])) * 0.1)
}

// ============================================================================
// photo renderer tests
// ============================================================================

#[test]
fn test_photo_passes_samples_through() {
    let data = RasterBandSet::new(vec![vec![10.0], vec![20.0], vec![30.0]]);
    let rgba = render_photo(&data, &RasterMetadata::default()).unwrap();
    assert_eq!(pixel(&rgba, 0), [10, 20, 30, 255]);
}

#[test]
fn test_photo_clamps_out_of_range_samples() {
    let data = RasterBandSet::new(vec![vec![300.0], vec![-5.0], vec![127.6]]);
    let rgba = render_photo(&data, &RasterMetadata::default()).unwrap();
    assert_eq!(pixel(&rgba, 0), [255, 0, 128, 255]);
}

#[test]
fn test_photo_ignores_extra_bands() {
    let data = RasterBandSet::new(vec![vec![1.0], vec![2.0], vec![3.0], vec![99.0]]);
    let rgba = render_photo(&data, &RasterMetadata::default()).unwrap();
    assert_eq!(pixel(&rgba, 0), [1, 2, 3, 255]);
}

#[test]
fn test_photo_transparent_only_when_all_bands_are_no_data() {
    let meta = metadata(0.0, 1.0, Some(0.0));
    let data = RasterBandSet::new(vec![vec![0.0, 0.0], vec![0.0, 50.0], vec![0.0, 0.0]]);
    let rgba = render_photo(&data, &meta).unwrap();

    // All three bands at the sentinel: transparent.
    assert_eq!(pixel(&rgba, 0), [0, 0, 0, 0]);
    // Only two of three: rendered.
    assert_eq!(pixel(&rgba, 1), [0, 50, 0, 255]);
}

#[test]
fn test_photo_needs_three_bands() {
    let data = RasterBandSet::new(vec![vec![1.0], vec![2.0]]);
    let err = render_photo(&data, &RasterMetadata::default()).unwrap_err();
    assert!(matches!(
        err,
        CogError::BandCountMismatch {
            expected: 3,
            got: 2
        }
    ));
}

#[test]
fn test_photo_rejects_unequal_band_lengths() {
    let data = RasterBandSet::new(vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]]);
    let err = render_photo(&data, &RasterMetadata::default()).unwrap_err();
    assert!(matches!(err, CogError::BandLengthMismatch { .. }));
}

// ============================================================================
// terrain renderer tests
// ============================================================================

#[test]
fn test_terrain_zero_elevation_encoding() {
    // 0 m is 100000 steps above the -10000 m base: R=1, G=134, B=160.
    let data = RasterBandSet::new(vec![vec![0.0]]);
    let rgba = render_terrain(&data, &RasterMetadata::default()).unwrap();
    let px = pixel(&rgba, 0);
    assert_eq!(px[3], 255);
    assert!((decode_terrain(px) - 0.0).abs() < 0.1);
}

#[test]
fn test_terrain_round_trips_within_resolution() {
    let elevations = vec![-420.5, 0.0, 8.3, 1234.5, 8848.9];
    let data = RasterBandSet::new(vec![elevations.clone()]);
    let rgba = render_terrain(&data, &RasterMetadata::default()).unwrap();

    for (i, &elevation) in elevations.iter().enumerate() {
        let decoded = decode_terrain(pixel(&rgba, i));
        assert!(
            (decoded - elevation).abs() <= 0.1,
            "elevation {} decoded as {}",
            elevation,
            decoded
        );
    }
}

#[test]
fn test_terrain_applies_offset_and_scale() {
    // raw 10 with offset 100 / scale 2 is 120 m.
    let meta = metadata(100.0, 2.0, None);
    let data = RasterBandSet::new(vec![vec![10.0]]);
    let rgba = render_terrain(&data, &meta).unwrap();
    assert!((decode_terrain(pixel(&rgba, 0)) - 120.0).abs() <= 0.1);
}

#[test]
fn test_terrain_no_data_and_nan_are_transparent() {
    let meta = metadata(0.0, 1.0, Some(-9999.0));
    let data = RasterBandSet::new(vec![vec![-9999.0, f64::NAN, 100.0]]);
    let rgba = render_terrain(&data, &meta).unwrap();

    assert_eq!(pixel(&rgba, 0)[3], 0);
    assert_eq!(pixel(&rgba, 1)[3], 0);
    assert_eq!(pixel(&rgba, 2)[3], 255);
}

#[test]
fn test_terrain_needs_a_band() {
    let err = render_terrain(&RasterBandSet::new(vec![]), &RasterMetadata::default()).unwrap_err();
    assert!(matches!(err, CogError::BandCountMismatch { .. }));
}

// ============================================================================
// color renderer tests
// ============================================================================

#[test]
fn test_color_maps_values_through_the_scale() {
    let mut spec = ColorScaleSpec::named("", 0.0, 100.0);
    spec.custom_colors = vec!["#000000".to_string(), "#ffffff".to_string()];
    spec.continuous = true;

    let data = RasterBandSet::new(vec![vec![0.0, 50.0, 100.0]]);
    let rgba = render_color(&data, &RasterMetadata::default(), &spec).unwrap();

    assert_eq!(pixel(&rgba, 0), [0, 0, 0, 255]);
    assert_eq!(pixel(&rgba, 1), [128, 128, 128, 255]);
    assert_eq!(pixel(&rgba, 2), [255, 255, 255, 255]);
}

#[test]
fn test_color_compares_no_data_after_the_transform() {
    // Physical sentinel -5: raw 5 with offset -10 hits it, raw 5 alone
    // does not.
    let spec = ColorScaleSpec::named("Greys", -100.0, 100.0);
    let data = RasterBandSet::new(vec![vec![5.0]]);

    let rgba = render_color(&data, &metadata(-10.0, 1.0, Some(-5.0)), &spec).unwrap();
    assert_eq!(pixel(&rgba, 0)[3], 0);

    let rgba = render_color(&data, &metadata(0.0, 1.0, Some(-5.0)), &spec).unwrap();
    assert_eq!(pixel(&rgba, 0)[3], 255);
}

#[test]
fn test_color_nan_and_infinite_are_transparent() {
    let spec = ColorScaleSpec::named("Greys", 0.0, 1.0);
    let data = RasterBandSet::new(vec![vec![
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        0.5,
    ]]);
    let rgba = render_color(&data, &RasterMetadata::default(), &spec).unwrap();

    assert_eq!(pixel(&rgba, 0)[3], 0);
    assert_eq!(pixel(&rgba, 1)[3], 0);
    assert_eq!(pixel(&rgba, 2)[3], 0);
    assert_eq!(pixel(&rgba, 3)[3], 255);
}

#[test]
fn test_color_rejects_bad_scales_up_front() {
    let spec = ColorScaleSpec::named("NotAScheme", 0.0, 1.0);
    let data = RasterBandSet::new(vec![vec![0.5]]);
    let err = render_color(&data, &RasterMetadata::default(), &spec).unwrap_err();
    assert!(matches!(err, CogError::InvalidColorScale(_)));
}

// ============================================================================
// treatment renderer tests
// ============================================================================

fn grey_ramp(min: f64, max: f64) -> ColorScaleSpec {
    let mut spec = ColorScaleSpec::named("", min, max);
    spec.custom_colors = vec!["#000000".to_string(), "#ffffff".to_string()];
    spec.continuous = true;
    spec
}

#[test]
fn test_treatment_normalized_difference() {
    // (30 - 10) / (30 + 10) * 10000 = 5000, the midpoint of [0, 10000].
    let a = RasterBandSet::new(vec![vec![30.0]]);
    let b = RasterBandSet::new(vec![vec![10.0]]);
    let rgba =
        render_treatment(&a, &b, &RasterMetadata::default(), &grey_ramp(0.0, 10_000.0)).unwrap();
    assert_eq!(pixel(&rgba, 0), [128, 128, 128, 255]);
}

#[test]
fn test_treatment_zero_sum_uses_unit_denominator() {
    // Both samples zero: the difference is 0 / 1, not 0 / 0.
    let a = RasterBandSet::new(vec![vec![0.0]]);
    let b = RasterBandSet::new(vec![vec![0.0]]);
    let rgba =
        render_treatment(&a, &b, &RasterMetadata::default(), &grey_ramp(-1.0, 1.0)).unwrap();
    // Rendered, not transparent.
    assert_eq!(pixel(&rgba, 0)[3], 255);
}

#[test]
fn test_treatment_sentinel_value_is_transparent() {
    // Equal bands give a difference of 0; an offset of -0.1 lands exactly
    // on the transparent sentinel.
    let a = RasterBandSet::new(vec![vec![5.0]]);
    let b = RasterBandSet::new(vec![vec![5.0]]);
    let meta = metadata(-0.1, 1.0, None);
    let rgba = render_treatment(&a, &b, &meta, &grey_ramp(-1.0, 1.0)).unwrap();
    assert_eq!(pixel(&rgba, 0)[3], 0);
}

#[test]
fn test_treatment_nan_input_is_transparent() {
    let a = RasterBandSet::new(vec![vec![f64::NAN, 30.0]]);
    let b = RasterBandSet::new(vec![vec![10.0, 10.0]]);
    let rgba =
        render_treatment(&a, &b, &RasterMetadata::default(), &grey_ramp(0.0, 10_000.0)).unwrap();
    assert_eq!(pixel(&rgba, 0)[3], 0);
    assert_eq!(pixel(&rgba, 1)[3], 255);
}

#[test]
fn test_treatment_no_data_result_is_transparent() {
    // raw difference 5000 scaled by 1 with offset 0 equals the sentinel.
    let a = RasterBandSet::new(vec![vec![30.0]]);
    let b = RasterBandSet::new(vec![vec![10.0]]);
    let meta = metadata(0.0, 1.0, Some(5000.0));
    let rgba = render_treatment(&a, &b, &meta, &grey_ramp(0.0, 10_000.0)).unwrap();
    assert_eq!(pixel(&rgba, 0)[3], 0);
}

#[test]
fn test_treatment_rejects_unequal_band_lengths() {
    let a = RasterBandSet::new(vec![vec![1.0, 2.0]]);
    let b = RasterBandSet::new(vec![vec![1.0]]);
    let err = render_treatment(
        &a,
        &b,
        &RasterMetadata::default(),
        &grey_ramp(0.0, 1.0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CogError::BandLengthMismatch { left: 2, right: 1 }
    ));
}

#[test]
fn test_treatment_output_is_row_major_rgba() {
    let a = RasterBandSet::new(vec![vec![30.0; 6]]);
    let b = RasterBandSet::new(vec![vec![10.0; 6]]);
    let rgba =
        render_treatment(&a, &b, &RasterMetadata::default(), &grey_ramp(0.0, 10_000.0)).unwrap();
    assert_eq!(rgba.len(), 6 * 4);
    for i in 0..6 {
        assert_eq!(pixel(&rgba, i)[3], 255);
    }
}
