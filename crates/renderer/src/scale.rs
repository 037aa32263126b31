//! Color scale construction and evaluation.
//!
//! A scale maps a physical value range onto a palette, either one of the
//! built-in ColorBrewer palettes or a custom list of hex stops. Stepped
//! scales pick the containing bin; continuous scales interpolate between
//! equally spaced stops.

use cog_common::{CogError, CogResult, ColorScaleSpec};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

// === Palette registry ===

const BRBG: &[Rgb] = &[
    Rgb::new(84, 48, 5),
    Rgb::new(140, 81, 10),
    Rgb::new(191, 129, 45),
    Rgb::new(223, 194, 125),
    Rgb::new(246, 232, 195),
    Rgb::new(245, 245, 245),
    Rgb::new(199, 234, 229),
    Rgb::new(128, 205, 193),
    Rgb::new(53, 151, 143),
    Rgb::new(1, 102, 94),
    Rgb::new(0, 60, 48),
];

const PIYG: &[Rgb] = &[
    Rgb::new(142, 1, 82),
    Rgb::new(197, 27, 125),
    Rgb::new(222, 119, 174),
    Rgb::new(241, 182, 218),
    Rgb::new(253, 224, 239),
    Rgb::new(247, 247, 247),
    Rgb::new(230, 245, 208),
    Rgb::new(184, 225, 134),
    Rgb::new(127, 188, 65),
    Rgb::new(77, 146, 33),
    Rgb::new(39, 100, 25),
];

const PRGN: &[Rgb] = &[
    Rgb::new(64, 0, 75),
    Rgb::new(118, 42, 131),
    Rgb::new(153, 112, 171),
    Rgb::new(194, 165, 207),
    Rgb::new(231, 212, 232),
    Rgb::new(247, 247, 247),
    Rgb::new(217, 240, 211),
    Rgb::new(166, 219, 160),
    Rgb::new(90, 174, 97),
    Rgb::new(27, 120, 55),
    Rgb::new(0, 68, 27),
];

const PUOR: &[Rgb] = &[
    Rgb::new(127, 59, 8),
    Rgb::new(179, 88, 6),
    Rgb::new(224, 130, 20),
    Rgb::new(253, 184, 99),
    Rgb::new(254, 224, 182),
    Rgb::new(247, 247, 247),
    Rgb::new(216, 218, 235),
    Rgb::new(178, 171, 210),
    Rgb::new(128, 115, 172),
    Rgb::new(84, 39, 136),
    Rgb::new(45, 0, 75),
];

const RDBU: &[Rgb] = &[
    Rgb::new(103, 0, 31),
    Rgb::new(178, 24, 43),
    Rgb::new(214, 96, 77),
    Rgb::new(244, 165, 130),
    Rgb::new(253, 219, 199),
    Rgb::new(247, 247, 247),
    Rgb::new(209, 229, 240),
    Rgb::new(146, 197, 222),
    Rgb::new(67, 147, 195),
    Rgb::new(33, 102, 172),
    Rgb::new(5, 48, 97),
];

const RDGY: &[Rgb] = &[
    Rgb::new(103, 0, 31),
    Rgb::new(178, 24, 43),
    Rgb::new(214, 96, 77),
    Rgb::new(244, 165, 130),
    Rgb::new(253, 219, 199),
    Rgb::new(255, 255, 255),
    Rgb::new(224, 224, 224),
    Rgb::new(186, 186, 186),
    Rgb::new(135, 135, 135),
    Rgb::new(77, 77, 77),
    Rgb::new(26, 26, 26),
];

const RDYLBU: &[Rgb] = &[
    Rgb::new(165, 0, 38),
    Rgb::new(215, 48, 39),
    Rgb::new(244, 109, 67),
    Rgb::new(253, 174, 97),
    Rgb::new(254, 224, 144),
    Rgb::new(255, 255, 191),
    Rgb::new(224, 243, 248),
    Rgb::new(171, 217, 233),
    Rgb::new(116, 173, 209),
    Rgb::new(69, 117, 180),
    Rgb::new(49, 54, 149),
];

const RDYLGN: &[Rgb] = &[
    Rgb::new(165, 0, 38),
    Rgb::new(215, 48, 39),
    Rgb::new(244, 109, 67),
    Rgb::new(253, 174, 97),
    Rgb::new(254, 224, 139),
    Rgb::new(255, 255, 191),
    Rgb::new(217, 239, 139),
    Rgb::new(166, 217, 106),
    Rgb::new(102, 189, 99),
    Rgb::new(26, 152, 80),
    Rgb::new(0, 104, 55),
];

const SPECTRAL: &[Rgb] = &[
    Rgb::new(158, 1, 66),
    Rgb::new(213, 62, 79),
    Rgb::new(244, 109, 67),
    Rgb::new(253, 174, 97),
    Rgb::new(254, 224, 139),
    Rgb::new(255, 255, 191),
    Rgb::new(230, 245, 152),
    Rgb::new(171, 221, 164),
    Rgb::new(102, 194, 165),
    Rgb::new(50, 136, 189),
    Rgb::new(94, 79, 162),
];

const BLUES: &[Rgb] = &[
    Rgb::new(247, 251, 255),
    Rgb::new(222, 235, 247),
    Rgb::new(198, 219, 239),
    Rgb::new(158, 202, 225),
    Rgb::new(107, 174, 214),
    Rgb::new(66, 146, 198),
    Rgb::new(33, 113, 181),
    Rgb::new(8, 81, 156),
    Rgb::new(8, 48, 107),
];

const GREENS: &[Rgb] = &[
    Rgb::new(247, 252, 245),
    Rgb::new(229, 245, 224),
    Rgb::new(199, 233, 192),
    Rgb::new(161, 217, 155),
    Rgb::new(116, 196, 118),
    Rgb::new(65, 171, 93),
    Rgb::new(35, 139, 69),
    Rgb::new(0, 109, 44),
    Rgb::new(0, 68, 27),
];

const GREYS: &[Rgb] = &[
    Rgb::new(255, 255, 255),
    Rgb::new(240, 240, 240),
    Rgb::new(217, 217, 217),
    Rgb::new(189, 189, 189),
    Rgb::new(150, 150, 150),
    Rgb::new(115, 115, 115),
    Rgb::new(82, 82, 82),
    Rgb::new(37, 37, 37),
    Rgb::new(0, 0, 0),
];

const ORANGES: &[Rgb] = &[
    Rgb::new(255, 245, 235),
    Rgb::new(254, 230, 206),
    Rgb::new(253, 208, 162),
    Rgb::new(253, 174, 107),
    Rgb::new(253, 141, 60),
    Rgb::new(241, 105, 19),
    Rgb::new(217, 72, 1),
    Rgb::new(166, 54, 3),
    Rgb::new(127, 39, 4),
];

const REDS: &[Rgb] = &[
    Rgb::new(255, 245, 240),
    Rgb::new(254, 224, 210),
    Rgb::new(252, 187, 161),
    Rgb::new(252, 146, 114),
    Rgb::new(251, 106, 74),
    Rgb::new(239, 59, 44),
    Rgb::new(203, 24, 29),
    Rgb::new(165, 15, 21),
    Rgb::new(103, 0, 13),
];

const YLGN: &[Rgb] = &[
    Rgb::new(255, 255, 229),
    Rgb::new(247, 252, 185),
    Rgb::new(217, 240, 163),
    Rgb::new(173, 221, 142),
    Rgb::new(120, 198, 121),
    Rgb::new(65, 171, 93),
    Rgb::new(35, 132, 67),
    Rgb::new(0, 104, 55),
    Rgb::new(0, 69, 41),
];

const YLORRD: &[Rgb] = &[
    Rgb::new(255, 255, 204),
    Rgb::new(255, 237, 160),
    Rgb::new(254, 217, 118),
    Rgb::new(254, 178, 76),
    Rgb::new(253, 141, 60),
    Rgb::new(252, 78, 42),
    Rgb::new(227, 26, 28),
    Rgb::new(189, 0, 38),
    Rgb::new(128, 0, 38),
];

/// Names accepted by [`named_palette`], ColorBrewer spelling.
pub const SCHEME_NAMES: &[&str] = &[
    "BrBG", "PiYG", "PRGn", "PuOr", "RdBu", "RdGy", "RdYlBu", "RdYlGn", "Spectral", "Blues",
    "Greens", "Greys", "Oranges", "Reds", "YlGn", "YlOrRd",
];

/// Stops of a built-in palette, low to high.
pub fn named_palette(name: &str) -> Option<&'static [Rgb]> {
    match name {
        "BrBG" => Some(BRBG),
        "PiYG" => Some(PIYG),
        "PRGn" => Some(PRGN),
        "PuOr" => Some(PUOR),
        "RdBu" => Some(RDBU),
        "RdGy" => Some(RDGY),
        "RdYlBu" => Some(RDYLBU),
        "RdYlGn" => Some(RDYLGN),
        "Spectral" => Some(SPECTRAL),
        "Blues" => Some(BLUES),
        "Greens" => Some(GREENS),
        "Greys" => Some(GREYS),
        "Oranges" => Some(ORANGES),
        "Reds" => Some(REDS),
        "YlGn" => Some(YLGN),
        "YlOrRd" => Some(YLORRD),
        _ => None,
    }
}

// === Evaluation ===

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(a: Rgb, b: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(f64::from(a.r), f64::from(b.r), t).round() as u8,
        lerp(f64::from(a.g), f64::from(b.g), t).round() as u8,
        lerp(f64::from(a.b), f64::from(b.b), t).round() as u8,
    )
}

/// Interpolate over equally spaced stops at normalized position `t`.
fn multi_stop(stops: &[Rgb], t: f64) -> Rgb {
    let last = stops.len() - 1;
    if last == 0 || t <= 0.0 {
        return stops[0];
    }
    if t >= 1.0 {
        return stops[last];
    }
    let position = t * last as f64;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    lerp_color(stops[lower], stops[upper], position - lower as f64)
}

/// A compiled value-to-color mapping.
///
/// Construction resolves the palette once; evaluation is a pure function
/// suitable for per-pixel use. Values outside `[min, max]` clamp to the
/// boundary stops, and a degenerate `min == max` domain still evaluates.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<Rgb>,
    min: f64,
    inv_range: f64,
    continuous: bool,
}

impl ColorScale {
    /// Compile a scale spec. A non-empty custom palette wins over the
    /// named scheme; unknown schemes and bad hex stops are rejected.
    pub fn new(spec: &ColorScaleSpec) -> CogResult<Self> {
        let mut stops: Vec<Rgb> = if spec.custom_colors.is_empty() {
            named_palette(&spec.scheme)
                .ok_or_else(|| {
                    CogError::InvalidColorScale(format!("unknown color scheme '{}'", spec.scheme))
                })?
                .to_vec()
        } else {
            spec.custom_colors
                .iter()
                .map(|hex| parse_hex_color(hex))
                .collect::<CogResult<_>>()?
        };

        if spec.reverse {
            stops.reverse();
        }

        let range = spec.max - spec.min;
        let inv_range = if range == 0.0 { 1.0 } else { 1.0 / range };

        Ok(Self {
            stops,
            min: spec.min,
            inv_range,
            continuous: spec.continuous,
        })
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Color for a physical value.
    pub fn color_at(&self, value: f64) -> Rgb {
        let t = ((value - self.min) * self.inv_range).clamp(0.0, 1.0);
        if self.continuous {
            multi_stop(&self.stops, t)
        } else {
            let n = self.stops.len();
            let index = ((t * n as f64).floor() as usize).min(n - 1);
            self.stops[index]
        }
    }
}

/// Parse `#rrggbb` or shorthand `#rgb`.
fn parse_hex_color(hex: &str) -> CogResult<Rgb> {
    let bad = || CogError::InvalidColorScale(format!("invalid hex color '{}'", hex));
    let digits = hex.strip_prefix('#').ok_or_else(bad)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }

    let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| bad());
    match digits.len() {
        6 => Ok(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            // Shorthand digits double up: #fa0 is #ffaa00.
            let wide = |range: &str| channel(range).map(|n| n * 16 + n);
            Ok(Rgb::new(
                wide(&digits[0..1])?,
                wide(&digits[1..2])?,
                wide(&digits[2..3])?,
            ))
        }
        _ => Err(bad()),
    }
}
