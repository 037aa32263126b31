//! COG protocol request parsing.
//!
//! A tile request packs the raster source, the rendering mode and the
//! tile coordinate into one composite URL:
//!
//! `cog://<url>[|<url2>]#<fragment>/<z>/<x>/<y>`
//!
//! The fragment selects the mode: `dem`, `color,...`, `treatment,...`;
//! anything else, including no fragment at all, renders as natural
//! photo. Parsing resolves the whole string into a structured
//! [`RenderRequest`] up front so the dispatcher is a closed match over
//! the mode variant.

use cog_common::{CogError, CogResult, ColorScaleSpec, TileIndex};

/// Request kinds accepted by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Tile-grid descriptor document (TileJSON).
    Json,
    /// Rendered 256x256 RGBA tile.
    Image,
}

impl RequestKind {
    pub fn parse(kind: &str) -> CogResult<Self> {
        match kind {
            "json" => Ok(Self::Json),
            "image" => Ok(Self::Image),
            other => Err(CogError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Rendering mode resolved from the request fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    /// Natural-color composite of the first three bands.
    Photo,
    /// Terrain-RGB elevation encoding.
    Dem,
    /// Single-band rendering through a color scale.
    Color(ColorScaleSpec),
    /// Two-source normalized difference through a color scale.
    Treatment {
        secondary_url: String,
        scale: ColorScaleSpec,
    },
}

impl RenderMode {
    /// Mode name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Dem => "dem",
            Self::Color(_) => "color",
            Self::Treatment { .. } => "treatment",
        }
    }
}

/// A fully parsed tile request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Primary raster source URL.
    pub url: String,

    /// Requested tile coordinate.
    pub tile: TileIndex,

    /// Rendering mode with its parameters.
    pub mode: RenderMode,
}

impl RenderRequest {
    /// Parse a composite request URL.
    ///
    /// The last three path segments are the tile coordinate; everything
    /// between the scheme and those segments is the source reference,
    /// which may itself contain `/`.
    pub fn parse(request: &str) -> CogResult<Self> {
        let malformed = || CogError::MalformedRequest(request.to_string());

        let rest = request.strip_prefix("cog://").ok_or_else(malformed)?;

        let mut segments = rest.rsplitn(4, '/');
        let y = segments.next().and_then(parse_coord).ok_or_else(malformed)?;
        let x = segments.next().and_then(parse_coord).ok_or_else(malformed)?;
        let z = segments.next().and_then(parse_coord).ok_or_else(malformed)?;
        let source_ref = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(malformed)?;

        let (sources, fragment) = match source_ref.split_once('#') {
            Some((sources, fragment)) => (sources, fragment),
            None => (source_ref, ""),
        };

        let (primary, secondary) = match sources.split_once('|') {
            Some((first, second)) => (first, Some(second).filter(|s| !s.is_empty())),
            None => (sources, None),
        };
        if primary.is_empty() {
            return Err(malformed());
        }

        let mode = if fragment.starts_with("treatment") {
            let secondary_url = secondary.ok_or(CogError::MissingSecondarySource)?;
            let scale = parse_color_scale(mode_params(fragment, "treatment"))?;
            RenderMode::Treatment {
                secondary_url: secondary_url.to_string(),
                scale,
            }
        } else if fragment.starts_with("dem") {
            RenderMode::Dem
        } else if fragment.starts_with("color") {
            RenderMode::Color(parse_color_scale(mode_params(fragment, "color"))?)
        } else {
            RenderMode::Photo
        };

        Ok(Self {
            url: primary.to_string(),
            tile: TileIndex::new(z, x, y),
            mode,
        })
    }
}

/// Parse one tile coordinate segment. Digits only, so signs and
/// surrounding whitespace are rejected.
fn parse_coord(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// The fragment text after the mode keyword and its one-character
/// separator.
fn mode_params<'a>(fragment: &'a str, keyword: &str) -> &'a str {
    let rest = fragment.strip_prefix(keyword).unwrap_or("");
    rest.get(1..).unwrap_or("")
}

/// Parse `<scheme>,<min>,<max>[,<modifiers>]` or
/// `[<hex>,...],<min>,<max>[,<modifiers>]` into a scale spec.
fn parse_color_scale(params: &str) -> CogResult<ColorScaleSpec> {
    if params.is_empty() {
        return Err(CogError::MissingColorParams);
    }

    // A bracketed palette at the start of the params wins over a named
    // scheme.
    let (scheme, custom_colors, fields) = match parse_custom_palette(params) {
        Some((colors, rest)) => {
            let fields = rest.strip_prefix(',').unwrap_or(rest);
            (String::new(), colors, fields)
        }
        None => {
            let (scheme, fields) = params.split_once(',').ok_or_else(|| {
                CogError::InvalidColorScale(format!("missing min/max in '{}'", params))
            })?;
            (scheme.to_string(), Vec::new(), fields)
        }
    };

    let mut parts = fields.split(',');
    let min = parse_float_field(parts.next())?;
    let max = parse_float_field(parts.next())?;
    let modifiers = parts.next().unwrap_or("");

    Ok(ColorScaleSpec {
        scheme,
        custom_colors,
        min,
        max,
        reverse: modifiers.contains('-'),
        continuous: modifiers.contains('c'),
    })
}

fn parse_float_field(field: Option<&str>) -> CogResult<f64> {
    let text = field.unwrap_or("");
    text.trim()
        .parse()
        .map_err(|_| CogError::InvalidColorScale(format!("'{}' is not a number", text)))
}

/// Try to read a bracketed list of double-quoted hex colors from the
/// start of the params. Returns the colors, `#` prefix kept, and the
/// text after the closing bracket. A missing or malformed list returns
/// `None` and the params fall through to named-scheme parsing.
fn parse_custom_palette(params: &str) -> Option<(Vec<String>, &str)> {
    let body = params.strip_prefix('[')?;
    let (list, rest) = body.split_once(']')?;

    let mut colors = Vec::new();
    for item in list.split(',') {
        let color = item
            .trim_start()
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))?;
        let digits = color.strip_prefix('#')?;
        if !(3..=6).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        colors.push(color.to_string());
    }
    if colors.is_empty() {
        return None;
    }

    Some((colors, rest))
}
