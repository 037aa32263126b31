//! TileJSON descriptor served for `json` requests.

use serde::{Deserialize, Serialize};

/// TileJSON 2.2 descriptor advertised for a COG source.
///
/// `tiles` holds templates with `{z}/{x}/{y}` placeholders; `bounds` is
/// `[west, south, east, north]` in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    pub tilejson: String,
    pub tiles: Vec<String>,
    pub minzoom: u8,
    pub maxzoom: u8,
    pub bounds: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TileJson {
    /// Descriptor with the standard version tag and a single tile template.
    pub fn new(template: &str, minzoom: u8, maxzoom: u8, bounds: [f64; 4]) -> Self {
        Self {
            tilejson: "2.2.0".to_string(),
            tiles: vec![template.to_string()],
            minzoom,
            maxzoom,
            bounds,
            center: None,
            attribution: None,
            description: None,
        }
    }
}
