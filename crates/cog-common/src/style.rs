//! Color scale parameters.

use serde::{Deserialize, Serialize};

/// Parameters selecting and shaping a color scale.
///
/// Either `scheme` names a built-in palette or `custom_colors` carries
/// explicit hex stops; a non-empty custom palette takes precedence. The
/// `[min, max]` domain maps data values onto the palette, `reverse` flips
/// the palette and `continuous` switches from stepped bins to smooth
/// interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScaleSpec {
    pub scheme: String,
    pub custom_colors: Vec<String>,
    pub min: f64,
    pub max: f64,
    pub reverse: bool,
    pub continuous: bool,
}

impl ColorScaleSpec {
    /// Spec for a named scheme with no modifiers.
    pub fn named(scheme: &str, min: f64, max: f64) -> Self {
        Self {
            scheme: scheme.to_string(),
            custom_colors: Vec::new(),
            min,
            max,
            reverse: false,
            continuous: false,
        }
    }
}
