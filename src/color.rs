//! Color values and color parsing
//!
//! Every color that reaches the pattern store is an [`Rgb`] channel triple.
//! Documents and user input may carry colors in several shapes, captured by
//! [`ColorValue`] at the boundary and resolved immediately:
//! - Channel arrays: `[200, 100, 100]` (a trailing alpha is ignored)
//! - Hex strings: `#RGB`, `#RRGGBB`, `#RRGGBBAA`
//! - Channel objects: `{"levels": [r, g, b, a]}` or `{"r": .., "g": .., "b": ..}`
//! - Legacy weft indices: `0`, `1`, `2`
//!
//! Free-form input (CLI flags, scripts) goes through [`parse_color`], which also
//! accepts CSS functional notation and named colors.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of wefts carried by every row.
pub const WEFT_COUNT: usize = 3;

/// Default warp color (light gray).
pub const DEFAULT_WARP: Rgb = Rgb::new(240, 240, 240);

/// Default color for each weft, also the table legacy numeric indices refer to.
pub const DEFAULT_WEFTS: [Rgb; WEFT_COUNT] =
    [Rgb::new(200, 100, 100), Rgb::new(100, 200, 100), Rgb::new(100, 100, 200)];

/// Default color for a weft index. Out-of-range indices fall back to weft 0.
pub fn default_weft(weft: usize) -> Rgb {
    DEFAULT_WEFTS.get(weft).copied().unwrap_or(DEFAULT_WEFTS[0])
}

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// An opaque color as a red/green/blue channel triple.
///
/// Serializes as a plain `[r, g, b]` array, the form used by pattern and
/// palette documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unbounded channel values, rounding and clamping each
    /// channel into 0..=255. Non-finite channels become 0.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
    }

    /// Format as `#RRGGBB` (uppercase).
    ///
    /// ```
    /// use krokbragd::color::Rgb;
    ///
    /// assert_eq!(Rgb::new(200, 100, 100).to_hex(), "#C86464");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn clamp_channel(v: f64) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Channel object as written by older tools: either a `levels` array or
/// separate `r`/`g`/`b` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChannelObject {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub levels: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub b: Option<f64>,
}

/// A color as it appears at a document boundary, before canonicalization.
///
/// Nothing outside the loaders holds a `ColorValue`; call [`ColorValue::resolve`]
/// to obtain the canonical [`Rgb`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// Legacy index into [`DEFAULT_WEFTS`].
    Index(i64),
    /// `[r, g, b]` or `[r, g, b, a]`.
    Channels(Vec<f64>),
    /// Any string accepted by [`parse_color`].
    Hex(String),
    Object(ChannelObject),
    /// Anything else (null, booleans, fractional indices, nested garbage).
    Other(serde_json::Value),
}

impl ColorValue {
    /// Resolve to a canonical color, or `None` when the value does not
    /// describe a color.
    pub fn try_resolve(&self) -> Option<Rgb> {
        match self {
            ColorValue::Index(i) => usize::try_from(*i).ok().and_then(|i| DEFAULT_WEFTS.get(i).copied()),
            ColorValue::Channels(c) if c.len() >= 3 => Some(Rgb::from_channels(c[0], c[1], c[2])),
            ColorValue::Channels(_) => None,
            ColorValue::Hex(s) => parse_color(s).ok(),
            ColorValue::Object(obj) => match (&obj.levels, obj.r, obj.g, obj.b) {
                (Some(levels), _, _, _) if levels.len() >= 3 => {
                    Some(Rgb::from_channels(levels[0], levels[1], levels[2]))
                }
                (_, Some(r), Some(g), Some(b)) => Some(Rgb::from_channels(r, g, b)),
                _ => None,
            },
            ColorValue::Other(_) => None,
        }
    }

    /// Resolve a cell value stored for `weft`.
    ///
    /// Legacy indices map through the default weft table. Values that are not
    /// colors fall back to the weft's default color; both paths are logged.
    pub fn resolve(&self, weft: usize) -> Rgb {
        if let ColorValue::Index(i) = self {
            tracing::debug!(index = *i, weft, "resolving legacy weft index");
        }
        match self.try_resolve() {
            Some(rgb) => rgb,
            None => {
                tracing::warn!(value = ?self, weft, "unrecognized color value, using weft default");
                default_weft(weft)
            }
        }
    }
}

impl From<Rgb> for ColorValue {
    fn from(c: Rgb) -> Self {
        ColorValue::Channels(vec![c.r as f64, c.g as f64, c.b as f64])
    }
}

/// Parse a color string into an [`Rgb`]. Alpha is discarded.
///
/// # Supported Formats
///
/// - `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
/// - `rgb()`, `hsl()`, `hwb()`, `oklch()` functional notation
/// - CSS named colors: `red`, `tan`, `navy`, ...
///
/// # Examples
///
/// ```
/// use krokbragd::color::{parse_color, Rgb};
///
/// assert_eq!(parse_color("#C86464").unwrap(), Rgb::new(200, 100, 100));
/// assert_eq!(parse_color("#F00").unwrap(), Rgb::new(255, 0, 0));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), Rgb::new(0, 255, 0));
/// assert_eq!(parse_color("blue").unwrap(), Rgb::new(0, 0, 255));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgb, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Parse the digits of a hex color (without the leading `#`).
fn parse_hex_color(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // #RGB / #RGBA -> doubled digits
        [r, g, b] | [r, g, b, _] => Ok(Rgb::new(r * 17, g * 17, b * 17)),
        // #RRGGBB / #RRGGBBAA
        [r1, r0, g1, g0, b1, b0] | [r1, r0, g1, g0, b1, b0, _, _] => {
            Ok(Rgb::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgb, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgb::new(rgba.red, rgba.green, rgba.blue)),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Rgb::from_channels(
                f64::from(rgb.r) * 255.0,
                f64::from(rgb.g) * 255.0,
                f64::from(rgb.b) * 255.0,
            )),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}
