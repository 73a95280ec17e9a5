//! Data models for Krokbragd documents (patterns and palettes).
//!
//! Pattern documents are generic over their color type: loaders read
//! [`ColorValue`](crate::color::ColorValue) cells so any historical color
//! shape is accepted, while exports always write [`Rgb`] triples.

use crate::color::Rgb;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Version tag written by [`crate::document::export_document`].
pub const FORMAT_VERSION: &str = "2.0";

/// Default cell size in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Descriptive fields of a pattern document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    /// ISO-8601 creation timestamp.
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub category: String,
}

impl Metadata {
    /// Metadata for a pattern created at `now`.
    pub fn generated(now: DateTime<Utc>) -> Self {
        Self {
            title: format!("Krokbragd_Pattern_{}", now.format("%Y-%m-%d")),
            description: String::new(),
            author: "Anonymous".to_string(),
            created: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            category: "Krokbragd".to_string(),
        }
    }

    /// Fill empty fields from `defaults`.
    pub fn or_defaults(mut self, defaults: &Metadata) -> Self {
        for (field, fallback) in [
            (&mut self.title, &defaults.title),
            (&mut self.author, &defaults.author),
            (&mut self.created, &defaults.created),
            (&mut self.category, &defaults.category),
        ] {
            if field.is_empty() {
                field.clone_from(fallback);
            }
        }
        self
    }
}

/// The weave itself: cells, dimensions, palette, and warp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternSection<C> {
    /// `[row][weft][column]`.
    #[serde(default = "Vec::new")]
    pub weft_pattern: Vec<Vec<Vec<C>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_height: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_palette: Option<String>,
    #[serde(default = "Vec::new")]
    pub palette_colors: Vec<C>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warp_color: Option<C>,
}

/// Viewer state saved alongside a pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayState {
    pub zoom_level: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub cell_size: u32,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self { zoom_level: 1.0, offset_x: 0.0, offset_y: 0.0, cell_size: DEFAULT_CELL_SIZE }
    }
}

impl DisplayState {
    /// Replace zero or non-finite values with their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };
        Self {
            zoom_level: if self.zoom_level.is_finite() && self.zoom_level > 0.0 {
                self.zoom_level
            } else {
                defaults.zoom_level
            },
            offset_x: finite_or(self.offset_x, defaults.offset_x),
            offset_y: finite_or(self.offset_y, defaults.offset_y),
            cell_size: if self.cell_size == 0 { defaults.cell_size } else { self.cell_size },
        }
    }
}

/// A versioned pattern document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternDocument<C> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub pattern: PatternSection<C>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayState>,
}

/// Unversioned pattern document with its fields at the top level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument<C> {
    /// Any JSON value; old files wrote numbers as well as strings here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_height: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warp_color: Option<C>,
    #[serde(default = "Vec::new")]
    pub weft_pattern: Vec<Vec<Vec<C>>>,
    #[serde(default = "Vec::new")]
    pub palette_colors: Vec<C>,
}

/// A named, ordered list of colors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Palette {
    pub name: String,
    pub colors: Vec<Rgb>,
}

/// A palette document: `{ "palettes": [ { "name": ..., "colors": [[r, g, b], ...] } ] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteDocument {
    pub palettes: Vec<Palette>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorValue;
    use chrono::TimeZone;

    #[test]
    fn test_generated_metadata() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let metadata = Metadata::generated(now);
        assert_eq!(metadata.title, "Krokbragd_Pattern_2024-03-09");
        assert_eq!(metadata.created, "2024-03-09T14:05:07.000Z");
        assert_eq!(metadata.author, "Anonymous");
        assert_eq!(metadata.category, "Krokbragd");
        assert!(metadata.description.is_empty());
    }

    #[test]
    fn test_metadata_or_defaults_keeps_present_fields() {
        let defaults = Metadata::generated(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let partial = Metadata { title: "Runner".to_string(), ..Metadata::default() };
        let filled = partial.or_defaults(&defaults);
        assert_eq!(filled.title, "Runner");
        assert_eq!(filled.author, "Anonymous");
        assert_eq!(filled.created, defaults.created);
    }

    #[test]
    fn test_display_defaults_for_missing_and_zero_fields() {
        let display: DisplayState = serde_json::from_str(r#"{"zoomLevel": 2.5}"#).unwrap();
        assert_eq!(display.zoom_level, 2.5);
        assert_eq!(display.cell_size, 20);

        let display: DisplayState =
            serde_json::from_str(r#"{"zoomLevel": 0, "cellSize": 0, "offsetX": 3}"#).unwrap();
        let display = display.normalized();
        assert_eq!(display, DisplayState { offset_x: 3.0, ..DisplayState::default() });
    }

    #[test]
    fn test_pattern_section_field_names() {
        let section = PatternSection::<Rgb> {
            weft_pattern: vec![vec![vec![Rgb::new(1, 2, 3)]; 3]],
            grid_width: Some(1),
            grid_height: Some(1),
            current_palette: Some("default".to_string()),
            palette_colors: vec![],
            warp_color: Some(Rgb::new(240, 240, 240)),
        };
        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(
            json,
            r#"{"weftPattern":[[[[1,2,3]],[[1,2,3]],[[1,2,3]]]],"gridWidth":1,"gridHeight":1,"currentPalette":"default","paletteColors":[],"warpColor":[240,240,240]}"#
        );
    }

    #[test]
    fn test_legacy_document_with_index_cells() {
        let json = r#"{"gridWidth": 2, "gridHeight": 1, "weftPattern": [[[0, 0], [1, 1], [2, 2]]]}"#;
        let doc: LegacyDocument<ColorValue> = serde_json::from_str(json).unwrap();
        assert_eq!(doc.grid_width, Some(2));
        assert_eq!(doc.weft_pattern[0][1][0], ColorValue::Index(1));
        assert!(doc.palette_colors.is_empty());
        assert!(doc.version.is_none());
    }

    #[test]
    fn test_palette_document_roundtrip() {
        let json = r#"{"palettes":[{"name":"Earth","colors":[[180,130,80],[80,60,40]]}]}"#;
        let doc: PaletteDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.palettes[0].colors[1], Rgb::new(80, 60, 40));
        assert_eq!(serde_json::to_string(&doc).unwrap(), json);
    }
}
