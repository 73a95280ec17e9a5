//! Palette library, working colors, and palette document import/export
//!
//! Palette documents are parsed with JSON5 so hand-edited files (comments,
//! trailing commas) load too. Parsing is all-or-nothing: a document with one
//! bad color is rejected whole and the library keeps its current palettes.

use crate::color::{ColorValue, Rgb};
use crate::models::Palette;
use crate::palettes;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// File name looked up when no palette document is configured.
pub const DEFAULT_PALETTE_FILE: &str = "palettes.json";

/// Error type for palette operations.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to access palette document: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid palette document: {0}")]
    Parse(String),
    #[error("palette document has no 'palettes' array")]
    MissingPalettes,
    #[error("palette index {index} out of range ({count} palettes)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("no palette named '{0}'")]
    NotFound(String),
    #[error("working color index {index} out of range ({count} colors)")]
    WorkingColorOutOfRange { index: usize, count: usize },
    #[error("no working colors to export")]
    NoWorkingColors,
    #[error("palette name must not be empty")]
    EmptyName,
    #[error("failed to write palette document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RawPalette {
    name: String,
    #[serde(default)]
    colors: Vec<ColorValue>,
}

/// Parse the `palettes` array of a palette document.
///
/// # Errors
///
/// Fails if the text is not JSON5, has no `palettes` array, or any entry lacks
/// a name or holds a value that is not a color.
pub fn parse_palette_document(text: &str) -> Result<Vec<Palette>, PaletteError> {
    let value: Value = json5::from_str(text).map_err(|e| PaletteError::Parse(e.to_string()))?;
    let entries = value
        .get("palettes")
        .and_then(Value::as_array)
        .ok_or(PaletteError::MissingPalettes)?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let raw: RawPalette = serde_json::from_value(entry.clone())
                .map_err(|e| PaletteError::Parse(format!("palette {}: {}", i, e)))?;
            let colors = raw
                .colors
                .iter()
                .enumerate()
                .map(|(j, c)| {
                    c.try_resolve().ok_or_else(|| {
                        PaletteError::Parse(format!("palette '{}' color {}: not a color", raw.name, j))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Palette { name: raw.name, colors })
        })
        .collect()
}

/// Loaded palettes plus the active swatch list.
///
/// The active palette is always a copy: selecting replaces it whole, and
/// nothing writes back into the loaded list.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteLibrary {
    palettes: Vec<Palette>,
    current: Option<usize>,
    active: Option<Palette>,
}

impl Default for PaletteLibrary {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl PaletteLibrary {
    /// Library of built-in palettes with the default palette active.
    pub fn with_builtin() -> Self {
        Self::from_palettes(palettes::builtin_palettes())
    }

    /// Library over `palettes` with the first one active. An empty list falls
    /// back to the built-ins.
    pub fn from_palettes(palettes: Vec<Palette>) -> Self {
        if palettes.is_empty() {
            tracing::warn!("palette document is empty, using built-in palettes");
            return Self::with_builtin();
        }
        let active = palettes.first().cloned();
        Self { palettes, current: Some(0), active }
    }

    /// Load palettes from a document, falling back to the built-ins when the
    /// file is missing or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no palette document, using built-in palettes");
            return Self::with_builtin();
        }
        Self::open(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "using built-in palettes");
            Self::with_builtin()
        })
    }

    /// Load palettes from a document the user asked for by name. A missing or
    /// invalid file is an error.
    pub fn open(path: &Path) -> Result<Self, PaletteError> {
        let palettes = parse_palette_document(&std::fs::read_to_string(path)?)?;
        tracing::info!(path = %path.display(), count = palettes.len(), "loaded palettes");
        Ok(Self::from_palettes(palettes))
    }

    /// Replace the loaded palettes from document text. Returns the number of
    /// palettes read. On error nothing changes.
    pub fn import_str(&mut self, text: &str) -> Result<usize, PaletteError> {
        let palettes = parse_palette_document(text)?;
        let count = palettes.len();
        *self = Self::from_palettes(palettes);
        Ok(count)
    }

    /// Make the palette at `index` active.
    pub fn select(&mut self, index: usize) -> Result<&Palette, PaletteError> {
        let palette = self
            .palettes
            .get(index)
            .cloned()
            .ok_or(PaletteError::IndexOutOfRange { index, count: self.palettes.len() })?;
        self.current = Some(index);
        Ok(self.active.insert(palette))
    }

    /// Make the first palette named `name` active.
    pub fn select_by_name(&mut self, name: &str) -> Result<&Palette, PaletteError> {
        let index = self
            .palettes
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| PaletteError::NotFound(name.to_string()))?;
        self.select(index)
    }

    /// Activate a palette that is not part of the loaded list, such as one
    /// carried by an imported pattern.
    pub fn set_active(&mut self, palette: Palette) {
        self.current = self.palettes.iter().position(|p| *p == palette);
        self.active = Some(palette);
    }

    pub fn clear_active(&mut self) {
        self.current = None;
        self.active = None;
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|p| p.name.as_str())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn active(&self) -> Option<&Palette> {
        self.active.as_ref()
    }

    /// Active swatches, empty when no palette is active.
    pub fn active_colors(&self) -> &[Rgb] {
        self.active.as_ref().map_or(&[], |p| p.colors.as_slice())
    }
}

/// Ordered list of distinct colors collected while designing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingColors {
    colors: Vec<Rgb>,
}

impl WorkingColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `color` unless already present. Returns whether it was added.
    pub fn add(&mut self, color: Rgb) -> bool {
        if self.colors.contains(&color) {
            return false;
        }
        self.colors.push(color);
        true
    }

    pub fn remove(&mut self, index: usize) -> Result<Rgb, PaletteError> {
        if index >= self.colors.len() {
            return Err(PaletteError::WorkingColorOutOfRange { index, count: self.colors.len() });
        }
        Ok(self.colors.remove(index))
    }

    /// Replace the list with the distinct colors of `palette`.
    pub fn replace_with(&mut self, palette: &Palette) {
        self.colors.clear();
        for &color in &palette.colors {
            self.add(color);
        }
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }

    /// Package the working colors as a named palette.
    pub fn as_palette(&self, name: &str) -> Result<Palette, PaletteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PaletteError::EmptyName);
        }
        if self.colors.is_empty() {
            return Err(PaletteError::NoWorkingColors);
        }
        Ok(Palette { name: name.to_string(), colors: self.colors.clone() })
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Append `palette` to the palette document at `path`, creating the document
/// if it does not exist. Existing entries are kept as written. Returns the
/// new number of palettes.
pub fn export_palette(path: &Path, palette: &Palette) -> Result<usize, PaletteError> {
    let mut document = if path.exists() {
        let text = std::fs::read_to_string(path)?;
        json5::from_str::<Value>(&text).map_err(|e| PaletteError::Parse(e.to_string()))?
    } else {
        serde_json::json!({ "palettes": [] })
    };

    let object = document.as_object_mut().ok_or(PaletteError::MissingPalettes)?;
    let entries = object
        .entry("palettes")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or(PaletteError::MissingPalettes)?;
    entries.push(serde_json::to_value(palette)?);
    let count = entries.len();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
    tracing::info!(path = %path.display(), name = %palette.name, count, "exported palette");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r##"{
        // hand-edited
        palettes: [
            { name: "Earth", colors: [[180, 130, 80], "#503C28"] },
            { name: "Sea", colors: [{ "levels": [10, 20, 30, 255] }], },
        ],
    }"##;

    #[test]
    fn test_parse_palette_document() {
        let palettes = parse_palette_document(DOC).unwrap();
        assert_eq!(palettes.len(), 2);
        assert_eq!(palettes[0].colors, vec![Rgb::new(180, 130, 80), Rgb::new(80, 60, 40)]);
        assert_eq!(palettes[1].colors, vec![Rgb::new(10, 20, 30)]);
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        assert!(matches!(parse_palette_document("not json"), Err(PaletteError::Parse(_))));
        assert!(matches!(parse_palette_document(r#"{"colors": []}"#), Err(PaletteError::MissingPalettes)));
        assert!(matches!(
            parse_palette_document(r#"{"palettes": [{"name": "x", "colors": [true]}]}"#),
            Err(PaletteError::Parse(_))
        ));
        assert!(matches!(
            parse_palette_document(r#"{"palettes": [{"colors": []}]}"#),
            Err(PaletteError::Parse(_))
        ));
    }

    #[test]
    fn test_import_failure_leaves_library_untouched() {
        let mut library = PaletteLibrary::with_builtin();
        let before = library.clone();
        assert!(library.import_str(r#"{"palettes": "nope"}"#).is_err());
        assert_eq!(library, before);

        assert_eq!(library.import_str(DOC).unwrap(), 2);
        assert_eq!(library.names().collect::<Vec<_>>(), vec!["Earth", "Sea"]);
        assert_eq!(library.active().unwrap().name, "Earth");
    }

    #[test]
    fn test_select_replaces_active_copy() {
        let mut library = PaletteLibrary::from_palettes(parse_palette_document(DOC).unwrap());
        library.select(1).unwrap();
        assert_eq!(library.active_colors(), &[Rgb::new(10, 20, 30)]);
        assert_eq!(library.current_index(), Some(1));
        assert_eq!(library.palettes()[0].colors.len(), 2);

        assert!(matches!(library.select(5), Err(PaletteError::IndexOutOfRange { index: 5, count: 2 })));
        assert_eq!(library.current_index(), Some(1));

        library.select_by_name("Earth").unwrap();
        assert_eq!(library.current_index(), Some(0));
        assert!(library.select_by_name("Fire").is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_builtin() {
        let dir = TempDir::new().unwrap();
        let library = PaletteLibrary::load(&dir.path().join("missing.json"));
        assert_eq!(library, PaletteLibrary::with_builtin());
        assert_eq!(library.active().unwrap().name, palettes::DEFAULT_PALETTE);
    }

    #[test]
    fn test_open_requires_a_readable_document() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(PaletteLibrary::open(&missing), Err(PaletteError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ palettes: 3 }").unwrap();
        assert!(matches!(PaletteLibrary::open(&broken), Err(PaletteError::MissingPalettes)));
        assert_eq!(PaletteLibrary::load(&broken), PaletteLibrary::with_builtin());

        let good = dir.path().join("palettes.json");
        std::fs::write(&good, DOC).unwrap();
        assert_eq!(PaletteLibrary::open(&good).unwrap().names().collect::<Vec<_>>(), vec!["Earth", "Sea"]);
    }

    #[test]
    fn test_clear_and_set_active() {
        let mut library = PaletteLibrary::with_builtin();
        library.clear_active();
        assert!(library.active().is_none());
        assert!(library.active_colors().is_empty());

        let custom = Palette { name: "Custom".to_string(), colors: vec![Rgb::new(1, 1, 1)] };
        library.set_active(custom.clone());
        assert_eq!(library.active(), Some(&custom));
        assert_eq!(library.current_index(), None);
    }

    #[test]
    fn test_working_colors_dedupe() {
        let mut working = WorkingColors::new();
        assert!(working.add(Rgb::new(1, 2, 3)));
        assert!(!working.add(Rgb::new(1, 2, 3)));
        assert!(working.add(Rgb::new(3, 2, 1)));
        assert_eq!(working.len(), 2);
        assert_eq!(working.remove(0).unwrap(), Rgb::new(1, 2, 3));
        assert!(working.remove(4).is_err());

        let palette = Palette { name: "p".to_string(), colors: vec![Rgb::new(9, 9, 9), Rgb::new(9, 9, 9)] };
        working.replace_with(&palette);
        assert_eq!(working.as_slice(), &[Rgb::new(9, 9, 9)]);
    }

    #[test]
    fn test_as_palette_requires_name_and_colors() {
        let mut working = WorkingColors::new();
        assert!(matches!(working.as_palette("Mine"), Err(PaletteError::NoWorkingColors)));
        working.add(Rgb::new(1, 2, 3));
        assert!(matches!(working.as_palette("  "), Err(PaletteError::EmptyName)));
        assert_eq!(working.as_palette(" Mine ").unwrap().name, "Mine");
    }

    #[test]
    fn test_export_palette_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("palettes.json");
        std::fs::write(&path, DOC).unwrap();

        let palette = Palette { name: "Mine".to_string(), colors: vec![Rgb::new(1, 2, 3)] };
        assert_eq!(export_palette(&path, &palette).unwrap(), 3);

        let palettes = parse_palette_document(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(palettes[0].name, "Earth");
        assert_eq!(palettes[1].name, "Sea");
        assert_eq!(palettes[2], palette);
    }

    #[test]
    fn test_export_palette_creates_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("palettes.json");
        let palette = Palette { name: "Mine".to_string(), colors: vec![Rgb::new(1, 2, 3)] };
        assert_eq!(export_palette(&path, &palette).unwrap(), 1);
        assert_eq!(parse_palette_document(&std::fs::read_to_string(&path).unwrap()).unwrap(), vec![palette]);
    }
}
