//! Pattern document import and export
//!
//! Documents come in two shapes:
//! - **2.0**: `version`, `metadata`, `pattern`, and `display` objects
//! - **Legacy**: no `pattern` object; `gridWidth`, `gridHeight`, `warpColor`,
//!   `weftPattern`, and `paletteColors` sit at the top level
//!
//! Parsing is all-or-nothing: [`parse_document`] builds a complete
//! [`LoadedDocument`] or fails, and never touches live state.

use crate::color::{ColorValue, Rgb, WEFT_COUNT};
use crate::models::{
    DisplayState, LegacyDocument, Metadata, Palette, PatternDocument, PatternSection, FORMAT_VERSION,
};
use crate::pattern::{Cell, PatternStore, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Name written for the palette when no palette is active.
pub const DEFAULT_PALETTE_NAME: &str = "default";

/// Warning attached to documents without a version tag.
pub const LEGACY_WARNING: &str =
    "This pattern was created with an older version and may not load correctly.";

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read the document file
    #[error("failed to read pattern document: {0}")]
    Io(#[from] std::io::Error),
    /// Not valid JSON, or fields of the wrong type
    #[error("invalid pattern document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("pattern document must be a JSON object")]
    NotAnObject,
    /// Neither a `pattern` object nor any legacy pattern field is present
    #[error("document contains no pattern data")]
    MissingPattern,
    #[error("unsupported pattern document version '{0}'")]
    UnsupportedVersion(String),
    #[error("grid size {width}x{height} is out of range (1-{max})", max = MAX_DIMENSION)]
    InvalidDimensions { width: usize, height: usize },
}

/// Which loader read a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Current,
    Legacy,
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Current => write!(f, "{}", FORMAT_VERSION),
            DocumentFormat::Legacy => write!(f, "legacy"),
        }
    }
}

/// A fully parsed document, ready to replace session state.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub format: DocumentFormat,
    pub store: PatternStore,
    pub warp: Option<Rgb>,
    /// Document palette (name and colors), when the document carries colors.
    pub palette: Option<Palette>,
    pub metadata: Option<Metadata>,
    pub display: DisplayState,
    /// Compatibility notices for the user.
    pub warnings: Vec<String>,
}

/// Parse a pattern document from JSON text.
///
/// # Errors
///
/// Fails on malformed JSON, a non-object document, a document without pattern
/// data, an unknown version on a `pattern` object, or dimensions over the
/// maximum.
pub fn parse_document(text: &str) -> Result<LoadedDocument, DocumentError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(DocumentError::NotAnObject)?;

    let version = object
        .get("version")
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));
    let has_pattern = object.get("pattern").is_some_and(Value::is_object);

    match (version.as_deref(), has_pattern) {
        (Some(FORMAT_VERSION), true) => load_current(serde_json::from_value(value)?),
        (Some(other), true) => Err(DocumentError::UnsupportedVersion(other.to_string())),
        _ => {
            const LEGACY_KEYS: [&str; 3] = ["gridWidth", "gridHeight", "weftPattern"];
            if !LEGACY_KEYS.iter().any(|key| object.contains_key(*key)) {
                return Err(DocumentError::MissingPattern);
            }
            load_legacy(serde_json::from_value(value)?)
        }
    }
}

/// Read and parse a pattern document file.
pub fn load_document(path: &Path) -> Result<LoadedDocument, DocumentError> {
    let text = std::fs::read_to_string(path)?;
    let loaded = parse_document(&text)?;
    tracing::info!(path = %path.display(), format = %loaded.format, "loaded pattern document");
    Ok(loaded)
}

fn load_current(doc: PatternDocument<ColorValue>) -> Result<LoadedDocument, DocumentError> {
    let section = doc.pattern;
    let (width, height) = dimensions(section.grid_width, section.grid_height)?;
    let palette = document_palette(section.current_palette, &section.palette_colors);

    Ok(LoadedDocument {
        format: DocumentFormat::Current,
        store: build_store(width, height, &section.weft_pattern),
        warp: section.warp_color.as_ref().and_then(resolve_optional),
        palette,
        metadata: doc.metadata,
        display: doc.display.unwrap_or_default().normalized(),
        warnings: Vec::new(),
    })
}

fn load_legacy(doc: LegacyDocument<ColorValue>) -> Result<LoadedDocument, DocumentError> {
    let (width, height) = dimensions(doc.grid_width, doc.grid_height)?;
    let mut warnings = Vec::new();
    if doc.version.is_none() {
        tracing::warn!("pattern document has no version tag, reading legacy format");
        warnings.push(LEGACY_WARNING.to_string());
    }

    Ok(LoadedDocument {
        format: DocumentFormat::Legacy,
        store: build_store(width, height, &doc.weft_pattern),
        warp: doc.warp_color.as_ref().and_then(resolve_optional),
        palette: document_palette(None, &doc.palette_colors),
        metadata: None,
        display: DisplayState::default(),
        warnings,
    })
}

/// Declared dimensions; missing or zero values take the defaults.
fn dimensions(width: Option<usize>, height: Option<usize>) -> Result<(usize, usize), DocumentError> {
    let width = width.filter(|&w| w > 0).unwrap_or(DEFAULT_WIDTH);
    let height = height.filter(|&h| h > 0).unwrap_or(DEFAULT_HEIGHT);
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(DocumentError::InvalidDimensions { width, height });
    }
    Ok((width, height))
}

/// Build a store of the declared size. Cells absent from the data keep their
/// weft's default color; data beyond the declared size is ignored.
fn build_store(width: usize, height: usize, weft_pattern: &[Vec<Vec<ColorValue>>]) -> PatternStore {
    if weft_pattern.len() < height {
        tracing::warn!(rows = weft_pattern.len(), height, "pattern data is short, filling with defaults");
    } else if weft_pattern.len() > height {
        tracing::warn!(rows = weft_pattern.len(), height, "pattern data exceeds grid height, truncating");
    }

    let mut store = PatternStore::new(width, height);
    for (row, wefts) in weft_pattern.iter().take(height).enumerate() {
        for (weft, values) in wefts.iter().take(WEFT_COUNT).enumerate() {
            if let Ok(cells) = store.row_weft_mut(row, weft) {
                for (cell, value) in cells.iter_mut().zip(values) {
                    *cell = Cell::Color(value.resolve(weft));
                }
            }
        }
    }
    store
}

fn resolve_optional(value: &ColorValue) -> Option<Rgb> {
    let resolved = value.try_resolve();
    if resolved.is_none() {
        tracing::warn!(?value, "ignoring unrecognized color value");
    }
    resolved
}

fn document_palette(name: Option<String>, colors: &[ColorValue]) -> Option<Palette> {
    if colors.is_empty() && name.is_none() {
        return None;
    }
    Some(Palette {
        name: name.unwrap_or_else(|| DEFAULT_PALETTE_NAME.to_string()),
        colors: colors.iter().filter_map(resolve_optional).collect(),
    })
}

/// Everything besides the cells that goes into an exported document.
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    pub metadata: &'a Metadata,
    pub palette: Option<&'a Palette>,
    pub warp: Rgb,
    pub display: DisplayState,
}

/// Build a 2.0 document. Every cell is written as an `[r, g, b]` triple;
/// unset cells are written as the color they render as.
pub fn export_document(store: &PatternStore, context: &ExportContext<'_>) -> PatternDocument<Rgb> {
    let weft_pattern = (0..store.height())
        .map(|row| {
            (0..WEFT_COUNT)
                .map(|weft| (0..store.width()).map(|col| store.get(row, weft, col)).collect())
                .collect()
        })
        .collect();

    PatternDocument {
        version: Some(FORMAT_VERSION.to_string()),
        metadata: Some(context.metadata.clone()),
        pattern: PatternSection {
            weft_pattern,
            grid_width: Some(store.width()),
            grid_height: Some(store.height()),
            current_palette: Some(
                context.palette.map_or_else(|| DEFAULT_PALETTE_NAME.to_string(), |p| p.name.clone()),
            ),
            palette_colors: context.palette.map(|p| p.colors.clone()).unwrap_or_default(),
            warp_color: Some(context.warp),
        },
        display: Some(context.display),
    }
}

/// Serialize a document as pretty-printed JSON.
pub fn to_json(document: &PatternDocument<Rgb>) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// `krokbragd_pattern_<YYYYMMDDTHHMM>.<extension>`
pub fn default_file_name(now: DateTime<Utc>, extension: &str) -> String {
    format!("krokbragd_pattern_{}.{}", now.format("%Y%m%dT%H%M"), extension)
}
