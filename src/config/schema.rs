//! Configuration schema types for `krok.toml`
//!
//! Every section and field is optional; missing values take the defaults
//! below.

use crate::color::{parse_color, Rgb};
use crate::color_cache::RECENT_COLORS_LIMIT;
use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::models::DEFAULT_CELL_SIZE;
use crate::palette::DEFAULT_PALETTE_FILE;
use crate::pattern::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};
use crate::render::{RenderOptions, DEFAULT_GRID_COLOR, MAX_BORDER, MAX_CELL_SIZE};
use crate::session::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Starting size of new patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub width: usize,
    pub height: usize,
    /// Cell size in pixels for rendering and saved display state
    pub cell_size: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT, cell_size: DEFAULT_CELL_SIZE }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum undo (and redo) entries
    pub depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { depth: DEFAULT_HISTORY_DEPTH }
    }
}

/// Palette document location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PalettesConfig {
    /// Palette document; relative paths resolve against the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// PNG rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub grid_lines: bool,
    /// Any color accepted by [`parse_color`]
    pub grid_color: String,
    /// Warp-colored frame width in pixels
    pub border: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { grid_lines: true, grid_color: DEFAULT_GRID_COLOR.to_hex(), border: 0 }
    }
}

/// Color picker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Number of recent colors remembered
    pub recent_limit: usize,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self { recent_limit: RECENT_COLORS_LIMIT }
    }
}

/// Complete `krok.toml` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KrokConfig {
    pub defaults: DefaultsConfig,
    pub history: HistoryConfig,
    pub palettes: PalettesConfig,
    pub render: RenderConfig,
    pub colors: ColorsConfig,
}

/// A validation error in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.grid_color")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "krok.toml: '{}' {}", self.field, self.message)
    }
}

impl KrokConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        for (field, value) in [("defaults.width", self.defaults.width), ("defaults.height", self.defaults.height)] {
            if !(1..=MAX_DIMENSION).contains(&value) {
                fail(field, format!("must be between 1 and {}", MAX_DIMENSION));
            }
        }
        if !(1..=MAX_CELL_SIZE).contains(&self.defaults.cell_size) {
            fail("defaults.cell_size", format!("must be between 1 and {}", MAX_CELL_SIZE));
        }
        if self.history.depth == 0 {
            fail("history.depth", "must be at least 1".to_string());
        }
        if self.colors.recent_limit == 0 {
            fail("colors.recent_limit", "must be at least 1".to_string());
        }
        if let Err(e) = parse_color(&self.render.grid_color) {
            fail("render.grid_color", format!("is not a valid color: {}", e));
        }
        if self.render.border > MAX_BORDER {
            fail("render.border", format!("must be at most {}", MAX_BORDER));
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Session settings from `[defaults]`, `[history]`, and `[colors]`.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            width: self.defaults.width,
            height: self.defaults.height,
            history_depth: self.history.depth,
            recent_limit: self.colors.recent_limit,
            cell_size: self.defaults.cell_size,
        }
    }

    /// Render settings from `[defaults]` and `[render]`.
    pub fn render_options(&self) -> RenderOptions {
        let grid = self.render.grid_lines.then(|| self.grid_color());
        RenderOptions { cell_size: self.defaults.cell_size, grid, border: self.render.border }
    }

    fn grid_color(&self) -> Rgb {
        parse_color(&self.render.grid_color).unwrap_or(DEFAULT_GRID_COLOR)
    }

    /// Palette document path, or the default file name.
    pub fn palette_path(&self) -> PathBuf {
        self.palettes.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_PALETTE_FILE))
    }
}
