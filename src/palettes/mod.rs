//! Built-in palette definitions.
//!
//! Used as the fallback dataset when no palette document can be read.

use crate::color::Rgb;
use crate::models::Palette;

/// Name of the palette selected when nothing else is available.
pub const DEFAULT_PALETTE: &str = "Default Palette";

/// List of all available built-in palette names.
const BUILTIN_NAMES: &[&str] = &[DEFAULT_PALETTE];

/// Returns a list of all available built-in palette names.
pub fn list_builtins() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}

/// Returns a built-in palette by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Palette> {
    match name {
        DEFAULT_PALETTE => Some(default_palette()),
        _ => None,
    }
}

/// All built-in palettes in listing order.
pub fn builtin_palettes() -> Vec<Palette> {
    BUILTIN_NAMES.iter().filter_map(|name| get_builtin(name)).collect()
}

/// The three weft defaults followed by earth tones.
pub fn default_palette() -> Palette {
    Palette { name: DEFAULT_PALETTE.to_string(), colors: DEFAULT_COLORS.to_vec() }
}

const DEFAULT_COLORS: [Rgb; 8] = [
    Rgb::new(200, 100, 100), // red
    Rgb::new(100, 200, 100), // green
    Rgb::new(100, 100, 200), // blue
    Rgb::new(220, 180, 120), // tan
    Rgb::new(180, 130, 80),  // brown
    Rgb::new(80, 60, 40),    // dark brown
    Rgb::new(240, 240, 200), // cream
    Rgb::new(80, 100, 120),  // slate blue
];
