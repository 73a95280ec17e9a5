//! CLI dispatch for the `krok palettes` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Subcommand;

use crate::color::parse_color;
use crate::config::LoadedConfig;
use crate::models::Palette;
use crate::palette::{export_palette, parse_palette_document, PaletteError, WorkingColors};
use crate::palettes;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Palette subcommands
#[derive(Subcommand)]
pub enum PaletteAction {
    /// List palettes from the palette document (or the built-ins)
    List {
        /// Palette document (default: from krok.toml, else palettes.json)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show the colors of a palette
    Show {
        /// Palette name or index
        name: String,

        /// Palette document (default: from krok.toml, else palettes.json)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Append a palette to a palette document, creating it if needed
    Export {
        /// Palette document to append to
        file: PathBuf,

        /// Name of the new palette
        #[arg(long)]
        name: String,

        /// Colors of the new palette (hex, rgb(), or CSS names); repeatable
        #[arg(long = "color", required = true)]
        colors: Vec<String>,
    },
}

/// Execute the palettes command
pub fn run_palettes(loaded: &LoadedConfig, action: PaletteAction) -> ExitCode {
    match action {
        PaletteAction::List { file } => {
            let (source, list) = match load_list(loaded, file.as_deref()) {
                Ok(found) => found,
                Err(code) => return code,
            };
            println!("Palettes ({}):", source);
            for (i, palette) in list.iter().enumerate() {
                println!("  {}: {} ({} colors)", i, palette.name, palette.colors.len());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        PaletteAction::Show { name, file } => {
            let (_, list) = match load_list(loaded, file.as_deref()) {
                Ok(found) => found,
                Err(code) => return code,
            };
            let found = match name.parse::<usize>() {
                Ok(index) => list.get(index),
                Err(_) => list.iter().find(|p| p.name == name),
            };
            match found {
                Some(palette) => {
                    println!("Palette: {}", palette.name);
                    println!();
                    for (i, color) in palette.colors.iter().enumerate() {
                        println!("  {}: {}", i, color);
                    }
                    ExitCode::from(EXIT_SUCCESS)
                }
                None => {
                    eprintln!("Error: Unknown palette '{}'", name);
                    eprintln!();
                    eprintln!("Available palettes:");
                    for palette in &list {
                        eprintln!("  {}", palette.name);
                    }
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        PaletteAction::Export { file, name, colors } => {
            let mut working = WorkingColors::new();
            for text in &colors {
                match parse_color(text) {
                    Ok(color) => {
                        working.add(color);
                    }
                    Err(e) => {
                        eprintln!("Error: Invalid color '{}': {}", text, e);
                        return ExitCode::from(EXIT_INVALID_ARGS);
                    }
                }
            }
            let palette = match working.as_palette(&name) {
                Ok(palette) => palette,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            };
            match export_palette(&file, &palette) {
                Ok(count) => {
                    println!("Saved: {} ({} palettes)", file.display(), count);
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
    }
}

/// Palettes from the `--file` document, else the configured one. Only the
/// configured document may be absent, giving the built-ins; any document that
/// cannot be read or parsed is an error here.
fn load_list(loaded: &LoadedConfig, file: Option<&Path>) -> Result<(String, Vec<Palette>), ExitCode> {
    let path = match file {
        Some(path) => path.to_path_buf(),
        None => {
            let path = loaded.palette_path();
            if !path.exists() {
                return Ok(("built-in".to_string(), palettes::builtin_palettes()));
            }
            path
        }
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(PaletteError::from)
        .and_then(|text| parse_palette_document(&text));
    match parsed {
        Ok(list) => Ok((path.display().to_string(), list)),
        Err(e) => {
            eprintln!("Error: '{}': {}", path.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}
