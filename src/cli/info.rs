//! CLI dispatch for the `krok info` command.

use std::path::Path;
use std::process::ExitCode;

use crate::color::DEFAULT_WARP;
use crate::weave_order::PatternStats;

use super::{display_title, read_document, EXIT_SUCCESS};

/// Execute the info command
pub fn run_info(input: &Path) -> ExitCode {
    let loaded = match read_document(input) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let stats = PatternStats::of(&loaded.store);
    println!("File: {}", input.display());
    println!("Format: {}", loaded.format);
    println!("Title: {}", display_title(&loaded, input));
    if let Some(metadata) = &loaded.metadata {
        if !metadata.author.is_empty() {
            println!("Author: {}", metadata.author);
        }
        if !metadata.created.is_empty() {
            println!("Created: {}", metadata.created);
        }
    }
    println!("Grid: {} x {}", stats.columns, stats.rows);
    println!("Unique colors: {}", stats.unique_colors);
    println!("Weft changes: {}", stats.weft_changes);
    println!("Warp: {}", loaded.warp.unwrap_or(DEFAULT_WARP));
    match &loaded.palette {
        Some(palette) => println!("Palette: {} ({} colors)", palette.name, palette.colors.len()),
        None => println!("Palette: none"),
    }
    ExitCode::from(EXIT_SUCCESS)
}
