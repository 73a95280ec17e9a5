//! CLI dispatch for the `krok render` command.

use std::path::Path;
use std::process::ExitCode;

use crate::color::DEFAULT_WARP;
use crate::config::{CliOverrides, LoadedConfig};
use crate::output::{generate_output_path, save_png};
use crate::render::render_pattern;

use super::{effective_config, read_document, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    loaded: &LoadedConfig,
    overrides: &CliOverrides,
    input: &Path,
    output: Option<&Path>,
) -> ExitCode {
    let config = match effective_config(loaded, overrides) {
        Ok(loaded) => loaded.config,
        Err(code) => return code,
    };
    let document = match read_document(input) {
        Ok(document) => document,
        Err(code) => return code,
    };

    let image = match render_pattern(&document.store, document.warp.unwrap_or(DEFAULT_WARP), &config.render_options()) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: cannot render '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let output_path = generate_output_path(input, "png", output);
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
