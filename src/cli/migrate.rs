//! CLI dispatch for the `krok migrate` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::LoadedConfig;

use super::{open_session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the migrate command
pub fn run_migrate(loaded: &LoadedConfig, input: &Path, output: Option<&Path>) -> ExitCode {
    let session = match open_session(loaded, input, None) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let output = output.map_or_else(|| migrated_path(input), Path::to_path_buf);
    if let Err(e) = session.save(&output) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}

/// `pattern.json` -> `pattern_v2.json`, next to the input.
fn migrated_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("pattern");
    input.with_file_name(format!("{}_v2.json", stem))
}
