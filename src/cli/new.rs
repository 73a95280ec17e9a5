//! CLI dispatch for the `krok new` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Utc;

use crate::config::{CliOverrides, LoadedConfig};
use crate::document::default_file_name;

use super::{effective_config, new_session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the new command
pub fn run_new(
    loaded: &LoadedConfig,
    overrides: &CliOverrides,
    output: Option<&Path>,
    title: Option<&str>,
    author: Option<&str>,
) -> ExitCode {
    let loaded = match effective_config(loaded, overrides) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let mut session = match new_session(&loaded, None) {
        Ok(session) => session,
        Err(code) => return code,
    };
    if let Some(title) = title {
        session.metadata_mut().title = title.to_string();
    }
    if let Some(author) = author {
        session.metadata_mut().author = author.to_string();
    }

    let output = output.map_or_else(|| PathBuf::from(default_file_name(Utc::now(), "json")), Path::to_path_buf);
    if let Err(e) = session.save(&output) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let (width, height) = session.store().dimensions();
    println!("Saved: {} ({}x{})", output.display(), width, height);
    ExitCode::from(EXIT_SUCCESS)
}
