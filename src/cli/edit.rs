//! CLI dispatch for the `krok edit` command.
//!
//! The script is parsed completely before the pattern is opened. A failing
//! command stops the run before the final save.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use crate::config::LoadedConfig;
use crate::script::parse_script;
use crate::session::Outcome;

use super::{open_session, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the edit command
pub fn run_edit(
    loaded: &LoadedConfig,
    input: &Path,
    script: Option<&Path>,
    output: Option<&Path>,
    palettes: Option<&Path>,
) -> ExitCode {
    let text = match script {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading '{}': {}", path.display(), e)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map(|_| text)
                .map_err(|e| format!("Error reading stdin: {}", e))
        }
    };
    let text = match text {
        Ok(text) => text,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let commands = match parse_script(&text) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("Error: script {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut session = match open_session(loaded, input, palettes) {
        Ok(session) => session,
        Err(code) => return code,
    };

    let mut changes = 0;
    for (i, command) in commands.into_iter().enumerate() {
        match session.apply(command) {
            Ok(Outcome::Changed) => changes += 1,
            Ok(Outcome::Unchanged) => {}
            Ok(Outcome::Saved(path)) => println!("Saved: {}", path.display()),
            Err(e) => {
                eprintln!("Error: command {}: {}", i + 1, e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    let output = output.unwrap_or(input);
    if let Err(e) = session.save(output) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {} ({} changes)", output.display(), changes);
    ExitCode::from(EXIT_SUCCESS)
}
