//! CLI dispatch for the `krok order` command.

use std::path::Path;
use std::process::ExitCode;

use crate::output::save_text;
use crate::weave_order::WeaveOrder;

use super::{display_title, read_document, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the order command
pub fn run_order(input: &Path, output: Option<&Path>) -> ExitCode {
    let document = match read_document(input) {
        Ok(document) => document,
        Err(code) => return code,
    };

    let order = WeaveOrder::new(&document.store, &display_title(&document, input));
    match output {
        Some(path) => {
            if let Err(e) = save_text(&order.to_string(), path) {
                eprintln!("Error: Failed to save '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            println!("Saved: {}", path.display());
        }
        None => print!("{}", order),
    }
    ExitCode::from(EXIT_SUCCESS)
}
