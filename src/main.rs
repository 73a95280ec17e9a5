//! Krokbragd - Command-line tool for designing and rendering Krokbragd weaving patterns

use std::process::ExitCode;

use krokbragd::cli;

fn main() -> ExitCode {
    cli::run()
}
