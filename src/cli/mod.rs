//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod edit;
mod info;
mod migrate;
mod new;
mod order;
mod palettes;
mod render;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{self, CliOverrides, LoadedConfig};
use crate::document::{DocumentError, LoadedDocument};
use crate::palette::PaletteLibrary;
use crate::render::{MAX_BORDER, MAX_CELL_SIZE};
use crate::session::{Session, SessionError};

pub use palettes::PaletteAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Krokbragd - Design, render, and print three-weft Krokbragd patterns
#[derive(Parser)]
#[command(name = "krok")]
#[command(about = "Krokbragd - Design, render, and print three-weft Krokbragd weaving patterns")]
#[command(version)]
pub struct Cli {
    /// Config file (default: krok.toml found by searching upward)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new pattern document with default colors
    New {
        /// Output file (default: krokbragd_pattern_<timestamp>.json)
        output: Option<PathBuf>,

        /// Grid width in columns (1-100)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height in rows (1-100)
        #[arg(long)]
        height: Option<usize>,

        /// Pattern title
        #[arg(long)]
        title: Option<String>,

        /// Pattern author
        #[arg(long)]
        author: Option<String>,
    },
    /// Show dimensions, format, and statistics of a pattern document
    Info {
        /// Pattern document (2.0 or legacy)
        input: PathBuf,
    },
    /// Render a pattern document to PNG
    Render {
        /// Pattern document (2.0 or legacy)
        input: PathBuf,

        /// Output file or directory (default: {input}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Cell size in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_CELL_SIZE as i64))]
        cell_size: Option<u32>,

        /// Draw without grid lines
        #[arg(long)]
        no_grid: bool,

        /// Width of a warp-colored frame around the pattern, in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=MAX_BORDER as i64))]
        border: Option<u32>,
    },
    /// Print the weave-order table and colors used
    Order {
        /// Pattern document (2.0 or legacy)
        input: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply a command script to a pattern document and save it
    Edit {
        /// Pattern document to edit
        input: PathBuf,

        /// Script file (default: read from stdin)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Palette document for the `palette` and `swatch` commands
        #[arg(long)]
        palettes: Option<PathBuf>,
    },
    /// Convert any supported pattern document to version 2.0
    Migrate {
        /// Pattern document (2.0 or legacy)
        input: PathBuf,

        /// Output file (default: {input}_v2.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List, inspect, and export palettes
    Palettes {
        #[command(subcommand)]
        action: PaletteAction,
    },
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays clean
/// for command output.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Parse arguments and run the selected command
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let loaded = match config::load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::New { output, width, height, title, author } => {
            let overrides = CliOverrides { width, height, ..Default::default() };
            new::run_new(&loaded, &overrides, output.as_deref(), title.as_deref(), author.as_deref())
        }
        Commands::Info { input } => info::run_info(&input),
        Commands::Render { input, output, cell_size, no_grid, border } => {
            let overrides =
                CliOverrides { cell_size, grid_lines: no_grid.then_some(false), border, ..Default::default() };
            render::run_render(&loaded, &overrides, &input, output.as_deref())
        }
        Commands::Order { input, output } => order::run_order(&input, output.as_deref()),
        Commands::Edit { input, script, output, palettes } => {
            edit::run_edit(&loaded, &input, script.as_deref(), output.as_deref(), palettes.as_deref())
        }
        Commands::Migrate { input, output } => migrate::run_migrate(&loaded, &input, output.as_deref()),
        Commands::Palettes { action } => palettes::run_palettes(&loaded, action),
    }
}

/// Apply CLI overrides and re-validate. Prints errors and returns the exit
/// code on failure.
pub(crate) fn effective_config(loaded: &LoadedConfig, overrides: &CliOverrides) -> Result<LoadedConfig, ExitCode> {
    let mut effective = loaded.clone();
    config::merge_cli_overrides(&mut effective.config, overrides);
    let errors = effective.config.validate();
    if errors.is_empty() {
        return Ok(effective);
    }
    for error in errors {
        eprintln!("Error: {}", error);
    }
    Err(ExitCode::from(EXIT_INVALID_ARGS))
}

/// A session configured from `loaded`, with its palette library.
///
/// `palettes` is a document named on the command line, taken relative to the
/// working directory; it must exist. Otherwise the configured document is
/// used when present, else the built-ins.
pub(crate) fn new_session(loaded: &LoadedConfig, palettes: Option<&Path>) -> Result<Session, ExitCode> {
    let library = match palettes {
        Some(path) => PaletteLibrary::open(path).map_err(|e| {
            eprintln!("Error: cannot load palettes '{}': {}", path.display(), e);
            ExitCode::from(EXIT_ERROR)
        })?,
        None => PaletteLibrary::load(&loaded.palette_path()),
    };
    Ok(Session::new(loaded.config.session_options(), library))
}

/// Open `input` into a new session, printing compatibility warnings.
pub(crate) fn open_session(
    loaded: &LoadedConfig,
    input: &Path,
    palettes: Option<&Path>,
) -> Result<Session, ExitCode> {
    let mut session = new_session(loaded, palettes)?;
    match session.open(input) {
        Ok(warnings) => {
            for warning in warnings {
                eprintln!("Warning: {}", warning);
            }
            Ok(session)
        }
        Err(e) => Err(report_document_error(input, &e)),
    }
}

/// Load a document for read-only commands, printing compatibility warnings.
pub(crate) fn read_document(input: &Path) -> Result<LoadedDocument, ExitCode> {
    match crate::document::load_document(input) {
        Ok(loaded) => {
            for warning in &loaded.warnings {
                eprintln!("Warning: {}", warning);
            }
            Ok(loaded)
        }
        Err(e) => Err(report_document_error(input, &SessionError::Document(e))),
    }
}

fn report_document_error(input: &Path, error: &SessionError) -> ExitCode {
    eprintln!("Error: cannot load '{}': {}", input.display(), error);
    match error {
        SessionError::Document(DocumentError::Io(_)) => ExitCode::from(EXIT_INVALID_ARGS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Title for printed output: the document title, else the file stem.
pub(crate) fn display_title(loaded: &LoadedDocument, input: &Path) -> String {
    loaded
        .metadata
        .as_ref()
        .map(|m| m.title.clone())
        .filter(|t| !t.is_empty())
        .or_else(|| input.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
