//! Command scripts: one command per line, dispatched through a verb table.
//!
//! ```text
//! # paint the second row's visible weft at column 3
//! color #C86464
//! paint 1 3
//! set 2 0 rgb(80, 60, 40)
//! shift 2
//! undo
//! save out.json
//! ```
//!
//! Rows, columns, wefts, and palette indices are zero-based. Blank lines and
//! lines starting with `#` are skipped. A script is parsed completely before
//! any command runs.

use crate::color::parse_color;
use crate::color::Rgb;
use crate::session::Command;
use std::path::PathBuf;
use thiserror::Error;

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

type ParseFn = fn(&[&str]) -> Result<Command, String>;

/// An entry of the dispatch table.
pub struct Verb {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    parse: ParseFn,
}

impl Verb {
    pub fn parse(&self, args: &[&str]) -> Result<Command, String> {
        (self.parse)(args).map_err(|e| format!("{} (usage: {})", e, self.usage))
    }
}

/// Every verb a script may use.
pub const VERBS: &[Verb] = &[
    Verb { name: "color", usage: "color <color>", summary: "set the working color", parse: parse_set_color },
    Verb {
        name: "paint",
        usage: "paint <row> <col>",
        summary: "paint the weft visible at a column across its row",
        parse: parse_paint,
    },
    Verb {
        name: "set",
        usage: "set <row> <weft> <color>",
        summary: "set one weft of a row",
        parse: parse_set_weft,
    },
    Verb { name: "shift", usage: "shift <row>", summary: "rotate the weft colors of a row", parse: parse_shift },
    Verb { name: "resize", usage: "resize <width> <height>", summary: "resize the grid", parse: parse_resize },
    Verb {
        name: "new-pattern",
        usage: "new-pattern <width> <height>",
        summary: "restart at a new size and clear history",
        parse: parse_new_pattern,
    },
    Verb {
        name: "new-project",
        usage: "new-project [<width> <height>]",
        summary: "start a blank project",
        parse: parse_new_project,
    },
    Verb { name: "undo", usage: "undo", summary: "undo the last change", parse: |args| no_args(args, Command::Undo) },
    Verb { name: "redo", usage: "redo", summary: "redo the last undone change", parse: |args| no_args(args, Command::Redo) },
    Verb { name: "palette", usage: "palette <index>", summary: "activate a palette", parse: parse_palette },
    Verb {
        name: "swatch",
        usage: "swatch <index>",
        summary: "use a swatch of the active palette as working color",
        parse: parse_swatch,
    },
    Verb {
        name: "add-working",
        usage: "add-working",
        summary: "add the working color to the working colors",
        parse: |args| no_args(args, Command::AddWorking),
    },
    Verb {
        name: "remove-working",
        usage: "remove-working <index>",
        summary: "remove one of the working colors",
        parse: parse_remove_working,
    },
    Verb {
        name: "load-working",
        usage: "load-working",
        summary: "replace the working colors with the active palette",
        parse: |args| no_args(args, Command::LoadWorking),
    },
    Verb {
        name: "export-working",
        usage: "export-working <path> <name>",
        summary: "append the working colors as a palette to a palette document",
        parse: parse_export_working,
    },
    Verb {
        name: "import-palettes",
        usage: "import-palettes <path>",
        summary: "replace the palettes from a palette document",
        parse: parse_import_palettes,
    },
    Verb { name: "warp", usage: "warp <color>", summary: "set the warp color", parse: parse_warp },
    Verb { name: "save", usage: "save <path>", summary: "write the pattern document", parse: parse_save },
];

/// Look up a verb by name.
pub fn find_verb(name: &str) -> Option<&'static Verb> {
    VERBS.iter().find(|verb| verb.name == name)
}

/// Parse one line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();
    let verb = find_verb(name).ok_or_else(|| format!("unknown command '{}'", name))?;
    verb.parse(&args).map(Some)
}

/// Parse a whole script. Fails on the first bad line without returning any
/// commands.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(message) => return Err(ScriptError { line: i + 1, message }),
        }
    }
    Ok(commands)
}

fn index(arg: Option<&&str>, what: &str) -> Result<usize, String> {
    let arg = arg.ok_or_else(|| format!("missing {}", what))?;
    arg.parse().map_err(|_| format!("invalid {} '{}'", what, arg))
}

/// Colors may contain spaces (`rgb(1, 2, 3)`), so they take the rest of the line.
fn color(args: &[&str]) -> Result<Rgb, String> {
    if args.is_empty() {
        return Err("missing color".to_string());
    }
    let text = args.join(" ");
    parse_color(&text).map_err(|e| format!("invalid color '{}': {}", text, e))
}

fn exact(args: &[&str], count: usize) -> Result<(), String> {
    if args.len() > count {
        return Err(format!("unexpected argument '{}'", args[count]));
    }
    Ok(())
}

fn no_args(args: &[&str], command: Command) -> Result<Command, String> {
    exact(args, 0)?;
    Ok(command)
}

fn parse_set_color(args: &[&str]) -> Result<Command, String> {
    color(args).map(Command::SetColor)
}

fn parse_warp(args: &[&str]) -> Result<Command, String> {
    color(args).map(Command::SetWarp)
}

fn parse_paint(args: &[&str]) -> Result<Command, String> {
    exact(args, 2)?;
    Ok(Command::Paint { row: index(args.first(), "row")?, col: index(args.get(1), "column")? })
}

fn parse_set_weft(args: &[&str]) -> Result<Command, String> {
    let row = index(args.first(), "row")?;
    let weft = index(args.get(1), "weft")?;
    let color = color(args.get(2..).unwrap_or_default())?;
    Ok(Command::SetWeft { row, weft, color })
}

fn parse_shift(args: &[&str]) -> Result<Command, String> {
    exact(args, 1)?;
    Ok(Command::Shift { row: index(args.first(), "row")? })
}

fn dimensions(args: &[&str]) -> Result<(usize, usize), String> {
    exact(args, 2)?;
    Ok((index(args.first(), "width")?, index(args.get(1), "height")?))
}

fn parse_resize(args: &[&str]) -> Result<Command, String> {
    let (width, height) = dimensions(args)?;
    Ok(Command::Resize { width, height })
}

fn parse_new_pattern(args: &[&str]) -> Result<Command, String> {
    let (width, height) = dimensions(args)?;
    Ok(Command::NewPattern { width, height })
}

fn parse_new_project(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        // 0 is out of range and selects the default size
        return Ok(Command::NewProject { width: 0, height: 0 });
    }
    let (width, height) = dimensions(args)?;
    Ok(Command::NewProject { width, height })
}

fn parse_palette(args: &[&str]) -> Result<Command, String> {
    exact(args, 1)?;
    index(args.first(), "palette index").map(Command::SelectPalette)
}

fn parse_swatch(args: &[&str]) -> Result<Command, String> {
    exact(args, 1)?;
    index(args.first(), "swatch index").map(Command::Swatch)
}

fn parse_remove_working(args: &[&str]) -> Result<Command, String> {
    exact(args, 1)?;
    index(args.first(), "working color index").map(Command::RemoveWorking)
}

/// The palette name takes the rest of the line, so it may contain spaces.
fn parse_export_working(args: &[&str]) -> Result<Command, String> {
    let path = args.first().ok_or("missing path")?;
    if args.len() < 2 {
        return Err("missing palette name".to_string());
    }
    Ok(Command::ExportWorking { path: PathBuf::from(path), name: args[1..].join(" ") })
}

fn parse_import_palettes(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("missing path".to_string());
    }
    Ok(Command::ImportPalettes(PathBuf::from(args.join(" "))))
}

fn parse_save(args: &[&str]) -> Result<Command, String> {
    if args.is_empty() {
        return Err("missing path".to_string());
    }
    Ok(Command::Save(PathBuf::from(args.join(" "))))
}
