//! Editing session: the pattern plus everything the user works with.
//!
//! A [`Session`] owns the pattern store, its history, the palette library,
//! the working color, and document state. Every operation that changes the
//! pattern validates its arguments, records a history snapshot, then mutates,
//! so a failed call never leaves a snapshot or a partial edit behind.

use crate::color::{Rgb, DEFAULT_WARP, DEFAULT_WEFTS};
use crate::color_cache::{RecentColors, RECENT_COLORS_LIMIT};
use crate::document::{self, DocumentError, ExportContext};
use crate::history::{History, DEFAULT_HISTORY_DEPTH};
use crate::models::{DisplayState, Metadata, Palette, PatternDocument, DEFAULT_CELL_SIZE};
use crate::palette::{self, PaletteError, PaletteLibrary, WorkingColors};
use crate::pattern::{PatternError, PatternStore, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};
use crate::threading::visible_weft;
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smallest width or height accepted by the "new" operations.
pub const MIN_NEW_DIMENSION: usize = 5;

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Starting values for a session, usually from `krok.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub width: usize,
    pub height: usize,
    pub history_depth: usize,
    pub recent_limit: usize,
    pub cell_size: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            history_depth: DEFAULT_HISTORY_DEPTH,
            recent_limit: RECENT_COLORS_LIMIT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// A user-facing action, as produced by the script dispatch table.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the working color.
    SetColor(Rgb),
    /// Paint the weft visible at `col` across `row` with the working color.
    Paint { row: usize, col: usize },
    /// Set one weft of a row and make its color the working color.
    SetWeft { row: usize, weft: usize, color: Rgb },
    Shift { row: usize },
    Resize { width: usize, height: usize },
    NewPattern { width: usize, height: usize },
    NewProject { width: usize, height: usize },
    Undo,
    Redo,
    /// Activate a palette from the library.
    SelectPalette(usize),
    /// Make a swatch of the active palette the working color.
    Swatch(usize),
    /// Add the working color to the working colors.
    AddWorking,
    /// Drop one of the working colors.
    RemoveWorking(usize),
    /// Replace the working colors with the active palette.
    LoadWorking,
    /// Append the working colors as a named palette to a palette document.
    ExportWorking { path: PathBuf, name: String },
    /// Replace the palette library from a palette document.
    ImportPalettes(PathBuf),
    SetWarp(Rgb),
    Save(PathBuf),
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    Saved(PathBuf),
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }
}

/// An editing session over one pattern.
#[derive(Debug, Clone)]
pub struct Session {
    store: PatternStore,
    history: History,
    palettes: PaletteLibrary,
    working_color: Rgb,
    working_colors: WorkingColors,
    recent: RecentColors,
    warp: Rgb,
    display: DisplayState,
    metadata: Metadata,
    current_row: usize,
    options: SessionOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default(), PaletteLibrary::with_builtin())
    }
}

impl Session {
    pub fn new(options: SessionOptions, palettes: PaletteLibrary) -> Self {
        let width = options.width.clamp(1, MAX_DIMENSION);
        let height = options.height.clamp(1, MAX_DIMENSION);
        let working_color = palettes.active_colors().first().copied().unwrap_or(DEFAULT_WEFTS[0]);
        Self {
            store: PatternStore::new(width, height),
            history: History::new(options.history_depth),
            palettes,
            working_color,
            working_colors: WorkingColors::new(),
            recent: RecentColors::with_limit(options.recent_limit),
            warp: DEFAULT_WARP,
            display: DisplayState { cell_size: options.cell_size, ..DisplayState::default() }.normalized(),
            metadata: Metadata::generated(Utc::now()),
            current_row: 0,
            options,
        }
    }

    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn palettes(&self) -> &PaletteLibrary {
        &self.palettes
    }

    pub fn working_color(&self) -> Rgb {
        self.working_color
    }

    pub fn working_colors(&self) -> &WorkingColors {
        &self.working_colors
    }

    pub fn recent_colors(&self) -> &RecentColors {
        &self.recent
    }

    pub fn warp(&self) -> Rgb {
        self.warp
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Row most recently painted or selected.
    pub fn current_row(&self) -> usize {
        self.current_row
    }

    /// Change the working color and remember it in the recent colors.
    pub fn set_working_color(&mut self, color: Rgb) {
        self.working_color = color;
        self.recent.add(color);
    }

    pub fn set_warp(&mut self, color: Rgb) {
        self.warp = color;
    }

    /// Paint the weft exposed at `col` across all of `row` with the working
    /// color, and select `row`.
    pub fn paint(&mut self, row: usize, col: usize) -> Result<(), SessionError> {
        self.store.cell(row, 0, col)?;
        self.history.record(&self.store);
        self.store.set_row(row, visible_weft(col), self.working_color)?;
        self.current_row = row;
        Ok(())
    }

    /// Set one weft of `row` to `color`; `color` also becomes the working color.
    pub fn set_weft_color(&mut self, row: usize, weft: usize, color: Rgb) -> Result<(), SessionError> {
        self.store.row_weft(row, weft)?;
        self.history.record(&self.store);
        self.store.set_row(row, weft, color)?;
        self.set_working_color(color);
        self.current_row = row;
        Ok(())
    }

    /// Rotate the weft colors of `row`.
    pub fn shift_row(&mut self, row: usize) -> Result<(), SessionError> {
        self.store.row_weft(row, 0)?;
        self.history.record(&self.store);
        self.store.shift_row(row)?;
        self.current_row = row;
        Ok(())
    }

    /// Resize to `width` x `height`, each clamped to 1..=100. Returns `false`
    /// without recording history when the size does not change.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        let (width, height) = (width.clamp(1, MAX_DIMENSION), height.clamp(1, MAX_DIMENSION));
        if (width, height) == self.store.dimensions() {
            return false;
        }
        self.history.record(&self.store);
        self.store.resize(width, height);
        self.clamp_current_row();
        true
    }

    /// Start over at a new size, keeping overlapping cells. Sizes outside
    /// 5..=100 keep the current dimensions. Clears the undo history.
    pub fn new_pattern(&mut self, width: usize, height: usize) {
        let (current_width, current_height) = self.store.dimensions();
        let width = valid_new_dimension(width).unwrap_or(current_width);
        let height = valid_new_dimension(height).unwrap_or(current_height);
        self.store.resize(width, height);
        self.history.clear();
        self.current_row = 0;
        tracing::info!(width, height, "started new pattern");
    }

    /// Start a blank project. Sizes outside 5..=100 fall back to 30x20. The
    /// previous pattern stays reachable through undo.
    pub fn new_project(&mut self, width: usize, height: usize) {
        let (width, height) = match (valid_new_dimension(width), valid_new_dimension(height)) {
            (Some(w), Some(h)) => (w, h),
            _ => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
        };
        self.history.record(&self.store);
        self.store.reset(width, height);
        self.warp = DEFAULT_WARP;
        self.display = DisplayState { cell_size: self.options.cell_size, ..DisplayState::default() }.normalized();
        self.palettes.clear_active();
        self.metadata = Metadata::generated(Utc::now());
        self.current_row = 0;
        tracing::info!(width, height, "started new project");
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.store);
        self.clamp_current_row();
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.store);
        self.clamp_current_row();
        changed
    }

    fn clamp_current_row(&mut self) {
        self.current_row = self.current_row.min(self.store.height().saturating_sub(1));
    }

    /// Activate palette `index` of the library.
    pub fn select_palette(&mut self, index: usize) -> Result<&Palette, SessionError> {
        Ok(self.palettes.select(index)?)
    }

    /// Make swatch `index` of the active palette the working color.
    pub fn select_swatch(&mut self, index: usize) -> Result<Rgb, SessionError> {
        let colors = self.palettes.active_colors();
        let color = colors
            .get(index)
            .copied()
            .ok_or(PaletteError::IndexOutOfRange { index, count: colors.len() })?;
        self.set_working_color(color);
        Ok(color)
    }

    /// Replace the palette library from palette document text. On error the
    /// library is unchanged.
    pub fn import_palettes(&mut self, text: &str) -> Result<usize, SessionError> {
        Ok(self.palettes.import_str(text)?)
    }

    /// Add the working color to the working colors.
    pub fn add_working_color(&mut self) -> bool {
        self.working_colors.add(self.working_color)
    }

    pub fn remove_working_color(&mut self, index: usize) -> Result<Rgb, SessionError> {
        Ok(self.working_colors.remove(index)?)
    }

    /// Replace the working colors with the active palette's colors.
    pub fn load_working_colors(&mut self) {
        match self.palettes.active() {
            Some(palette) => self.working_colors.replace_with(palette),
            None => self.working_colors.clear(),
        }
    }

    /// Append the working colors as palette `name` to the document at `path`.
    pub fn export_working_colors(&self, path: &Path, name: &str) -> Result<usize, SessionError> {
        let palette = self.working_colors.as_palette(name)?;
        Ok(palette::export_palette(path, &palette)?)
    }

    /// Replace the session's pattern with a document. The document is parsed
    /// completely first; on error nothing changes. Returns compatibility
    /// warnings for the user.
    pub fn import_document(&mut self, text: &str) -> Result<Vec<String>, SessionError> {
        let loaded = document::parse_document(text)?;

        self.history.record(&self.store);
        self.store = loaded.store;
        self.warp = loaded.warp.unwrap_or(DEFAULT_WARP);
        self.display = loaded.display;
        self.metadata = loaded.metadata.unwrap_or_default().or_defaults(&Metadata::generated(Utc::now()));
        if let Some(palette) = loaded.palette {
            self.palettes.set_active(palette);
        }
        self.clamp_current_row();
        Ok(loaded.warnings)
    }

    /// Read and import a document file.
    pub fn open(&mut self, path: &Path) -> Result<Vec<String>, SessionError> {
        let text = std::fs::read_to_string(path).map_err(DocumentError::from)?;
        self.import_document(&text)
    }

    /// The session as a 2.0 document.
    pub fn export_document(&self) -> PatternDocument<Rgb> {
        let context = ExportContext {
            metadata: &self.metadata,
            palette: self.palettes.active(),
            warp: self.warp,
            display: self.display,
        };
        document::export_document(&self.store, &context)
    }

    /// Write the session as a 2.0 document to `path`.
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let json = document::to_json(&self.export_document())?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| SessionError::Write { path: path.to_path_buf(), source })?;
            }
        }
        std::fs::write(path, json).map_err(|source| SessionError::Write { path: path.to_path_buf(), source })?;
        tracing::info!(path = %path.display(), "saved pattern document");
        Ok(())
    }

    /// Run one command.
    pub fn apply(&mut self, command: Command) -> Result<Outcome, SessionError> {
        tracing::debug!(?command, "applying command");
        let outcome = match command {
            Command::SetColor(color) => {
                self.set_working_color(color);
                Outcome::Unchanged
            }
            Command::Paint { row, col } => {
                self.paint(row, col)?;
                Outcome::Changed
            }
            Command::SetWeft { row, weft, color } => {
                self.set_weft_color(row, weft, color)?;
                Outcome::Changed
            }
            Command::Shift { row } => {
                self.shift_row(row)?;
                Outcome::Changed
            }
            Command::Resize { width, height } => self.resize(width, height).into(),
            Command::NewPattern { width, height } => {
                self.new_pattern(width, height);
                Outcome::Changed
            }
            Command::NewProject { width, height } => {
                self.new_project(width, height);
                Outcome::Changed
            }
            Command::Undo => self.undo().into(),
            Command::Redo => self.redo().into(),
            Command::SelectPalette(index) => {
                self.select_palette(index)?;
                Outcome::Unchanged
            }
            Command::Swatch(index) => {
                self.select_swatch(index)?;
                Outcome::Unchanged
            }
            Command::AddWorking => {
                self.add_working_color();
                Outcome::Unchanged
            }
            Command::RemoveWorking(index) => {
                self.remove_working_color(index)?;
                Outcome::Unchanged
            }
            Command::LoadWorking => {
                self.load_working_colors();
                Outcome::Unchanged
            }
            Command::ExportWorking { path, name } => {
                self.export_working_colors(&path, &name)?;
                Outcome::Saved(path)
            }
            Command::ImportPalettes(path) => {
                let text = std::fs::read_to_string(&path).map_err(PaletteError::from)?;
                self.import_palettes(&text)?;
                Outcome::Unchanged
            }
            Command::SetWarp(color) => {
                self.set_warp(color);
                Outcome::Changed
            }
            Command::Save(path) => {
                self.save(&path)?;
                Outcome::Saved(path)
            }
        };
        Ok(outcome)
    }
}

fn valid_new_dimension(value: usize) -> Option<usize> {
    (MIN_NEW_DIMENSION..=MAX_DIMENSION).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Cell;
    use tempfile::TempDir;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb {
        Rgb::new(r, g, b)
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::default();
        assert_eq!(session.store().dimensions(), (30, 20));
        assert_eq!(session.warp(), DEFAULT_WARP);
        assert_eq!(session.working_color(), DEFAULT_WEFTS[0]);
        assert!(!session.history().can_undo());
        assert_eq!(session.metadata().author, "Anonymous");
    }

    #[test]
    fn test_paint_uses_threading_rule() {
        let mut session = Session::default();
        session.set_working_color(rgb(1, 2, 3));
        session.paint(4, 5).unwrap();
        // column 5 shows weft 2
        for col in 0..30 {
            assert_eq!(session.store().get(4, 2, col), rgb(1, 2, 3));
        }
        assert_eq!(session.store().get(4, 0, 0), DEFAULT_WEFTS[0]);
        assert_eq!(session.current_row(), 4);
        assert_eq!(session.history().undo_depth(), 1);
    }

    #[test]
    fn test_failed_edit_records_nothing() {
        let mut session = Session::default();
        assert!(session.paint(20, 0).is_err());
        assert!(session.paint(0, 30).is_err());
        assert!(session.set_weft_color(0, 3, rgb(1, 1, 1)).is_err());
        assert!(session.shift_row(99).is_err());
        assert!(!session.history().can_undo());
        assert_eq!(session.store(), &PatternStore::default());
    }

    #[test]
    fn test_set_weft_color_updates_working_color() {
        let mut session = Session::default();
        session.set_weft_color(2, 1, rgb(9, 8, 7)).unwrap();
        assert_eq!(session.working_color(), rgb(9, 8, 7));
        assert_eq!(session.recent_colors().iter().next(), Some("#090807"));
        assert_eq!(session.store().get(2, 1, 29), rgb(9, 8, 7));
    }

    #[test]
    fn test_undo_redo_through_session() {
        let mut session = Session::default();
        let original = session.store().clone();
        session.shift_row(0).unwrap();
        let shifted = session.store().clone();

        assert!(session.undo());
        assert_eq!(session.store(), &original);
        assert!(session.redo());
        assert_eq!(session.store(), &shifted);
        assert!(!session.redo());
    }

    #[test]
    fn test_resize_clamps_and_skips_noop() {
        let mut session = Session::default();
        assert!(!session.resize(30, 20));
        assert!(!session.history().can_undo());

        assert!(session.resize(500, 0));
        assert_eq!(session.store().dimensions(), (100, 1));
        assert_eq!(session.history().undo_depth(), 1);
    }

    #[test]
    fn test_new_pattern_validates_and_clears_history() {
        let mut session = Session::default();
        session.paint(0, 0).unwrap();
        session.new_pattern(4, 50);
        assert_eq!(session.store().dimensions(), (30, 50));
        assert!(!session.history().can_undo());
        assert!(!session.history().can_redo());
    }

    #[test]
    fn test_new_project_resets_state() {
        let mut session = Session::default();
        session.set_warp(rgb(0, 0, 0));
        session.new_project(3, 40);
        assert_eq!(session.store().dimensions(), (30, 20));
        assert_eq!(session.store().cell(0, 0, 0).unwrap(), Cell::Unset);
        assert_eq!(session.warp(), DEFAULT_WARP);
        assert!(session.palettes().active().is_none());

        session.new_project(10, 10);
        assert_eq!(session.store().dimensions(), (10, 10));
        assert!(session.undo());
        assert_eq!(session.store().dimensions(), (30, 20));
    }

    #[test]
    fn test_swatch_and_working_colors() {
        let mut session = Session::default();
        assert_eq!(session.select_swatch(3).unwrap(), rgb(220, 180, 120));
        assert!(session.add_working_color());
        assert!(!session.add_working_color());
        assert!(session.select_swatch(42).is_err());

        session.load_working_colors();
        assert_eq!(session.working_colors().len(), 8);
    }

    #[test]
    fn test_import_failure_leaves_session_untouched() {
        let mut session = Session::default();
        session.paint(1, 1).unwrap();
        let before = session.store().clone();
        assert!(session.import_document("{\"version\": \"2.0\", \"pattern\": 5").is_err());
        assert_eq!(session.store(), &before);
        assert_eq!(session.history().undo_depth(), 1);
    }

    #[test]
    fn test_import_document_is_undoable() {
        let mut session = Session::default();
        let warnings = session.import_document(r##"{"gridWidth": 6, "gridHeight": 7, "warpColor": "#000000"}"##).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(session.store().dimensions(), (6, 7));
        assert_eq!(session.warp(), rgb(0, 0, 0));
        assert!(session.undo());
        assert_eq!(session.store().dimensions(), (30, 20));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("pattern.json");
        let mut session = Session::default();
        session.set_weft_color(3, 0, rgb(10, 20, 30)).unwrap();
        assert_eq!(session.apply(Command::Save(path.clone())).unwrap(), Outcome::Saved(path.clone()));

        let mut reopened = Session::default();
        assert!(reopened.open(&path).unwrap().is_empty());
        assert_eq!(reopened.store(), session.store());
        assert_eq!(reopened.metadata(), session.metadata());
    }

    #[test]
    fn test_empty_active_palette_starts_with_first_weft_color() {
        let empty = Palette { name: "Empty".to_string(), colors: Vec::new() };
        let session = Session::new(SessionOptions::default(), PaletteLibrary::from_palettes(vec![empty]));
        assert_eq!(session.working_color(), DEFAULT_WEFTS[0]);
    }

    #[test]
    fn test_malformed_palette_import_changes_nothing() {
        let mut session = Session::default();
        session.select_swatch(4).unwrap();
        let palettes = session.palettes().clone();
        let working_color = session.working_color();

        assert!(session.import_palettes("{ \"palettes\": [ { \"name\": \"Bad\", \"colors\": [\"nope\"] } ] }").is_err());
        assert!(session.import_palettes("not json at all").is_err());
        assert_eq!(session.palettes(), &palettes);
        assert_eq!(session.working_color(), working_color);

        let count = session.import_palettes(r##"{ "palettes": [ { "name": "Sea", "colors": ["#0A141E"] } ] }"##).unwrap();
        assert_eq!(count, 1);
        assert_eq!(session.palettes().active().unwrap().name, "Sea");
    }

    #[test]
    fn test_remove_working_color() {
        let mut session = Session::default();
        session.set_working_color(rgb(1, 1, 1));
        session.add_working_color();
        session.set_working_color(rgb(2, 2, 2));
        session.add_working_color();

        assert_eq!(session.remove_working_color(0).unwrap(), rgb(1, 1, 1));
        assert_eq!(session.working_colors().as_slice(), &[rgb(2, 2, 2)]);
        assert!(matches!(
            session.remove_working_color(1),
            Err(SessionError::Palette(PaletteError::WorkingColorOutOfRange { index: 1, count: 1 }))
        ));
        assert_eq!(session.working_colors().len(), 1);
    }

    #[test]
    fn test_export_working_colors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("palettes.json");
        let mut session = Session::default();
        assert!(matches!(
            session.export_working_colors(&path, "Empty"),
            Err(SessionError::Palette(PaletteError::NoWorkingColors))
        ));
        assert!(!path.exists());

        session.set_working_color(rgb(10, 20, 30));
        session.add_working_color();
        assert!(session.export_working_colors(&path, "").is_err());
        assert_eq!(session.export_working_colors(&path, "Mine").unwrap(), 1);
        assert_eq!(session.export_working_colors(&path, "Again").unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let exported = palette::parse_palette_document(&text).unwrap();
        assert_eq!(exported[0].name, "Mine");
        assert_eq!(exported[1].colors, vec![rgb(10, 20, 30)]);
    }

    #[test]
    fn test_apply_working_color_commands() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("pals.json");
        std::fs::write(&doc, r##"{ "palettes": [ { "name": "Sea", "colors": ["#0A141E", "#1E140A"] } ] }"##).unwrap();

        let mut session = Session::default();
        assert_eq!(session.apply(Command::ImportPalettes(doc.clone())).unwrap(), Outcome::Unchanged);
        assert_eq!(session.apply(Command::LoadWorking).unwrap(), Outcome::Unchanged);
        assert_eq!(session.working_colors().len(), 2);
        session.apply(Command::RemoveWorking(1)).unwrap();

        let out = dir.path().join("out.json");
        let export = Command::ExportWorking { path: out.clone(), name: "Dark".to_string() };
        assert_eq!(session.apply(export).unwrap(), Outcome::Saved(out.clone()));
        let exported = palette::parse_palette_document(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported[0].colors, vec![rgb(10, 20, 30)]);

        let missing = session.apply(Command::ImportPalettes(dir.path().join("missing.json")));
        assert!(matches!(missing, Err(SessionError::Palette(PaletteError::Io(_)))));
        assert_eq!(session.palettes().active().unwrap().name, "Sea");
    }

    #[test]
    fn test_apply_outcomes() {
        let mut session = Session::default();
        assert_eq!(session.apply(Command::Undo).unwrap(), Outcome::Unchanged);
        assert_eq!(session.apply(Command::Shift { row: 0 }).unwrap(), Outcome::Changed);
        assert_eq!(session.apply(Command::Undo).unwrap(), Outcome::Changed);
        assert_eq!(session.apply(Command::Resize { width: 30, height: 20 }).unwrap(), Outcome::Unchanged);
        assert!(session.apply(Command::Paint { row: 100, col: 0 }).is_err());
    }
}
