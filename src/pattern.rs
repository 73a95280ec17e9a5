//! The pattern store: weft colors for every row, weft, and column.
//!
//! A pattern of `width` x `height` holds three wefts per row. Each
//! `(row, weft)` pair is one weft thread; normally all of its cells carry the
//! same color, but cells may diverge (partial loads, per-cell edits).
//!
//! Cells are stored row-major with the three wefts of a row adjacent, so a
//! row-weft is one contiguous slice:
//!
//! ```text
//! row 0: [weft 0: c0 .. cW] [weft 1: c0 .. cW] [weft 2: c0 .. cW]
//! row 1: ...
//! ```

use crate::color::{default_weft, Rgb, WEFT_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default grid width in columns.
pub const DEFAULT_WIDTH: usize = 30;
/// Default grid height in rows.
pub const DEFAULT_HEIGHT: usize = 20;
/// Largest width or height accepted anywhere.
pub const MAX_DIMENSION: usize = 100;

/// A stored weft cell.
///
/// Serializes as `null` when unset and `[r, g, b]` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Rgb>", into = "Option<Rgb>")]
pub enum Cell {
    /// Not yet woven; renders and exports as its own weft's default color.
    #[default]
    Unset,
    Color(Rgb),
}

impl Cell {
    /// Color shown for this cell when it belongs to `weft`.
    pub fn resolve(self, weft: usize) -> Rgb {
        match self {
            Cell::Color(c) => c,
            Cell::Unset => default_weft(weft),
        }
    }

    pub fn color(self) -> Option<Rgb> {
        match self {
            Cell::Color(c) => Some(c),
            Cell::Unset => None,
        }
    }
}

impl From<Rgb> for Cell {
    fn from(c: Rgb) -> Self {
        Cell::Color(c)
    }
}

impl From<Option<Rgb>> for Cell {
    fn from(c: Option<Rgb>) -> Self {
        c.map_or(Cell::Unset, Cell::Color)
    }
}

impl From<Cell> for Option<Rgb> {
    fn from(c: Cell) -> Self {
        c.color()
    }
}

/// Error for out-of-range pattern access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("row {row} out of bounds for pattern height {height}")]
    RowOutOfBounds { row: usize, height: usize },
    #[error("weft {0} out of bounds, expected 0, 1, or 2")]
    WeftOutOfBounds(usize),
    #[error("column {col} out of bounds for pattern width {width}")]
    ColumnOutOfBounds { col: usize, width: usize },
}

/// Grid of weft cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternStore {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl PatternStore {
    /// A pattern with every weft set to its default color.
    pub fn new(width: usize, height: usize) -> Self {
        let mut cells = Vec::with_capacity(width * height * WEFT_COUNT);
        for _ in 0..height {
            for weft in 0..WEFT_COUNT {
                cells.extend(std::iter::repeat(Cell::Color(default_weft(weft))).take(width));
            }
        }
        Self { width, height, cells }
    }

    /// A pattern with every cell unset.
    pub fn blank(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::Unset; width * height * WEFT_COUNT] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn check(&self, row: usize, weft: usize) -> Result<(), PatternError> {
        if row >= self.height {
            return Err(PatternError::RowOutOfBounds { row, height: self.height });
        }
        if weft >= WEFT_COUNT {
            return Err(PatternError::WeftOutOfBounds(weft));
        }
        Ok(())
    }

    fn row_weft_start(&self, row: usize, weft: usize) -> usize {
        (row * WEFT_COUNT + weft) * self.width
    }

    /// The cells of one weft thread.
    pub fn row_weft(&self, row: usize, weft: usize) -> Result<&[Cell], PatternError> {
        self.check(row, weft)?;
        let start = self.row_weft_start(row, weft);
        Ok(&self.cells[start..start + self.width])
    }

    pub(crate) fn row_weft_mut(&mut self, row: usize, weft: usize) -> Result<&mut [Cell], PatternError> {
        self.check(row, weft)?;
        let start = self.row_weft_start(row, weft);
        let width = self.width;
        Ok(&mut self.cells[start..start + width])
    }

    /// The stored cell, including the unset marker.
    pub fn cell(&self, row: usize, weft: usize, col: usize) -> Result<Cell, PatternError> {
        let cells = self.row_weft(row, weft)?;
        cells
            .get(col)
            .copied()
            .ok_or(PatternError::ColumnOutOfBounds { col, width: self.width })
    }

    /// Color at (`row`, `weft`, `col`).
    ///
    /// Unset cells resolve to the weft's default color. Out-of-bounds access
    /// panics in debug builds and yields the weft's default color otherwise.
    pub fn get(&self, row: usize, weft: usize, col: usize) -> Rgb {
        match self.cell(row, weft, col) {
            Ok(cell) => cell.resolve(weft),
            Err(e) => {
                debug_assert!(false, "pattern access out of bounds: {}", e);
                tracing::warn!(error = %e, "pattern access out of bounds, using weft default");
                default_weft(weft)
            }
        }
    }

    /// Overwrite one cell.
    pub fn set_cell(&mut self, row: usize, weft: usize, col: usize, cell: Cell) -> Result<(), PatternError> {
        let width = self.width;
        let slot = self
            .row_weft_mut(row, weft)?
            .get_mut(col)
            .ok_or(PatternError::ColumnOutOfBounds { col, width })?;
        *slot = cell;
        Ok(())
    }

    /// Overwrite every cell of a row-weft with one color.
    pub fn set_row(&mut self, row: usize, weft: usize, color: Rgb) -> Result<(), PatternError> {
        self.row_weft_mut(row, weft)?.fill(Cell::Color(color));
        Ok(())
    }

    /// Rotate a row's wefts: weft 0 takes weft 2's colors, weft 1 takes weft
    /// 0's, weft 2 takes weft 1's. Three shifts restore the row.
    pub fn shift_row(&mut self, row: usize) -> Result<(), PatternError> {
        self.check(row, 0)?;
        let start = self.row_weft_start(row, 0);
        let end = start + WEFT_COUNT * self.width;
        self.cells[start..end].rotate_right(self.width);
        Ok(())
    }

    /// The color of each weft of a row, read from its first column.
    pub fn row_colors(&self, row: usize) -> Result<[Rgb; WEFT_COUNT], PatternError> {
        let mut colors = [Rgb::new(0, 0, 0); WEFT_COUNT];
        for (weft, slot) in colors.iter_mut().enumerate() {
            let cell = self.row_weft(row, weft)?.first().copied().unwrap_or_default();
            *slot = cell.resolve(weft);
        }
        Ok(colors)
    }

    /// The shared cell of a row-weft, or `None` if its cells differ.
    pub fn uniform_cell(&self, row: usize, weft: usize) -> Result<Option<Cell>, PatternError> {
        let cells = self.row_weft(row, weft)?;
        Ok(match cells.split_first() {
            Some((first, rest)) if rest.iter().all(|c| c == first) => Some(*first),
            Some(_) => None,
            None => Some(Cell::Unset),
        })
    }

    /// Rebuild to `width` x `height`, keeping the overlapping cells and
    /// filling new cells with each weft's default color.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == self.dimensions() {
            return;
        }

        let mut cells = Vec::with_capacity(width * height * WEFT_COUNT);
        for row in 0..height {
            for weft in 0..WEFT_COUNT {
                for col in 0..width {
                    let cell = if row < self.height && col < self.width {
                        self.cells[self.row_weft_start(row, weft) + col]
                    } else {
                        Cell::Color(default_weft(weft))
                    };
                    cells.push(cell);
                }
            }
        }

        tracing::debug!(from = ?self.dimensions(), to = ?(width, height), "resized pattern");
        self.width = width;
        self.height = height;
        self.cells = cells;
    }

    /// Replace the whole pattern with unset cells.
    pub fn reset(&mut self, width: usize, height: usize) {
        *self = Self::blank(width, height);
    }

    /// Distinct resolved colors in row, weft, column order of first use.
    pub fn unique_colors(&self) -> Vec<Rgb> {
        let mut seen = std::collections::HashSet::new();
        let mut colors = Vec::new();
        for row in 0..self.height {
            for weft in 0..WEFT_COUNT {
                let start = self.row_weft_start(row, weft);
                for cell in &self.cells[start..start + self.width] {
                    let color = cell.resolve(weft);
                    if seen.insert(color) {
                        colors.push(color);
                    }
                }
            }
        }
        colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_WEFTS;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb {
        Rgb::new(r, g, b)
    }

    #[test]
    fn test_default_pattern() {
        let store = PatternStore::default();
        assert_eq!(store.dimensions(), (30, 20));
        for weft in 0..3 {
            assert_eq!(store.get(19, weft, 29), DEFAULT_WEFTS[weft]);
        }
    }

    #[test]
    fn test_set_row_fills_whole_row_weft() {
        let mut store = PatternStore::new(30, 20);
        store.set_row(0, 0, rgb(10, 20, 30)).unwrap();
        for x in 0..30 {
            assert_eq!(store.get(0, 0, x), rgb(10, 20, 30));
        }
        assert_eq!(store.get(0, 1, 0), DEFAULT_WEFTS[1]);
        assert_eq!(store.get(1, 0, 0), DEFAULT_WEFTS[0]);
    }

    #[test]
    fn test_set_row_out_of_bounds() {
        let mut store = PatternStore::new(4, 2);
        assert_eq!(
            store.set_row(2, 0, rgb(1, 1, 1)),
            Err(PatternError::RowOutOfBounds { row: 2, height: 2 })
        );
        assert_eq!(store.set_row(0, 3, rgb(1, 1, 1)), Err(PatternError::WeftOutOfBounds(3)));
        assert_eq!(
            store.cell(0, 0, 4),
            Err(PatternError::ColumnOutOfBounds { col: 4, width: 4 })
        );
    }

    #[test]
    fn test_shift_row_direction() {
        let mut store = PatternStore::new(5, 2);
        let (a, b, c) = (rgb(1, 0, 0), rgb(0, 1, 0), rgb(0, 0, 1));
        store.set_row(1, 0, a).unwrap();
        store.set_row(1, 1, b).unwrap();
        store.set_row(1, 2, c).unwrap();

        store.shift_row(1).unwrap();
        assert_eq!(store.row_colors(1).unwrap(), [c, a, b]);
        // other rows untouched
        assert_eq!(store.row_colors(0).unwrap(), DEFAULT_WEFTS);
    }

    #[test]
    fn test_three_shifts_restore_row() {
        let mut store = PatternStore::new(6, 3);
        store.set_row(2, 1, rgb(9, 9, 9)).unwrap();
        store.set_cell(2, 0, 4, Cell::Color(rgb(7, 7, 7))).unwrap();
        let before = store.clone();
        for _ in 0..3 {
            store.shift_row(2).unwrap();
        }
        assert_eq!(store, before);
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut store = PatternStore::new(10, 10);
        store.set_row(3, 2, rgb(5, 6, 7)).unwrap();
        store.set_row(9, 0, rgb(1, 2, 3)).unwrap();

        store.resize(4, 5);
        assert_eq!(store.dimensions(), (4, 5));
        assert_eq!(store.get(3, 2, 3), rgb(5, 6, 7));

        store.resize(10, 10);
        assert_eq!(store.get(3, 2, 3), rgb(5, 6, 7));
        // column 4.. of row 3 and all of row 9 were outside the overlap
        assert_eq!(store.get(3, 2, 4), DEFAULT_WEFTS[2]);
        assert_eq!(store.get(9, 0, 0), DEFAULT_WEFTS[0]);
    }

    #[test]
    fn test_resize_same_dimensions_is_noop() {
        let mut store = PatternStore::blank(5, 5);
        store.set_cell(0, 0, 0, Cell::Color(rgb(1, 1, 1))).unwrap();
        let before = store.clone();
        store.resize(5, 5);
        assert_eq!(store, before);
    }

    #[test]
    fn test_reset_uses_unset_marker() {
        let mut store = PatternStore::new(3, 3);
        store.reset(5, 6);
        assert_eq!(store.dimensions(), (5, 6));
        assert_eq!(store.cell(5, 2, 4), Ok(Cell::Unset));
        assert_eq!(store.get(5, 2, 4), DEFAULT_WEFTS[2]);
    }

    #[test]
    fn test_uniform_cell_detects_divergence() {
        let mut store = PatternStore::new(4, 1);
        assert_eq!(store.uniform_cell(0, 1), Ok(Some(Cell::Color(DEFAULT_WEFTS[1]))));
        store.set_cell(0, 1, 2, Cell::Color(rgb(0, 0, 0))).unwrap();
        assert_eq!(store.uniform_cell(0, 1), Ok(None));
    }

    #[test]
    fn test_unique_colors_in_first_use_order() {
        let mut store = PatternStore::new(2, 2);
        store.set_row(1, 0, rgb(1, 1, 1)).unwrap();
        assert_eq!(
            store.unique_colors(),
            vec![DEFAULT_WEFTS[0], DEFAULT_WEFTS[1], DEFAULT_WEFTS[2], rgb(1, 1, 1)]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics_in_debug() {
        let store = PatternStore::new(2, 2);
        store.get(5, 0, 0);
    }
}
