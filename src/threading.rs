//! Krokbragd threading: which weft shows at which column.
//!
//! The three wefts of a row are interlaced over a four-column repeat. Weft 0
//! shows at the first position, weft 1 at the third, and weft 2 at the second
//! and fourth, so weft 2 covers half of every row.
//!
//! Rendering, export, and painting all go through [`visible_weft`].

use crate::color::Rgb;
use crate::pattern::PatternStore;

/// Width of one threading repeat in columns.
pub const REPEAT: usize = 4;

const VISIBLE: [usize; REPEAT] = [0, 2, 1, 2];

/// Index of the weft exposed at `col`.
///
/// ```
/// use krokbragd::threading::visible_weft;
///
/// let row: Vec<usize> = (0..8).map(visible_weft).collect();
/// assert_eq!(row, vec![0, 2, 1, 2, 0, 2, 1, 2]);
/// ```
pub const fn visible_weft(col: usize) -> usize {
    VISIBLE[col % REPEAT]
}

/// Color exposed at (`row`, `col`).
pub fn visible_color(store: &PatternStore, row: usize, col: usize) -> Rgb {
    store.get(row, visible_weft(col), col)
}

/// Columns of a row whose exposed weft is `weft`.
pub fn columns_showing(weft: usize, width: usize) -> impl Iterator<Item = usize> {
    (0..width).filter(move |&col| visible_weft(col) == weft)
}
