//! Weave-order table: the weft colors of every row, in weaving order.
//!
//! The text form is what a weaver follows at the loom:
//!
//! ```text
//! Row Order Table:
//! Row   Weft 1   Weft 2   Weft 3
//! 1     #C86464  #64C864  #6464C8
//!
//! Colors Used:
//! Color 1: #C86464
//! ```

use crate::color::{Rgb, WEFT_COUNT};
use crate::color_cache::ColorCache;
use crate::pattern::PatternStore;
use std::fmt;

/// Weft colors for one row, read from the row's first column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaveRow {
    /// One-based row number.
    pub number: usize,
    pub wefts: [Rgb; WEFT_COUNT],
}

/// Summary numbers for a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStats {
    pub rows: usize,
    pub columns: usize,
    pub unique_colors: usize,
    /// Wefts whose color differs from the same weft in the previous row.
    pub weft_changes: usize,
}

impl PatternStats {
    pub fn of(store: &PatternStore) -> Self {
        let rows: Vec<[Rgb; WEFT_COUNT]> = (0..store.height()).map(|row| row_wefts(store, row)).collect();
        let weft_changes = rows
            .windows(2)
            .map(|pair| pair[0].iter().zip(&pair[1]).filter(|(a, b)| a != b).count())
            .sum();
        Self {
            rows: store.height(),
            columns: store.width(),
            unique_colors: store.unique_colors().len(),
            weft_changes,
        }
    }
}

/// Everything needed to print a pattern for weaving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaveOrder {
    pub title: String,
    pub rows: Vec<WeaveRow>,
    /// Distinct colors of all cells as `#RRGGBB`, in order of first use.
    pub colors_used: Vec<String>,
    pub stats: PatternStats,
}

impl WeaveOrder {
    pub fn new(store: &PatternStore, title: &str) -> Self {
        let rows = (0..store.height()).map(|row| WeaveRow { number: row + 1, wefts: row_wefts(store, row) }).collect();
        Self {
            title: title.to_string(),
            rows,
            colors_used: colors_used(store),
            stats: PatternStats::of(store),
        }
    }
}

fn row_wefts(store: &PatternStore, row: usize) -> [Rgb; WEFT_COUNT] {
    std::array::from_fn(|weft| store.get(row, weft, 0))
}

/// Distinct cell colors as hex strings, in order of first use.
pub fn colors_used(store: &PatternStore) -> Vec<String> {
    let mut cache = ColorCache::new();
    store.unique_colors().into_iter().map(|color| cache.to_hex(color).to_string()).collect()
}

impl fmt::Display for WeaveOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.title.is_empty() {
            writeln!(f, "{}", self.title)?;
        }
        writeln!(f, "Grid: {} x {}", self.stats.columns, self.stats.rows)?;
        writeln!(f)?;
        writeln!(f, "Row Order Table:")?;
        writeln!(f, "{:<6}{:<9}{:<9}{}", "Row", "Weft 1", "Weft 2", "Weft 3")?;
        for row in &self.rows {
            let [a, b, c] = row.wefts;
            writeln!(f, "{:<6}{:<9}{:<9}{}", row.number, a.to_hex(), b.to_hex(), c.to_hex())?;
        }
        writeln!(f)?;
        writeln!(f, "Colors Used:")?;
        for (i, hex) in self.colors_used.iter().enumerate() {
            writeln!(f, "Color {}: {}", i + 1, hex)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DEFAULT_WEFTS;

    #[test]
    fn test_default_pattern_order() {
        let store = PatternStore::new(4, 3);
        let order = WeaveOrder::new(&store, "Test");
        assert_eq!(order.rows.len(), 3);
        assert_eq!(order.rows[2], WeaveRow { number: 3, wefts: DEFAULT_WEFTS });
        assert_eq!(order.colors_used, vec!["#C86464", "#64C864", "#6464C8"]);
        assert_eq!(order.stats, PatternStats { rows: 3, columns: 4, unique_colors: 3, weft_changes: 0 });
    }

    #[test]
    fn test_weft_changes_count_differences() {
        let mut store = PatternStore::new(2, 3);
        store.set_row(1, 0, Rgb::new(1, 1, 1)).unwrap();
        store.shift_row(2).unwrap();
        let stats = PatternStats::of(&store);
        // row 1 differs from rows 0 and 2 in weft 0; row 2 is fully rotated
        assert_eq!(stats.weft_changes, 1 + 3);
        assert_eq!(stats.unique_colors, 4);
    }

    #[test]
    fn test_text_table() {
        let mut store = PatternStore::new(4, 2);
        store.set_row(1, 2, Rgb::new(0x50, 0x3C, 0x28)).unwrap();
        let text = WeaveOrder::new(&store, "Runner").to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Runner");
        assert_eq!(lines[1], "Grid: 4 x 2");
        assert_eq!(lines[3], "Row Order Table:");
        assert_eq!(lines[4], "Row   Weft 1   Weft 2   Weft 3");
        assert_eq!(lines[5], "1     #C86464  #64C864  #6464C8");
        assert_eq!(lines[6], "2     #C86464  #64C864  #503C28");
        assert!(text.ends_with("Colors Used:\nColor 1: #C86464\nColor 2: #64C864\nColor 3: #6464C8\nColor 4: #503C28\n"));
    }
}
