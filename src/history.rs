//! Snapshot-based undo/redo for the pattern store.
//!
//! Every user-facing mutation calls [`History::record`] first, which pushes a
//! compacted [`Snapshot`] of the current pattern and discards the redo branch.
//!
//! ```text
//! record(s2)
//!   Undo: [s0, s1, s2]   Redo: []
//! undo() x2              (current state goes to redo each time)
//!   Undo: [s0]           Redo: [s3, s2]
//! record(s4)             new branch, redo cleared
//!   Undo: [s0, s4]       Redo: []
//! ```
//!
//! Both stacks are bounded; the oldest snapshot is evicted on overflow.
//!
//! # Compaction
//!
//! A row-weft whose cells all share one value is stored as a single cell
//! ([`RowWeft::Uniform`]). Only diverging row-wefts keep the full cell list.
//! Since editing operations write whole rows, nearly every snapshot is three
//! cells per row regardless of width.

use crate::color::WEFT_COUNT;
use crate::pattern::{Cell, PatternStore};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default bound for each stack.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// One compacted row-weft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowWeft {
    /// Every cell holds this value.
    Uniform(Cell),
    /// Per-cell values, one per column.
    Cells(Vec<Cell>),
}

impl RowWeft {
    /// Compact a row-weft's cells.
    pub fn compact(cells: &[Cell]) -> Self {
        match cells.split_first() {
            Some((first, rest)) if rest.iter().any(|c| c != first) => RowWeft::Cells(cells.to_vec()),
            Some((first, _)) => RowWeft::Uniform(*first),
            None => RowWeft::Cells(Vec::new()),
        }
    }

    /// Expand into `out`. Columns missing from a per-cell list take the first
    /// stored cell; an empty list leaves `out` untouched.
    pub fn expand_into(&self, out: &mut [Cell]) {
        match self {
            RowWeft::Uniform(cell) => out.fill(*cell),
            RowWeft::Cells(cells) => {
                let Some(&first) = cells.first() else {
                    return;
                };
                for (col, slot) in out.iter_mut().enumerate() {
                    *slot = cells.get(col).copied().unwrap_or(first);
                }
            }
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, RowWeft::Uniform(_))
    }
}

/// Immutable compacted capture of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    pub weft_pattern: Vec<[RowWeft; WEFT_COUNT]>,
}

impl Snapshot {
    pub fn capture(store: &PatternStore) -> Self {
        let weft_pattern = (0..store.height())
            .map(|row| {
                std::array::from_fn(|weft| RowWeft::compact(store.row_weft(row, weft).unwrap_or_default()))
            })
            .collect();
        Self { grid_width: store.width(), grid_height: store.height(), weft_pattern }
    }

    /// Rebuild a pattern store. Rows missing from the snapshot get the
    /// default weft colors.
    pub fn restore(&self) -> PatternStore {
        let mut store = PatternStore::new(self.grid_width, self.grid_height);
        for (row, wefts) in self.weft_pattern.iter().take(self.grid_height).enumerate() {
            for (weft, row_weft) in wefts.iter().enumerate() {
                if let Ok(cells) = store.row_weft_mut(row, weft) {
                    row_weft.expand_into(cells);
                }
            }
        }
        store
    }

    /// Number of row-wefts that needed a full cell list.
    pub fn diverging_row_wefts(&self) -> usize {
        self.weft_pattern.iter().flatten().filter(|rw| !rw.is_uniform()).count()
    }
}

/// Bounded undo/redo stacks over [`Snapshot`]s.
///
/// # Invariants
///
/// 1. Neither stack exceeds `max_depth`.
/// 2. The redo stack is cleared on every [`record`](History::record).
/// 3. `undo` followed by `redo` restores the pre-undo pattern exactly.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    /// History bounded to `max_depth` entries per stack (at least one).
    pub fn new(max_depth: usize) -> Self {
        Self { undo_stack: VecDeque::new(), redo_stack: VecDeque::new(), max_depth: max_depth.max(1) }
    }

    /// Snapshot `store` before a mutation and start a new branch.
    pub fn record(&mut self, store: &PatternStore) {
        self.redo_stack.clear();
        push_bounded(&mut self.undo_stack, Snapshot::capture(store), self.max_depth);
        tracing::debug!(depth = self.undo_stack.len(), "recorded undo snapshot");
    }

    /// Restore the previous state. Returns `false` (and leaves `store`
    /// alone) when there is nothing to undo.
    pub fn undo(&mut self, store: &mut PatternStore) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        push_bounded(&mut self.redo_stack, Snapshot::capture(store), self.max_depth);
        *store = previous.restore();
        true
    }

    /// Re-apply the most recently undone state. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self, store: &mut PatternStore) -> bool {
        let Some(next) = self.redo_stack.pop_back() else {
            return false;
        };
        push_bounded(&mut self.undo_stack, Snapshot::capture(store), self.max_depth);
        *store = next.restore();
        true
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_depth: usize) {
    stack.push_back(snapshot);
    while stack.len() > max_depth {
        stack.pop_front();
        tracing::debug!(max_depth, "evicted oldest history snapshot");
    }
}
