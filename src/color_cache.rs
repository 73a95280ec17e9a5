//! Hex formatting cache and the recent-colors history

use crate::color::Rgb;
use std::collections::{HashMap, VecDeque};

/// Default number of entries kept by [`RecentColors`].
pub const RECENT_COLORS_LIMIT: usize = 10;

/// Memoizes `#RRGGBB` strings by channel triple.
#[derive(Debug, Clone, Default)]
pub struct ColorCache {
    hex: HashMap<Rgb, String>,
}

impl ColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hex string for `color`, formatted at most once per distinct triple.
    pub fn to_hex(&mut self, color: Rgb) -> &str {
        self.hex.entry(color).or_insert_with(|| color.to_hex())
    }

    /// Number of distinct triples formatted so far.
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }
}

/// Most-recently-used list of distinct colors, newest first.
#[derive(Debug, Clone)]
pub struct RecentColors {
    entries: VecDeque<String>,
    limit: usize,
    cache: ColorCache,
}

impl Default for RecentColors {
    fn default() -> Self {
        Self::with_limit(RECENT_COLORS_LIMIT)
    }
}

impl RecentColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history keeping at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self { entries: VecDeque::new(), limit: limit.max(1), cache: ColorCache::new() }
    }

    /// Move `color` to the front, dropping any older occurrence and
    /// truncating to the limit.
    pub fn add(&mut self, color: Rgb) {
        let hex = self.cache.to_hex(color).to_string();
        self.entries.retain(|existing| *existing != hex);
        self.entries.push_front(hex);
        self.entries.truncate(self.limit);
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
