//! Krokbragd - Library for designing three-weft Krokbragd weaving patterns
//!
//! This library provides functionality to:
//! - Edit a pattern of rows with three weft colors each, with undo and redo
//! - Map wefts to visible columns through the Krokbragd threading
//! - Load and save pattern documents, including the legacy format
//! - Manage palettes and working colors
//! - Render patterns to PNG and print weave-order tables

pub mod cli;
pub mod color;
pub mod color_cache;
pub mod config;
pub mod document;
pub mod history;
pub mod models;
pub mod output;
pub mod palette;
pub mod palettes;
pub mod pattern;
pub mod render;
pub mod script;
pub mod session;
pub mod threading;
pub mod weave_order;
