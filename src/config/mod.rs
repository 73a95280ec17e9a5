//! Configuration for the `krok` command
//!
//! Provides types, discovery, and parsing for `krok.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
