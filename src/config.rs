//! Configuration loader and schema types.
//!
//! This module exposes the settings schema that drives file discovery, the
//! descriptor location, romanization and splitting, plus helpers to load it
//! from disk and the environment.

mod load;
mod schema;

pub use schema::*;
