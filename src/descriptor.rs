//! The album descriptor (`album.xml`): album-level fields plus one entry per
//! track, written by the first phase of a workflow and consumed by the second.
//! Operators are expected to edit it by hand in between.

mod model;
mod xml;

pub use model::*;
pub use xml::{read, write};

#[cfg(test)]
mod tests;
