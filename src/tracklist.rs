//! Tracklist parsing: free text with one track per line, in one of the
//! user-selected formats, plus the interactive format/confirmation prompts.

mod format;
mod prompt;

pub use format::*;
pub use prompt::*;

#[cfg(test)]
mod tests;
