//! Tag access: the fixed set of fields albumtag manages and the
//! `lofty`-backed accessor that reads and writes them.

mod model;
mod store;

pub use model::*;
pub use store::*;

#[cfg(test)]
mod tests;
