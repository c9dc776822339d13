//! Per-peer summary statistics over parsed records.

mod render;
mod summary;

pub use render::*;
pub use summary::*;
