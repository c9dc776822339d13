//! CSV artifacts derived from a parse run.
//!
//! - `ntp_records.csv`: every record
//! - `ntp_locations.csv`: records annotated with the peer's location
//! - `peers/<location>.csv`: one file per peer
//! - `ntp_statistics.csv`: per-peer summary statistics

mod error;
mod rows;
#[cfg(test)]
mod tests;
mod writer;

pub use error::ExportError;
pub use rows::*;
pub use writer::*;
