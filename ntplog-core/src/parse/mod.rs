//! NTP Polling Log Parser
//!
//! This module turns the text collected by periodically running `ntpq -p`
//! into typed `Record`s, one per peer line.
//!
//! A log is a series of snapshots. Each snapshot starts with a header like
//! `=== 2024-06-01 12:00:00 UTC ===`, followed by the usual ntpq table:
//!
//! ```text
//! === 2024-06-01 12:00:00 UTC ===
//!      remote           refid      st t when poll reach   delay   offset  jitter
//! ==============================================================================
//! *140.203.204.77  .GPS.            1 u   5m   64  377   12.345   -0.067   1.234
//! ```
//!
//! The parser walks the input once. Every line is classified first (header,
//! noise, sentinel or candidate data row), candidates are then decoded against
//! the timestamp of the most recent header. Bad rows are reported and skipped,
//! a bad header stops the run but keeps what was already parsed.
//!
//! The overall data processing architecture is:
//!
//! text
//! classify_line
//! LineClass
//! decode_fields
//! Record
//! LogParser / ParseOutcome
//!

mod classify;
mod constants;
mod decode;
mod diagnostics;
mod error;
mod parser;
mod types;

pub use classify::*;
pub use constants::*;
pub use decode::*;
pub use diagnostics::*;
pub use error::*;
pub use parser::*;
pub use types::*;
