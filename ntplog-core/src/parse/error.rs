use std::path::PathBuf;
use thiserror::Error;

/// Why a candidate line did not become a `Record`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("reference id '{ref_id}' marks a transient peer state")]
    Sentinel { ref_id: String },

    #[error("expected 10 fields, found {found}")]
    TooFewFields { found: usize },

    #[error("peer identifier is empty")]
    EmptyPeer,

    #[error("peer identifier '{peer}' still carries a status prefix")]
    InvalidPeer { peer: String },

    #[error("field '{field}' is not an integer: '{token}'")]
    InvalidInteger { field: &'static str, token: String },

    #[error("field '{field}' is not a number: '{token}'")]
    InvalidFloat { field: &'static str, token: String },
}

impl DecodeError {
    /// Sentinel rows are routine ntpq output, everything else is malformed input.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Sentinel { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinceLastError {
    #[error("'{token}' is not a duration")]
    NotADuration { token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("timestamp '{text}' has no zone abbreviation")]
    MissingZone { text: String },

    #[error("'{zone}' is not a zone abbreviation")]
    InvalidZone { zone: String },

    #[error("'{text}' does not match YYYY-MM-DD HH:MM:SS")]
    InvalidDateTime { text: String },
}

/// Only I/O can fail a parse run; malformed content never does.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log input at line {line_number}: {source}")]
    Read {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },
}
