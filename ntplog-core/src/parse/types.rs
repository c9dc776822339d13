use crate::parse::constants::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use std::fmt;

/// Selection state reported in front of the peer column of `ntpq -p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerStatus {
    Selected,
    Candidate,
    Outlier,
    Excess,
    Falseticker,
    OutlierExtra,
    Backup,
}

impl PeerStatus {
    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            '*' => Some(Self::Selected),
            '+' => Some(Self::Candidate),
            '-' => Some(Self::Outlier),
            ' ' => Some(Self::Excess),
            'x' => Some(Self::Falseticker),
            'o' => Some(Self::OutlierExtra),
            '#' => Some(Self::Backup),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Selected => '*',
            Self::Candidate => '+',
            Self::Outlier => '-',
            Self::Excess => ' ',
            Self::Falseticker => 'x',
            Self::OutlierExtra => 'o',
            Self::Backup => '#',
        }
    }
}

impl fmt::Display for PeerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One peer-status observation, stamped with the snapshot it was polled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: NaiveDateTime,
    pub status: Option<PeerStatus>,
    pub peer: String,
    pub ref_id: String,
    pub stratum: u32,
    /// `t` column, passed through untouched (u, b, l, ...)
    pub kind: String,
    pub since_last_seconds: u64,
    pub poll_interval: i64,
    /// Raw reach register as printed, not decoded from octal.
    pub reachability: u32,
    pub delay_ms: f64,
    pub offset_ms: f64,
    pub jitter_ms: f64,
}

impl Record {
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Status prefix as logged, empty when the peer had none.
    pub fn status_str(&self) -> String {
        self.status.map(|s| s.as_char().to_string()).unwrap_or_default()
    }
}
