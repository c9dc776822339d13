use crate::parse::classify::is_sentinel_ref_id;
use crate::parse::constants::{DATA_LINE_TOKENS, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::parse::error::{DecodeError, SinceLastError};
use crate::parse::types::{PeerStatus, Record};
use chrono::NaiveDateTime;
use std::str::FromStr;

/// A decoded record plus the `when` token that had to be degraded to zero, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub record: Record,
    pub since_last_fallback: Option<String>,
}

/// Turn the tokens of one data row into a `Record`.
///
/// Column layout (`ntpq -p`):
///
/// ```text
/// remote refid st t when poll reach delay offset jitter
/// ```
///
/// Every numeric column must coerce or the whole row is rejected. The `when`
/// column is the one exception: an unreadable duration becomes zero and is
/// reported back through `Decoded::since_last_fallback`.
pub fn decode_fields(tokens: &[&str], timestamp: NaiveDateTime) -> Result<Decoded, DecodeError> {
    let Some(first) = tokens.first() else {
        return Err(DecodeError::TooFewFields { found: 0 });
    };
    let (status, peer) = split_status(first)?;

    if let Some(ref_id) = tokens.get(1).filter(|r| is_sentinel_ref_id(r)) {
        return Err(DecodeError::Sentinel {
            ref_id: ref_id.to_string(),
        });
    }

    if tokens.len() < DATA_LINE_TOKENS {
        return Err(DecodeError::TooFewFields {
            found: tokens.len(),
        });
    }

    let stratum = integer("st", tokens[2])?;
    let kind = tokens[3].to_string();
    let when = tokens[4];
    let poll_interval = integer("poll", tokens[5])?;
    let reachability = integer("reach", tokens[6])?;
    let delay_ms = float("delay", tokens[7])?;
    let offset_ms = float("offset", tokens[8])?;
    let jitter_ms = float("jitter", tokens[9])?;

    let (since_last_seconds, since_last_fallback) = match normalize_since_last(when) {
        Ok(seconds) => (seconds, None),
        Err(_) => (0, Some(when.to_string())),
    };

    Ok(Decoded {
        record: Record {
            timestamp,
            status,
            peer: peer.to_string(),
            ref_id: tokens[1].to_string(),
            stratum,
            kind,
            since_last_seconds,
            poll_interval,
            reachability,
            delay_ms,
            offset_ms,
            jitter_ms,
        },
        since_last_fallback,
    })
}

/// Split the status prefix off the `remote` column.
pub fn split_status(token: &str) -> Result<(Option<PeerStatus>, &str), DecodeError> {
    let mut chars = token.chars();
    let (status, peer) = match chars.next().and_then(PeerStatus::from_prefix) {
        Some(status) => (Some(status), chars.as_str()),
        None => (None, token),
    };

    if peer.is_empty() {
        return Err(DecodeError::EmptyPeer);
    }

    if peer.chars().next().and_then(PeerStatus::from_prefix).is_some() {
        return Err(DecodeError::InvalidPeer {
            peer: peer.to_string(),
        });
    }

    Ok((status, peer))
}

/// Normalize the `when` column to seconds.
///
/// `-` means never polled and maps to zero. Minute and hour suffixes are
/// checked before the bare-seconds form.
pub fn normalize_since_last(token: &str) -> Result<u64, SinceLastError> {
    if token == "-" {
        return Ok(0);
    }

    let scaled = if token.contains('m') {
        scale(&token.replace('m', ""), SECONDS_PER_MINUTE)
    } else if token.contains('h') {
        scale(&token.replace('h', ""), SECONDS_PER_HOUR)
    } else {
        token.parse::<u64>().ok()
    };

    scaled.ok_or_else(|| SinceLastError::NotADuration {
        token: token.to_string(),
    })
}

fn scale(digits: &str, factor: u64) -> Option<u64> {
    digits.parse::<u64>().ok()?.checked_mul(factor)
}

fn integer<T: FromStr>(field: &'static str, token: &str) -> Result<T, DecodeError> {
    token.parse().map_err(|_| DecodeError::InvalidInteger {
        field,
        token: token.to_string(),
    })
}

fn float(field: &'static str, token: &str) -> Result<f64, DecodeError> {
    token.parse().map_err(|_| DecodeError::InvalidFloat {
        field,
        token: token.to_string(),
    })
}
