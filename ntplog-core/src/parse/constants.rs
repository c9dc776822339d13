/// Reference ids that mark a transient peer condition rather than a real upstream.
pub const SENTINEL_REF_IDS: &[&str] = &[".STEP.", ".INIT.", ".RATE."];

/// Lines with fewer tokens than this are not data rows at all.
pub const MIN_CANDIDATE_TOKENS: usize = 9;

/// remote, refid, st, t, when, poll, reach, delay, offset, jitter
pub const DATA_LINE_TOKENS: usize = 10;

pub const TIMESTAMP_FENCE: &str = "===";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const COLUMN_HEADER_PREFIX: &str = "remote";

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;
