use crate::parse::constants::{
    COLUMN_HEADER_PREFIX, MIN_CANDIDATE_TOKENS, SENTINEL_REF_IDS, TIMESTAMP_FENCE,
};

/// What a single log line is, as far as the parser is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// `=== <text> ===`, carrying the interior text.
    TimestampHeader(&'a str),
    /// Blank lines, the `remote ...` column header, `=` separator rows and
    /// rows too short to be data.
    Skippable,
    /// A data row whose reference id is a sentinel such as `.INIT.`.
    Sentinel,
    Candidate(Vec<&'a str>),
}

pub fn is_sentinel_ref_id(ref_id: &str) -> bool {
    SENTINEL_REF_IDS.contains(&ref_id)
}

/// Classify one raw line.
///
/// Order matters: a timestamp fence also starts with `=`, so the header check
/// has to run before the skip rules.
pub fn classify_line(line: &str) -> LineClass<'_> {
    let line = line.trim();

    if let Some(text) = timestamp_interior(line) {
        return LineClass::TimestampHeader(text);
    }

    if line.is_empty() || line.starts_with(COLUMN_HEADER_PREFIX) || line.starts_with('=') {
        return LineClass::Skippable;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_CANDIDATE_TOKENS {
        return LineClass::Skippable;
    }

    if is_sentinel_ref_id(tokens[1]) {
        return LineClass::Sentinel;
    }

    LineClass::Candidate(tokens)
}

fn timestamp_interior(line: &str) -> Option<&str> {
    let inner = line
        .strip_prefix(TIMESTAMP_FENCE)?
        .strip_suffix(TIMESTAMP_FENCE)?;

    // Fences must be separated from the text by whitespace: "=== x ===".
    if !inner.starts_with(char::is_whitespace) || !inner.ends_with(char::is_whitespace) {
        return None;
    }

    let text = inner.trim();
    (!text.is_empty()).then_some(text)
}
