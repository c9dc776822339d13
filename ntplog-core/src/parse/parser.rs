use crate::parse::classify::{LineClass, classify_line};
use crate::parse::constants::TIMESTAMP_FORMAT;
use crate::parse::decode::decode_fields;
use crate::parse::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use crate::parse::error::{ParseError, TimestampError};
use crate::parse::types::Record;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::Path;

/// Where and why a run stopped before the end of its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halt {
    pub line_number: usize,
    pub text: String,
    pub error: TimestampError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    pub records: Vec<Record>,
    pub lines_read: usize,
    pub halted: Option<Halt>,
}

impl ParseOutcome {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Single-pass state machine over an `ntpq -p` polling log.
///
/// The only state carried between lines is the timestamp of the most recent
/// `=== ... ===` header. Records are stamped with it as they are decoded.
pub struct LogParser<S: DiagnosticSink = TracingSink> {
    current_timestamp: Option<NaiveDateTime>,
    records: Vec<Record>,
    lines_read: usize,
    halted: Option<Halt>,
    sink: S,
}

impl LogParser<TracingSink> {
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }
}

impl Default for LogParser<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> LogParser<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            current_timestamp: None,
            records: Vec::new(),
            lines_read: 0,
            halted: None,
            sink,
        }
    }

    pub fn current_timestamp(&self) -> Option<NaiveDateTime> {
        self.current_timestamp
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Advance the state machine by one line.
    ///
    /// Returns `Break` once an unparseable timestamp header has been seen;
    /// every later call is a no-op.
    pub fn feed_line(&mut self, line: &str) -> ControlFlow<()> {
        if self.halted.is_some() {
            return ControlFlow::Break(());
        }

        self.lines_read += 1;
        let line_number = self.lines_read;

        match classify_line(line) {
            LineClass::TimestampHeader(text) => match parse_timestamp_header(text) {
                Ok(ts) => {
                    self.current_timestamp = Some(ts);
                    ControlFlow::Continue(())
                }
                Err(error) => {
                    self.report(
                        line_number,
                        line,
                        DiagnosticKind::InvalidTimestamp(error.clone()),
                    );
                    self.halted = Some(Halt {
                        line_number,
                        text: text.to_string(),
                        error,
                    });
                    ControlFlow::Break(())
                }
            },
            LineClass::Skippable | LineClass::Sentinel => ControlFlow::Continue(()),
            LineClass::Candidate(tokens) => {
                self.decode_candidate(line_number, line, &tokens);
                ControlFlow::Continue(())
            }
        }
    }

    /// Feed every line of `reader`, stopping early on a halt.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a corrupt
    /// line is reported like any other malformed line instead of ending the run.
    pub fn feed_reader<R: BufRead>(&mut self, mut reader: R) -> Result<(), ParseError> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ParseError::Read {
                    line_number: self.lines_read + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if self.feed_line(line).is_break() {
                break;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> ParseOutcome {
        self.finish_with_sink().0
    }

    /// Like `finish`, also handing back the sink (useful for collecting sinks).
    pub fn finish_with_sink(self) -> (ParseOutcome, S) {
        tracing::info!(
            records = self.records.len(),
            lines = self.lines_read,
            halted = self.halted.is_some(),
            "successfully parsed {} data points",
            self.records.len()
        );

        (
            ParseOutcome {
                records: self.records,
                lines_read: self.lines_read,
                halted: self.halted,
            },
            self.sink,
        )
    }

    fn decode_candidate(&mut self, line_number: usize, line: &str, tokens: &[&str]) {
        let Some(timestamp) = self.current_timestamp else {
            self.report(line_number, line, DiagnosticKind::MissingTimestamp);
            return;
        };

        match decode_fields(tokens, timestamp) {
            Ok(decoded) => {
                if let Some(token) = decoded.since_last_fallback {
                    self.report(
                        line_number,
                        line,
                        DiagnosticKind::SinceLastFallback { token },
                    );
                }
                self.records.push(decoded.record);
            }
            Err(err) if err.is_expected() => {}
            Err(err) => self.report(line_number, line, DiagnosticKind::Malformed(err)),
        }
    }

    fn report(&mut self, line_number: usize, line: &str, kind: DiagnosticKind) {
        self.sink.report(Diagnostic {
            line_number,
            kind,
            line: line.trim().to_string(),
        });
    }
}

/// Decode the interior of a `=== ... ===` header: `YYYY-MM-DD HH:MM:SS ZONE`.
///
/// The zone has to be an alphabetic abbreviation; it is checked, not applied.
pub fn parse_timestamp_header(text: &str) -> Result<NaiveDateTime, TimestampError> {
    let text = text.trim();
    let Some((date_time, zone)) = text.rsplit_once(char::is_whitespace) else {
        return Err(TimestampError::MissingZone {
            text: text.to_string(),
        });
    };

    if zone.is_empty() || !zone.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(TimestampError::InvalidZone {
            zone: zone.to_string(),
        });
    }

    let date_time = date_time.trim_end();
    NaiveDateTime::parse_from_str(date_time, TIMESTAMP_FORMAT).map_err(|_| {
        TimestampError::InvalidDateTime {
            text: date_time.to_string(),
        }
    })
}

/// Parse an in-memory log, logging diagnostics through `tracing`.
pub fn parse_str(input: &str) -> ParseOutcome {
    parse_str_with(input, TracingSink).0
}

pub fn parse_str_with<S: DiagnosticSink>(input: &str, sink: S) -> (ParseOutcome, S) {
    let mut parser = LogParser::with_sink(sink);
    for line in input.lines() {
        if parser.feed_line(line).is_break() {
            break;
        }
    }
    parser.finish_with_sink()
}

pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParseOutcome, ParseError> {
    Ok(parse_reader_with(reader, TracingSink)?.0)
}

pub fn parse_reader_with<R: BufRead, S: DiagnosticSink>(
    reader: R,
    sink: S,
) -> Result<(ParseOutcome, S), ParseError> {
    let mut parser = LogParser::with_sink(sink);
    parser.feed_reader(reader)?;
    Ok(parser.finish_with_sink())
}

/// Parse a log file line by line. The file is closed before this returns,
/// including when the run halts early.
pub fn parse_file(path: &Path) -> Result<ParseOutcome, ParseError> {
    Ok(parse_file_with(path, TracingSink)?.0)
}

pub fn parse_file_with<S: DiagnosticSink>(
    path: &Path,
    sink: S,
) -> Result<(ParseOutcome, S), ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "reading ntp log");
    parse_reader_with(BufReader::new(file), sink)
}
