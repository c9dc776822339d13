use crate::parse::error::{DecodeError, TimestampError};
use std::fmt;

/// Something the parser dropped, degraded or stopped on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the input.
    pub line_number: usize,
    pub kind: DiagnosticKind,
    /// The offending line, trimmed.
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    Malformed(DecodeError),
    SinceLastFallback { token: String },
    MissingTimestamp,
    InvalidTimestamp(TimestampError),
}

impl DiagnosticKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::SinceLastFallback { .. } => "since_last_fallback",
            Self::MissingTimestamp => "missing_timestamp",
            Self::InvalidTimestamp(_) => "invalid_timestamp",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidTimestamp(_))
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed line: {err}"),
            Self::SinceLastFallback { token } => {
                write!(f, "unreadable 'when' value '{token}', using 0")
            }
            Self::MissingTimestamp => write!(f, "data line before any timestamp header"),
            Self::InvalidTimestamp(err) => write!(f, "invalid timestamp header: {err}"),
        }
    }
}

/// Where the parser sends its diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Emits every diagnostic as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind.is_fatal() {
            tracing::error!(
                line = diagnostic.line_number,
                kind = diagnostic.kind.label(),
                raw = %diagnostic.line,
                "{}, stopping",
                diagnostic.kind
            );
        } else {
            tracing::warn!(
                line = diagnostic.line_number,
                kind = diagnostic.kind.label(),
                raw = %diagnostic.line,
                "{}",
                diagnostic.kind
            );
        }
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl DiagnosticSink for Discard {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Forwards to two sinks, e.g. collect for the report and log as we go.
pub struct Tee<A, B>(pub A, pub B);

impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for Tee<A, B> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.report(diagnostic.clone());
        self.1.report(diagnostic);
    }
}

/// Per-kind counts, for end-of-run reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticSummary {
    pub malformed: usize,
    pub since_last_fallback: usize,
    pub missing_timestamp: usize,
    pub invalid_timestamp: usize,
}

impl DiagnosticSummary {
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        let mut summary = Self::default();
        for d in diagnostics {
            match d.kind {
                DiagnosticKind::Malformed(_) => summary.malformed += 1,
                DiagnosticKind::SinceLastFallback { .. } => summary.since_last_fallback += 1,
                DiagnosticKind::MissingTimestamp => summary.missing_timestamp += 1,
                DiagnosticKind::InvalidTimestamp(_) => summary.invalid_timestamp += 1,
            }
        }
        summary
    }

    pub fn dropped_lines(&self) -> usize {
        self.malformed + self.missing_timestamp
    }
}
