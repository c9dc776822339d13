use crate::export::ExportReport;
use crate::parse::{DiagnosticSummary, ParseOutcome};
use crate::stats::render_headline;
use owo_colors::OwoColorize;

/// End-of-run summary for the `run` command.
pub fn render_run_report(
    outcome: &ParseOutcome,
    diagnostics: &DiagnosticSummary,
    report: &ExportReport,
) -> String {
    let mut out = String::new();

    out.push_str(&render_headline(outcome.count(), report.peer_files.len()));
    out.push_str(&format!(" ({} lines read)\n", outcome.lines_read));

    if diagnostics.dropped_lines() > 0 {
        out.push_str(&format!(
            "{} dropped {} lines: {} malformed, {} before first timestamp\n",
            "!".yellow(),
            diagnostics.dropped_lines(),
            diagnostics.malformed,
            diagnostics.missing_timestamp
        ));
    }

    if diagnostics.since_last_fallback > 0 {
        out.push_str(&format!(
            "{} {} unreadable 'when' values recorded as 0\n",
            "!".yellow(),
            diagnostics.since_last_fallback
        ));
    }

    if let Some(halt) = &outcome.halted {
        out.push_str(&format!(
            "{} stopped at line {}: {}\n",
            "✘".red(),
            halt.line_number,
            halt.error
        ));
    }

    out.push_str("✔ Wrote:\n");
    for path in report.paths() {
        out.push_str(&format!("  - {}\n", path.display()));
    }

    out
}
