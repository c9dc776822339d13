use crate::stats::summary::{FieldStats, PeerSummary};
use owo_colors::OwoColorize;

/// Fixed-width per-peer table for the terminal.
pub fn render_summary(summaries: &[PeerSummary]) -> String {
    let mut out = String::new();

    if summaries.is_empty() {
        out.push_str("No data points\n");
        return out;
    }

    out.push_str(&format!(
        "{:<20} {:<12} {:>6}  {:<31}  {:<31}  {:<31}\n",
        "Server", "Location", "Points", "Delay ms", "Offset ms", "Jitter ms"
    ));
    out.push_str(&format!(
        "{:<20} {:<12} {:>6}  {}  {}  {}\n",
        "",
        "",
        "",
        columns_label(),
        columns_label(),
        columns_label()
    ));
    out.push_str(&"=".repeat(20 + 1 + 12 + 1 + 6 + 3 * 33));
    out.push('\n');

    for s in summaries {
        out.push_str(&format!(
            "{:<20} {:<12} {:>6}  {}  {}  {}\n",
            s.peer,
            s.location,
            s.data_points,
            field(&s.delay),
            field(&s.offset),
            field(&s.jitter)
        ));
    }

    out
}

fn columns_label() -> String {
    format!("{:>7} {:>7} {:>7} {:>7}", "min", "max", "mean", "sd")
}

fn field(stats: &FieldStats) -> String {
    format!(
        "{:>7.3} {:>7.3} {:>7.3} {:>7.3}",
        stats.min, stats.max, stats.mean, stats.std_dev
    )
}

/// One-line colored headline, used after a run.
pub fn render_headline(records: usize, peers: usize) -> String {
    format!(
        "{} {} data points from {} peers",
        "✔".green(),
        records.bold(),
        peers.bold()
    )
}
