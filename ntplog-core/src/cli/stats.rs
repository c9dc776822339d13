use crate::cli::{SourceArgs, resolve_config};
use crate::parse::parse_file;
use crate::stats::{render_summary, summarize};
use anyhow::Context;

/// Parse the configured log and print per-peer statistics. Nothing is written.
pub fn stats(source: SourceArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&source, None)?;

    let outcome =
        parse_file(&cfg.input).with_context(|| format!("failed to parse {}", cfg.input.display()))?;

    let summaries = summarize(&outcome.records, &cfg.locations);
    print!("{}", render_summary(&summaries));

    if let Some(halt) = &outcome.halted {
        println!(
            "\nstopped early at line {}: {}",
            halt.line_number, halt.error
        );
    }

    Ok(())
}
