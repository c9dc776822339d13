use crate::cli::report::render_run_report;
use crate::cli::{RunArgs, resolve_config};
use crate::export::export_all;
use crate::parse::{Diagnostic, DiagnosticSummary, Tee, TracingSink, parse_file_with};
use anyhow::Context;

/// Parse the configured log and write every CSV artifact.
pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.source, args.output)?;

    tracing::info!(
        input = %cfg.input.display(),
        output = %cfg.output_dir.display(),
        peers = cfg.locations.len(),
        "parsing ntp log"
    );

    let sink = Tee(TracingSink, Vec::<Diagnostic>::new());
    let (outcome, Tee(_, diagnostics)) = parse_file_with(&cfg.input, sink)
        .with_context(|| format!("failed to parse {}", cfg.input.display()))?;

    let report = export_all(&cfg.output_dir, &outcome.records, &cfg.locations)
        .with_context(|| format!("failed to export to {}", cfg.output_dir.display()))?;

    let summary = DiagnosticSummary::from_diagnostics(&diagnostics);
    print!("{}", render_run_report(&outcome, &summary, &report));

    Ok(())
}
