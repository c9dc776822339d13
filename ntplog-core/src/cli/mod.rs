pub mod conf;
mod report;
mod run;
mod stats;

pub use report::render_run_report;
pub use run::run;
pub use stats::stats;

use crate::conf::{NtpLogConfig, apply_overrides, load_config_or_default};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Where to read from and write to; every flag overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to an ntplog.hcl config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Polling log to parse
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory the CSV files are written to
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

fn resolve_config(source: &SourceArgs, output: Option<PathBuf>) -> anyhow::Result<NtpLogConfig> {
    let cfg = load_config_or_default(source.config.as_deref()).with_context(|| {
        match &source.config {
            Some(path) => format!("failed to load config {}", path.display()),
            None => "failed to build default config".to_string(),
        }
    })?;

    Ok(apply_overrides(cfg, source.input.clone(), output)?)
}
