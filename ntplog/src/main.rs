use clap::{Parser, Subcommand};
use ntplog_core::cli::{self, RunArgs, SourceArgs};
use ntplog_core::logging::{LogFormat, default_log_format, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "ntplog",
    version,
    about = "ntplog: turn ntpq polling logs into per-peer CSV and statistics"
)]
struct Cli {
    /// Log output format (defaults to pretty on a terminal, JSON otherwise)
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse the log and write all CSV artifacts (default)
    Run(RunArgs),

    /// Parse the log and print per-peer statistics
    Stats(SourceArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format.unwrap_or_else(default_log_format));

    let result = match cli.command {
        Some(Command::Run(args)) => cli::run(args),
        Some(Command::Stats(args)) => cli::stats(args),
        Some(Command::Config { cmd }) => cli::conf::run(cmd),
        None => cli::run(RunArgs::default()),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("ntplog error: {e:#}");
        std::process::exit(1);
    }
}
