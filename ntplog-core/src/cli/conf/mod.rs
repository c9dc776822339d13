mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "ntplog.hcl";

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a config file and exit
    Check {
        /// Path to the config file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },

    /// Print the resolved configuration as JSON
    Dump {
        /// Path to the config file; built-in defaults when omitted
        path: Option<PathBuf>,
    },

    /// Write a starter config file
    Init {
        /// Path to the config file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path } => dump(path),
        ConfigCmd::Init { path } => init(path),
    }
}
