use crate::conf::{ConfigError, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!("✔ input: {}", cfg.input.display());
            println!("✔ output: {}", cfg.output_dir.display());
            println!("✔ {} peer locations", cfg.locations.len());
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(hint) = config_error_hint(&err) {
                eprintln!();
                eprintln!("{hint}");
            }
            anyhow::bail!("config check failed for {}", path.display())
        }
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::EmptyLocation { .. } => Some(
            "Every peer in `locations` needs a non-empty name.\n\
             \n\
             Example:\n\
             \n\
             locations = {\n\
             \x20 \"140.203.204.77\" = \"Ireland\"\n\
             }",
        ),

        ConfigError::EmptyPath { .. } => Some(
            "`input` and `output_dir` must be non-empty paths.\n\
             \n\
             Remove the attribute to use the default instead.",
        ),

        ConfigError::Parse { .. } => Some(
            "Recognised attributes are `input`, `output_dir`, `locations` and\n\
             `replace_builtin_locations`. Run `ntplog config init` for a starter file.",
        ),

        ConfigError::ReadFile { .. } => None,
    }
}
