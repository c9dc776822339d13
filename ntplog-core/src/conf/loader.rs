use crate::conf::error::ConfigError;
use crate::conf::types::{ConfigFile, NtpLogConfig, PeerLocations};
use std::fs;
use std::path::{Path, PathBuf};

pub fn load_config(path: &Path) -> Result<NtpLogConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let file: ConfigFile = hcl::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;

    tracing::debug!(path = %path.display(), "loaded config file");

    resolve_config(file)
}

/// Load `path` if given, otherwise fall back to the built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<NtpLogConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(NtpLogConfig::default()),
    }
}

/// Layer a parsed config file over the defaults and validate the result.
pub fn resolve_config(file: ConfigFile) -> Result<NtpLogConfig, ConfigError> {
    let defaults = NtpLogConfig::default();

    if let Some((peer, _)) = file
        .locations
        .iter()
        .find(|(_, location)| location.trim().is_empty())
    {
        return Err(ConfigError::EmptyLocation { peer: peer.clone() });
    }

    let overrides: PeerLocations = file.locations.into_iter().collect();
    let locations = if file.replace_builtin_locations {
        overrides
    } else {
        defaults.locations.merged_with(overrides)
    };

    Ok(NtpLogConfig {
        input: non_empty("input", file.input)?.unwrap_or(defaults.input),
        output_dir: non_empty("output_dir", file.output_dir)?.unwrap_or(defaults.output_dir),
        locations,
    })
}

/// Command line values win over whatever the config resolved to.
pub fn apply_overrides(
    mut config: NtpLogConfig,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<NtpLogConfig, ConfigError> {
    if let Some(input) = non_empty("input", input)? {
        config.input = input;
    }
    if let Some(output_dir) = non_empty("output_dir", output_dir)? {
        config.output_dir = output_dir;
    }
    Ok(config)
}

fn non_empty(field: &'static str, value: Option<PathBuf>) -> Result<Option<PathBuf>, ConfigError> {
    match value {
        Some(p) if p.as_os_str().is_empty() => Err(ConfigError::EmptyPath { field }),
        other => Ok(other),
    }
}
