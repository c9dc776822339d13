mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{apply_overrides, load_config, load_config_or_default, resolve_config};
pub use types::*;
