use crate::conf::load_config_or_default;
use serde::Serialize;
use std::path::PathBuf;

pub fn dump(path: Option<PathBuf>) -> anyhow::Result<()> {
    let cfg = load_config_or_default(path.as_deref())?;
    dump_json(&cfg)
}

fn dump_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}
