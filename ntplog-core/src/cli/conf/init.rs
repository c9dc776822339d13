use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

pub fn init(path: PathBuf) -> Result<()> {
    // Refuse to overwrite an existing file
    if path.exists() {
        bail!("config file '{}' already exists", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    fs::write(&path, STARTER_HCL.trim_start())
        .with_context(|| format!("failed to create {}", path.display()))?;

    println!("✔ Initialized ntplog config in {}", path.display());
    println!();
    println!("Next steps:");
    println!("  ntplog config check {}", path.display());
    println!("  ntplog run --config {}", path.display());

    Ok(())
}

//-----------------------------------------------------------------------------
// Templates
//-----------------------------------------------------------------------------

pub const STARTER_HCL: &str = r#"
# Polling log produced by repeatedly running `ntpq -p`.
input = "ntp-logs/ntplog.txt"

# CSV files are written here.
output_dir = "parsed-ntp-logs"

# Set to true to use only the locations below.
replace_builtin_locations = false

# Peer identifier (as printed by ntpq) -> location.
locations = {
  "140.203.204.77"     = "Ireland"
  "ntp0.cam.ac.uk"     = "UK"
  "ptbtime1.ptb.de"    = "Germany"
  "time-a-g.nist.g"    = "US"
  "ntp1.tuxfamily.org" = "France"
  "ns1.anu.edu.au"     = "Australia"
  "ntp-b3.nict.go"     = "Japan"
}
"#;
