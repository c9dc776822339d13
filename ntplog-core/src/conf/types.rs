use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "ntp-logs/ntplog.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "parsed-ntp-logs";

const BUILTIN_LOCATIONS: &[(&str, &str)] = &[
    ("140.203.204.77", "Ireland"),
    ("ntp0.cam.ac.uk", "UK"),
    ("ptbtime1.ptb.de", "Germany"),
    ("time-a-g.nist.g", "US"),
    ("ntp1.tuxfamily.org", "France"),
    ("ns1.anu.edu.au", "Australia"),
    ("ntp-b3.nict.go", "Japan"),
];

/// Peer identifier -> human readable location, matched on the exact string
/// printed by ntpq (which truncates long hostnames).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerLocations(BTreeMap<String, String>);

impl PeerLocations {
    pub fn get(&self, peer: &str) -> Option<&str> {
        self.0.get(peer).map(String::as_str)
    }

    /// The location for `peer`, or `peer` itself when it is not in the table.
    pub fn resolve<'a>(&'a self, peer: &'a str) -> &'a str {
        self.get(peer).unwrap_or(peer)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries in `other` win over entries already present.
    pub fn merged_with(mut self, other: PeerLocations) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl Default for PeerLocations {
    fn default() -> Self {
        BUILTIN_LOCATIONS
            .iter()
            .map(|(peer, location)| (peer.to_string(), location.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for PeerLocations {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NtpLogConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub locations: PeerLocations,
}

impl Default for NtpLogConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            locations: PeerLocations::default(),
        }
    }
}

/// On-disk shape of `ntplog.hcl`. Every attribute is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    #[serde(default)]
    pub replace_builtin_locations: bool,
}
