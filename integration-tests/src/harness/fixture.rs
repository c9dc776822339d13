use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const COLUMNS: &str =
    "     remote           refid      st t when poll reach   delay   offset  jitter";
pub const RULE: &str =
    "==============================================================================";

/// Builds an `ntpq -p` polling log one snapshot at a time.
#[derive(Default)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a snapshot: timestamp header, column header and separator.
    pub fn snapshot(mut self, stamp: &str) -> Self {
        self.lines.push(format!("=== {stamp} ==="));
        self.lines.push(COLUMNS.to_string());
        self.lines.push(RULE.to_string());
        self
    }

    pub fn peer(
        mut self,
        remote: &str,
        refid: &str,
        when: &str,
        delay: f64,
        offset: f64,
        jitter: f64,
    ) -> Self {
        self.lines.push(format!(
            "{remote:<17}{refid:<16} 1 u {when:>4}   64  377 {delay:>8.3} {offset:>8.3} {jitter:>7.3}"
        ));
        self
    }

    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// A temporary directory holding an input log and an output directory.
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn with_log(contents: &str) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let input = dir.path().join("ntplog.txt");
        let output = dir.path().join("parsed-ntp-logs");
        fs::write(&input, contents).expect("failed to write fixture log");
        Self { dir, input, output }
    }

    pub fn read_output(&self, relative: &str) -> String {
        fs::read_to_string(self.output.join(relative))
            .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"))
    }
}
