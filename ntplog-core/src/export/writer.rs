use crate::conf::PeerLocations;
use crate::export::error::ExportError;
use crate::export::rows::{CsvRow, LocationRow, PeerRow, RecordRow, SummaryRow};
use crate::parse::Record;
use crate::stats::{PeerSummary, group_by_peer, summarize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const RECORDS_FILE: &str = "ntp_records.csv";
pub const LOCATIONS_FILE: &str = "ntp_locations.csv";
pub const SUMMARY_FILE: &str = "ntp_statistics.csv";
pub const PEERS_DIR: &str = "peers";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerFile {
    pub peer: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// Everything `export_all` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub records: PathBuf,
    pub locations: PathBuf,
    pub summary: PathBuf,
    pub peer_files: Vec<PeerFile>,
}

impl ExportReport {
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [&self.records, &self.locations, &self.summary]
            .into_iter()
            .map(PathBuf::as_path)
            .chain(self.peer_files.iter().map(|f| f.path.as_path()))
    }
}

/// Write every artifact into `output_dir`, creating it if needed.
pub fn export_all(
    output_dir: &Path,
    records: &[Record],
    locations: &PeerLocations,
) -> Result<ExportReport, ExportError> {
    create_dir(output_dir)?;

    let records_path = output_dir.join(RECORDS_FILE);
    write_records(&records_path, records)?;

    let locations_path = output_dir.join(LOCATIONS_FILE);
    write_locations(&locations_path, records, locations)?;

    let peer_files = write_peer_files(&output_dir.join(PEERS_DIR), records, locations)?;

    let summary_path = output_dir.join(SUMMARY_FILE);
    write_summary(&summary_path, &summarize(records, locations))?;

    let report = ExportReport {
        records: records_path,
        locations: locations_path,
        summary: summary_path,
        peer_files,
    };

    tracing::info!(
        dir = %output_dir.display(),
        files = report.paths().count(),
        "export complete"
    );

    Ok(report)
}

pub fn write_records(path: &Path, records: &[Record]) -> Result<usize, ExportError> {
    write_rows(path, records.iter().map(RecordRow::from))
}

pub fn write_locations(
    path: &Path,
    records: &[Record],
    locations: &PeerLocations,
) -> Result<usize, ExportError> {
    write_rows(
        path,
        records.iter().map(|r| LocationRow {
            timestamp: r.formatted_timestamp(),
            location: locations.resolve(&r.peer),
            server: &r.peer,
            delay_ms: r.delay_ms,
            offset_ms: r.offset_ms,
            jitter_ms: r.jitter_ms,
        }),
    )
}

/// One file per distinct peer in `dir`, named after its location.
pub fn write_peer_files(
    dir: &Path,
    records: &[Record],
    locations: &PeerLocations,
) -> Result<Vec<PeerFile>, ExportError> {
    create_dir(dir)?;

    let mut used = HashSet::new();
    let mut written = Vec::new();

    for (peer, group) in group_by_peer(records) {
        let stem = unique_stem(&mut used, file_stem(locations.resolve(peer)), peer);

        let path = dir.join(format!("{stem}.csv"));
        let rows = write_rows(&path, group.into_iter().map(PeerRow::from))?;

        tracing::debug!(peer, path = %path.display(), rows, "wrote peer file");
        written.push(PeerFile {
            peer: peer.to_string(),
            path,
            rows,
        });
    }

    Ok(written)
}

pub fn write_summary(path: &Path, summaries: &[PeerSummary]) -> Result<usize, ExportError> {
    write_rows(path, summaries.iter().map(SummaryRow::from))
}

/// Make a name safe to use as a file stem: anything other than ASCII
/// alphanumerics, `-` and `_` becomes `_`.
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Claim `base`, falling back to `<base>_<peer>` and then numbered variants
/// of that until one is free.
fn unique_stem(used: &mut HashSet<String>, base: String, peer: &str) -> String {
    if used.insert(base.clone()) {
        return base;
    }

    let fallback = format!("{base}_{}", file_stem(peer));
    let mut candidate = fallback.clone();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{fallback}_{n}");
        n += 1;
    }
    candidate
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(path).map_err(|source| ExportError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// The writer is flushed and dropped before returning, on every path. The
/// header row is written even when there are no rows.
fn write_rows<T, I>(path: &Path, rows: I) -> Result<usize, ExportError>
where
    T: CsvRow,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| ExportError::write(path, e))?;

    let mut count = 0;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ExportError::write(path, e))?;
        count += 1;
    }

    if count == 0 {
        writer
            .write_record(T::HEADERS)
            .map_err(|e| ExportError::write(path, e))?;
    }

    writer.flush().map_err(|e| ExportError::write(path, e))?;
    Ok(count)
}
