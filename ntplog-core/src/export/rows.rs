use crate::parse::Record;
use crate::stats::PeerSummary;
use serde::Serialize;

/// A serializable CSV row with its header spelled out, so files without any
/// rows still get a header line.
pub trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Serialize)]
pub struct RecordRow<'a> {
    pub timestamp: String,
    pub status: String,
    pub remote: &'a str,
    pub refid: &'a str,
    pub stratum: u32,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub when_seconds: u64,
    pub poll: i64,
    pub reach: u32,
    pub delay_ms: f64,
    pub offset_ms: f64,
    pub jitter_ms: f64,
}

impl CsvRow for RecordRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "timestamp",
        "status",
        "remote",
        "refid",
        "stratum",
        "type",
        "when_seconds",
        "poll",
        "reach",
        "delay_ms",
        "offset_ms",
        "jitter_ms",
    ];
}

impl<'a> From<&'a Record> for RecordRow<'a> {
    fn from(r: &'a Record) -> Self {
        Self {
            timestamp: r.formatted_timestamp(),
            status: r.status_str(),
            remote: &r.peer,
            refid: &r.ref_id,
            stratum: r.stratum,
            kind: &r.kind,
            when_seconds: r.since_last_seconds,
            poll: r.poll_interval,
            reach: r.reachability,
            delay_ms: r.delay_ms,
            offset_ms: r.offset_ms,
            jitter_ms: r.jitter_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationRow<'a> {
    pub timestamp: String,
    pub location: &'a str,
    pub server: &'a str,
    pub delay_ms: f64,
    pub offset_ms: f64,
    pub jitter_ms: f64,
}

impl CsvRow for LocationRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "timestamp",
        "location",
        "server",
        "delay_ms",
        "offset_ms",
        "jitter_ms",
    ];
}

#[derive(Debug, Serialize)]
pub struct PeerRow {
    pub timestamp: String,
    pub delay_ms: f64,
    pub offset_ms: f64,
    pub jitter_ms: f64,
}

impl CsvRow for PeerRow {
    const HEADERS: &'static [&'static str] = &["timestamp", "delay_ms", "offset_ms", "jitter_ms"];
}

impl From<&Record> for PeerRow {
    fn from(r: &Record) -> Self {
        Self {
            timestamp: r.formatted_timestamp(),
            delay_ms: r.delay_ms,
            offset_ms: r.offset_ms,
            jitter_ms: r.jitter_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryRow<'a> {
    #[serde(rename = "Server")]
    pub server: &'a str,
    #[serde(rename = "Location")]
    pub location: &'a str,
    #[serde(rename = "Data_Points")]
    pub data_points: usize,
    #[serde(rename = "Delay_Min")]
    pub delay_min: f64,
    #[serde(rename = "Delay_Max")]
    pub delay_max: f64,
    #[serde(rename = "Delay_Mean")]
    pub delay_mean: f64,
    #[serde(rename = "Delay_StdDev")]
    pub delay_std_dev: f64,
    #[serde(rename = "Offset_Min")]
    pub offset_min: f64,
    #[serde(rename = "Offset_Max")]
    pub offset_max: f64,
    #[serde(rename = "Offset_Mean")]
    pub offset_mean: f64,
    #[serde(rename = "Offset_StdDev")]
    pub offset_std_dev: f64,
    #[serde(rename = "Jitter_Min")]
    pub jitter_min: f64,
    #[serde(rename = "Jitter_Max")]
    pub jitter_max: f64,
    #[serde(rename = "Jitter_Mean")]
    pub jitter_mean: f64,
    #[serde(rename = "Jitter_StdDev")]
    pub jitter_std_dev: f64,
}

impl CsvRow for SummaryRow<'_> {
    const HEADERS: &'static [&'static str] = &[
        "Server",
        "Location",
        "Data_Points",
        "Delay_Min",
        "Delay_Max",
        "Delay_Mean",
        "Delay_StdDev",
        "Offset_Min",
        "Offset_Max",
        "Offset_Mean",
        "Offset_StdDev",
        "Jitter_Min",
        "Jitter_Max",
        "Jitter_Mean",
        "Jitter_StdDev",
    ];
}

impl<'a> From<&'a PeerSummary> for SummaryRow<'a> {
    fn from(s: &'a PeerSummary) -> Self {
        Self {
            server: &s.peer,
            location: &s.location,
            data_points: s.data_points,
            delay_min: s.delay.min,
            delay_max: s.delay.max,
            delay_mean: s.delay.mean,
            delay_std_dev: s.delay.std_dev,
            offset_min: s.offset.min,
            offset_max: s.offset.max,
            offset_mean: s.offset.mean,
            offset_std_dev: s.offset.std_dev,
            jitter_min: s.jitter.min,
            jitter_max: s.jitter.max,
            jitter_mean: s.jitter.mean,
            jitter_std_dev: s.jitter.std_dev,
        }
    }
}
