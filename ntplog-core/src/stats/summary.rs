use crate::conf::PeerLocations;
use crate::parse::Record;
use serde::Serialize;
use std::collections::BTreeMap;

/// min / max / mean / sample standard deviation of one measurement column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl FieldStats {
    /// `None` for an empty slice. The standard deviation uses n - 1 and is
    /// zero for a single sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = samples.iter().sum::<f64>() / n;

        let std_dev = if samples.len() < 2 {
            0.0
        } else {
            let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        };

        Some(Self {
            min,
            max,
            mean,
            std_dev,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerSummary {
    pub peer: String,
    pub location: String,
    pub data_points: usize,
    pub delay: FieldStats,
    pub offset: FieldStats,
    pub jitter: FieldStats,
}

/// Records per peer, in input order, keyed by peer identifier.
pub fn group_by_peer(records: &[Record]) -> BTreeMap<&str, Vec<&Record>> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups.entry(record.peer.as_str()).or_default().push(record);
    }
    groups
}

/// One summary row per distinct peer, sorted by peer identifier.
pub fn summarize(records: &[Record], locations: &PeerLocations) -> Vec<PeerSummary> {
    group_by_peer(records)
        .into_iter()
        .filter_map(|(peer, group)| {
            Some(PeerSummary {
                peer: peer.to_string(),
                location: locations.resolve(peer).to_string(),
                data_points: group.len(),
                delay: FieldStats::from_samples(&column(&group, |r| r.delay_ms))?,
                offset: FieldStats::from_samples(&column(&group, |r| r.offset_ms))?,
                jitter: FieldStats::from_samples(&column(&group, |r| r.jitter_ms))?,
            })
        })
        .collect()
}

fn column(group: &[&Record], value: fn(&Record) -> f64) -> Vec<f64> {
    group.iter().map(|r| value(r)).collect()
}
