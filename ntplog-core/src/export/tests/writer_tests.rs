use crate::conf::PeerLocations;
use crate::export::{
    ExportError, LOCATIONS_FILE, PEERS_DIR, RECORDS_FILE, SUMMARY_FILE, export_all, file_stem,
    write_locations, write_peer_files, write_records, write_summary,
};
use crate::parse::{PeerStatus, Record};
use crate::stats::summarize;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn record(peer: &str, status: Option<PeerStatus>, delay: f64) -> Record {
    Record {
        timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap(),
        status,
        peer: peer.to_string(),
        ref_id: ".GPS.".to_string(),
        stratum: 1,
        kind: "u".to_string(),
        since_last_seconds: 300,
        poll_interval: 64,
        reachability: 377,
        delay_ms: delay,
        offset_ms: -0.067,
        jitter_ms: 1.234,
    }
}

#[test]
fn records_file_has_every_column() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join(RECORDS_FILE);
    let records = vec![
        record("140.203.204.77", Some(PeerStatus::Selected), 12.345),
        record("10.0.0.1", None, 3.5),
    ];

    // Act
    let rows = write_records(&path, &records).unwrap();

    // Assert
    assert_eq!(rows, 2);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "timestamp,status,remote,refid,stratum,type,when_seconds,poll,reach,delay_ms,offset_ms,jitter_ms\n\
         2024-06-01 12:00:00,*,140.203.204.77,.GPS.,1,u,300,64,377,12.345,-0.067,1.234\n\
         2024-06-01 12:00:00,,10.0.0.1,.GPS.,1,u,300,64,377,3.5,-0.067,1.234\n"
    );
}

#[test]
fn location_file_resolves_known_peers_only() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join(LOCATIONS_FILE);
    let records = vec![
        record("140.203.204.77", None, 12.345),
        record("10.0.0.1", None, 3.5),
    ];

    // Act
    write_locations(&path, &records, &PeerLocations::default()).unwrap();

    // Assert
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "timestamp,location,server,delay_ms,offset_ms,jitter_ms\n\
         2024-06-01 12:00:00,Ireland,140.203.204.77,12.345,-0.067,1.234\n\
         2024-06-01 12:00:00,10.0.0.1,10.0.0.1,3.5,-0.067,1.234\n"
    );
}

#[test]
fn peer_files_are_named_by_location() {
    // Arrange
    let dir = tempdir().unwrap();
    let records = vec![
        record("140.203.204.77", None, 1.0),
        record("10.0.0.1", None, 2.0),
        record("140.203.204.77", None, 3.0),
    ];

    // Act
    let files = write_peer_files(dir.path(), &records, &PeerLocations::default()).unwrap();

    // Assert
    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["10_0_0_1.csv", "Ireland.csv"]);
    assert_eq!(files[1].rows, 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("Ireland.csv")).unwrap(),
        "timestamp,delay_ms,offset_ms,jitter_ms\n\
         2024-06-01 12:00:00,1.0,-0.067,1.234\n\
         2024-06-01 12:00:00,3.0,-0.067,1.234\n"
    );
}

#[test]
fn peers_sharing_a_location_do_not_overwrite_each_other() {
    // Arrange
    let dir = tempdir().unwrap();
    let locations: PeerLocations = [
        ("a.example".to_string(), "Lab".to_string()),
        ("b.example".to_string(), "Lab".to_string()),
    ]
    .into_iter()
    .collect();
    let records = vec![record("a.example", None, 1.0), record("b.example", None, 2.0)];

    // Act
    let files = write_peer_files(dir.path(), &records, &locations).unwrap();

    // Assert
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].path, dir.path().join("Lab.csv"));
    assert_eq!(files[1].path, dir.path().join("Lab_b_example.csv"));
}

#[test]
fn fallback_names_that_collide_get_a_numbered_suffix() {
    // Arrange
    let dir = tempdir().unwrap();
    let locations: PeerLocations = [
        ("a.example".to_string(), "Lab".to_string()),
        ("a?example".to_string(), "Lab".to_string()),
        ("a_example".to_string(), "Lab".to_string()),
    ]
    .into_iter()
    .collect();
    let records = vec![
        record("a.example", None, 1.0),
        record("a?example", None, 2.0),
        record("a_example", None, 3.0),
    ];

    // Act
    let files = write_peer_files(dir.path(), &records, &locations).unwrap();

    // Assert
    let names: Vec<_> = files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["Lab.csv", "Lab_a_example.csv", "Lab_a_example_2.csv"]
    );
    for file in &files {
        assert_eq!(file.rows, 1);
        assert!(file.path.exists());
    }
}

#[test]
fn summary_file_uses_stat_column_names() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join(SUMMARY_FILE);
    let records = vec![
        record("140.203.204.77", None, 10.0),
        record("140.203.204.77", None, 20.0),
        record("140.203.204.77", None, 30.0),
    ];
    let summaries = summarize(&records, &PeerLocations::default());

    // Act
    write_summary(&path, &summaries).unwrap();

    // Assert
    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Server,Location,Data_Points,Delay_Min,Delay_Max,Delay_Mean,Delay_StdDev,\
         Offset_Min,Offset_Max,Offset_Mean,Offset_StdDev,\
         Jitter_Min,Jitter_Max,Jitter_Mean,Jitter_StdDev"
    );
    assert!(
        lines
            .next()
            .unwrap()
            .starts_with("140.203.204.77,Ireland,3,10.0,30.0,20.0,10.0,")
    );
}

#[test]
fn export_all_writes_the_full_tree() {
    // Arrange
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested/out");
    let records = vec![
        record("140.203.204.77", None, 1.0),
        record("ntp0.cam.ac.uk", None, 2.0),
    ];

    // Act
    let report = export_all(&out, &records, &PeerLocations::default()).unwrap();

    // Assert
    assert_eq!(report.records, out.join(RECORDS_FILE));
    assert_eq!(report.peer_files.len(), 2);
    assert_eq!(report.paths().count(), 5);
    for path in report.paths() {
        assert!(path.exists(), "{} missing", path.display());
    }
    assert!(out.join(PEERS_DIR).join("UK.csv").exists());
}

#[test]
fn empty_export_still_writes_headers() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let report = export_all(dir.path(), &[], &PeerLocations::default()).unwrap();

    // Assert
    assert!(report.peer_files.is_empty());
    assert_eq!(
        fs::read_to_string(&report.records).unwrap(),
        "timestamp,status,remote,refid,stratum,type,when_seconds,poll,reach,delay_ms,offset_ms,jitter_ms\n"
    );
    assert_eq!(
        fs::read_to_string(&report.locations).unwrap(),
        "timestamp,location,server,delay_ms,offset_ms,jitter_ms\n"
    );
    assert_eq!(
        fs::read_to_string(&report.summary).unwrap(),
        "Server,Location,Data_Points,Delay_Min,Delay_Max,Delay_Mean,Delay_StdDev,\
         Offset_Min,Offset_Max,Offset_Mean,Offset_StdDev,\
         Jitter_Min,Jitter_Max,Jitter_Mean,Jitter_StdDev\n"
    );
}

#[test]
fn export_into_a_file_path_fails() {
    // Arrange
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("taken");
    fs::write(&blocker, "").unwrap();

    // Act
    let err = export_all(&blocker, &[], &PeerLocations::default()).unwrap_err();

    // Assert
    assert!(matches!(err, ExportError::CreateDir { .. }));
}

#[test]
fn file_stems_are_filesystem_safe() {
    assert_eq!(file_stem("140.203.204.77"), "140_203_204_77");
    assert_eq!(file_stem("ntp-b3.nict.go"), "ntp-b3_nict_go");
    assert_eq!(file_stem("Ireland"), "Ireland");
    assert_eq!(file_stem("a/b c"), "a_b_c");
}
