use chrono::NaiveDate;
use integration_tests::harness::{LogBuilder, Workspace, with_captured_events};
use ntplog_core::conf::PeerLocations;
use ntplog_core::export::{LOCATIONS_FILE, RECORDS_FILE, SUMMARY_FILE, export_all};
use ntplog_core::parse::{ParseOutcome, parse_file, parse_str};
use ntplog_core::stats::summarize;
use pretty_assertions::assert_eq;
use tracing::Level;

fn three_snapshots() -> String {
    LogBuilder::new()
        .snapshot("2024-06-01 12:00:00 UTC")
        .peer("*140.203.204.77", ".GPS.", "5m", 10.0, -0.1, 1.0)
        .peer("+ntp0.cam.ac.uk", ".PPS.", "45", 20.0, 0.5, 0.3)
        .peer(" ns1.anu.edu.au", ".INIT.", "-", 0.0, 0.0, 0.0)
        .snapshot("2024-06-01 12:05:00 UTC")
        .peer("*140.203.204.77", ".GPS.", "2h", 20.0, -0.2, 1.0)
        .peer("+ntp0.cam.ac.uk", ".PPS.", "-", 20.0, 0.5, 0.3)
        .snapshot("2024-06-01 12:10:00 UTC")
        .peer("*140.203.204.77", ".GPS.", "12", 30.0, -0.3, 1.0)
        .peer("+ntp0.cam.ac.uk", ".PPS.", "abcm", 20.0, 0.5, 0.3)
        .build()
}

#[test]
fn full_pipeline_writes_expected_artifacts() {
    // Arrange
    let ws = Workspace::with_log(&three_snapshots());

    // Act
    let outcome = parse_file(&ws.input).unwrap();
    let report = export_all(&ws.output, &outcome.records, &PeerLocations::default()).unwrap();

    // Assert
    assert_eq!(outcome.count(), 6);
    assert_eq!(outcome.halted, None);
    assert_eq!(report.peer_files.len(), 2);

    let records = ws.read_output(RECORDS_FILE);
    assert_eq!(records.lines().count(), 7);
    assert!(records.contains("2024-06-01 12:05:00,*,140.203.204.77,.GPS.,1,u,7200,64,377,20.0,-0.2,1.0"));
    assert!(records.contains("2024-06-01 12:10:00,+,ntp0.cam.ac.uk,.PPS.,1,u,0,64,377,20.0,0.5,0.3"));
    assert!(!records.contains("ns1.anu.edu.au"));

    let locations = ws.read_output(LOCATIONS_FILE);
    assert!(locations.contains("2024-06-01 12:00:00,Ireland,140.203.204.77,10.0,-0.1,1.0"));
    assert!(locations.contains("2024-06-01 12:00:00,UK,ntp0.cam.ac.uk,20.0,0.5,0.3"));

    let summary = ws.read_output(SUMMARY_FILE);
    let rows: Vec<_> = summary.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("140.203.204.77,Ireland,3,10.0,30.0,20.0,10.0,"));
    assert!(rows[1].starts_with("ntp0.cam.ac.uk,UK,3,20.0,20.0,20.0,0.0,"));

    let ireland = ws.read_output("peers/Ireland.csv");
    assert_eq!(
        ireland,
        "timestamp,delay_ms,offset_ms,jitter_ms\n\
         2024-06-01 12:00:00,10.0,-0.1,1.0\n\
         2024-06-01 12:05:00,20.0,-0.2,1.0\n\
         2024-06-01 12:10:00,30.0,-0.3,1.0\n"
    );
}

#[test]
fn diagnostics_are_emitted_as_tracing_warnings() {
    // Arrange
    let log = LogBuilder::new()
        .raw("*140.203.204.77  .GPS.  1 u 5m 64 377 12.345 -0.067 1.234")
        .snapshot("2024-06-01 12:00:00 UTC")
        .peer("+ntp0.cam.ac.uk", ".PPS.", "abcm", 20.0, 0.5, 0.3)
        .raw("+ntp0.cam.ac.uk .PPS. 1 u 45 64 377 20.100 oops 0.300")
        .build();

    // Act
    let (outcome, layer) = with_captured_events(|| parse_str(&log));

    // Assert
    assert_eq!(outcome.count(), 1);

    let diagnostics = layer.diagnostics();
    let kinds: Vec<_> = diagnostics.iter().filter_map(|e| e.field("kind")).collect();
    assert_eq!(
        kinds,
        vec!["missing_timestamp", "since_last_fallback", "malformed"]
    );
    assert_eq!(diagnostics[2].field("line"), Some("6"));
    assert_eq!(
        diagnostics[2].field("raw"),
        Some("+ntp0.cam.ac.uk .PPS. 1 u 45 64 377 20.100 oops 0.300")
    );
    assert!(diagnostics.iter().all(|e| e.level == Level::WARN));
}

#[test]
fn bad_timestamp_stops_the_run_and_keeps_earlier_records() {
    // Arrange
    let log = LogBuilder::new()
        .snapshot("2024-06-01 12:00:00 UTC")
        .peer("*140.203.204.77", ".GPS.", "5m", 10.0, -0.1, 1.0)
        .peer("+ntp0.cam.ac.uk", ".PPS.", "45", 20.0, 0.5, 0.3)
        .peer("-ptbtime1.ptb.de", ".PTB.", "45", 25.0, 0.5, 0.3)
        .snapshot("2024-06-01 12:05:00 UTC")
        .peer("*140.203.204.77", ".GPS.", "5m", 10.0, -0.1, 1.0)
        .peer("+ntp0.cam.ac.uk", ".PPS.", "45", 20.0, 0.5, 0.3)
        .snapshot("yesterday at noon")
        .peer("*140.203.204.77", ".GPS.", "5m", 10.0, -0.1, 1.0)
        .snapshot("2024-06-01 12:15:00 UTC")
        .peer("*140.203.204.77", ".GPS.", "5m", 10.0, -0.1, 1.0)
        .build();

    // Act
    let (outcome, layer) = with_captured_events(|| parse_str(&log));

    // Assert
    assert_eq!(outcome.count(), 5);
    let halt = outcome.halted.as_ref().expect("expected the run to halt");
    assert_eq!(halt.text, "yesterday at noon");

    let errors: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|e| e.level == Level::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("kind"), Some("invalid_timestamp"));

    let last = outcome.records.last().unwrap();
    assert_eq!(
        last.timestamp,
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 5, 0))
            .unwrap()
    );
}

#[test]
fn same_input_gives_same_records_and_stats() {
    // Arrange
    let log = three_snapshots();

    // Act
    let first: ParseOutcome = parse_str(&log);
    let second: ParseOutcome = parse_str(&log);

    // Assert
    assert_eq!(first, second);
    assert_eq!(
        summarize(&first.records, &PeerLocations::default()),
        summarize(&second.records, &PeerLocations::default())
    );
}

#[test]
fn custom_location_table_changes_names_only() {
    // Arrange
    let ws = Workspace::with_log(&three_snapshots());
    let locations: PeerLocations = [("140.203.204.77".to_string(), "Galway".to_string())]
        .into_iter()
        .collect();

    // Act
    let outcome = parse_file(&ws.input).unwrap();
    let report = export_all(&ws.output, &outcome.records, &locations).unwrap();

    // Assert
    let names: Vec<_> = report
        .peer_files
        .iter()
        .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Galway.csv", "ntp0_cam_ac_uk.csv"]);
    assert!(ws.read_output(LOCATIONS_FILE).contains(",ntp0.cam.ac.uk,ntp0.cam.ac.uk,"));
}
