use std::fs;
use std::path::Path;

use confsheet_core::{
    collect_schedule, pipeline, render_document, write_outputs, DirectorySheetSource,
    HttpSheetSource, SyncConfig, SyncError, SyncOutcome,
};
use serde_json::Value;
use tempfile::TempDir;

const TRACKLIST: &str = "Track\tHeader Line\tKey Color\tRoom\tGID\n\
Main Stage\t1\t#336699\tHall 1\t200\n\
Not yet scheduled\t1\t#999999\tAnnex\t\n";

const JANE_SHEET: &str = "SessionID\tGiven Name\tFamily Name\tDate\tTime\tTopic of your contribution\n\
5\tJane\tDoe\tMonday August 1\t10:00 AM\tFolding rows\n";

fn write_sheets(dir: &Path, sheets: &[(&str, &str)]) {
    for (gid, content) in sheets {
        fs::write(dir.join(format!("{gid}.tsv")), content).expect("failed to write sheet");
    }
}

fn config_for(tmp: &TempDir) -> SyncConfig {
    SyncConfig {
        input_dir: Some(tmp.path().join("sheets")),
        output_dir: tmp.path().join("out"),
        ..SyncConfig::default()
    }
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("output file missing");
    serde_json::from_str(&text).expect("output is not JSON")
}

fn setup(sheets: &[(&str, &str)]) -> (TempDir, SyncConfig) {
    let tmp = TempDir::new().expect("tempdir");
    let sheets_dir = tmp.path().join("sheets");
    fs::create_dir_all(&sheets_dir).unwrap();
    write_sheets(&sheets_dir, sheets);
    let config = config_for(&tmp);
    (tmp, config)
}

#[tokio::test]
async fn single_row_track_produces_all_three_files() {
    let (tmp, config) = setup(&[("1228727534", TRACKLIST), ("200", JANE_SHEET)]);
    let source = config.sheet_source().expect("directory source");

    let outcome = pipeline::run(&config, source.as_ref()).await.expect("run failed");
    let SyncOutcome::Written {
        paths,
        tracks,
        sessions,
        speakers,
    } = outcome
    else {
        panic!("expected output to be written");
    };
    assert_eq!((tracks, sessions, speakers), (2, 1, 1));
    assert!(paths.sessions.starts_with(tmp.path().join("out")));
    assert!(!tmp.path().join("out").join("sessions.json.tmp").exists());

    let sessions = read_json(&paths.sessions);
    let session = &sessions["sessions"][0];
    assert_eq!(session["session_id"], "5");
    assert_eq!(session["title"], "Folding rows");
    assert_eq!(session["start_time"], "2016-08-01T08:00:00+00:00");
    assert_eq!(session["end_time"], "2016-08-01T08:30:00+00:00");
    assert_eq!(session["location"], "Hall 1");
    assert_eq!(session["description"], "");
    assert!(session["sign_up"].is_null());
    assert!(session["video"].is_null());
    assert!(session["slides"].is_null());
    assert_eq!(session["track"]["id"], 2);
    assert_eq!(session["track"]["name"], "Main Stage");
    assert_eq!(session["speakers"][0]["name"], "Jane Doe");
    assert_eq!(session["speakers"][0]["id"], 1);

    let speakers = read_json(&paths.speakers);
    assert_eq!(speakers["speakers"].as_array().map(Vec::len), Some(1));
    assert_eq!(speakers["speakers"][0]["id"], 1);
    assert_eq!(speakers["speakers"][0]["name"], "Jane Doe");

    let tracks = read_json(&paths.tracks);
    assert_eq!(tracks["tracks"][1]["name"], "Not yet scheduled");
    assert_eq!(tracks["tracks"][1]["gid"], "");
}

#[tokio::test]
async fn duplicate_session_ids_write_nothing() {
    let second = "SessionID\tTopic of your contribution\n5\tAgain\n";
    let tracklist = "Track\tHeader Line\tKey Color\tRoom\tGID\n\
A\t1\t#fff\tHall\t200\n\
B\t1\t#000\tAnnex\t201\n";
    let (tmp, config) = setup(&[
        ("1228727534", tracklist),
        ("200", JANE_SHEET),
        ("201", second),
    ]);
    let source = config.sheet_source().unwrap();

    let outcome = pipeline::run(&config, source.as_ref()).await.expect("run failed");
    match outcome {
        SyncOutcome::DuplicateSessionIds(duplicates) => {
            assert_eq!(duplicates.len(), 1);
            assert_eq!(duplicates[0].session_id, "5");
            assert_eq!(duplicates[0].count, 2);
        }
        other => panic!("expected duplicate ids, got {other:?}"),
    }
    assert!(!tmp.path().join("out").exists());
}

#[tokio::test]
async fn missing_track_sheet_aborts_the_run() {
    let (tmp, config) = setup(&[("1228727534", TRACKLIST)]);
    let source = config.sheet_source().unwrap();

    let err = pipeline::run(&config, source.as_ref())
        .await
        .expect_err("missing sheet should fail");
    match err {
        SyncError::Io { path, .. } => assert!(path.ends_with("200.tsv")),
        other => panic!("expected io error, got {other:?}"),
    }
    assert!(!tmp.path().join("out").exists());
}

#[tokio::test]
async fn failed_write_leaves_no_partial_output() {
    let (tmp, config) = setup(&[("1228727534", TRACKLIST), ("200", JANE_SHEET)]);
    let source = config.sheet_source().unwrap();
    let collected = collect_schedule(&config, source.as_ref()).await.unwrap();

    let out = tmp.path().join("out");
    fs::create_dir_all(out.join("tracks.json.tmp")).unwrap();

    let err = write_outputs(&out, &collected.schedule, &collected.tracks)
        .await
        .expect_err("blocked tracks file should fail");
    assert!(matches!(err, SyncError::Io { .. }));

    let mut left: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    left.sort();
    assert_eq!(left, vec!["tracks.json.tmp".to_string()]);
}

#[tokio::test]
async fn max_tracks_limits_fetched_tracks() {
    let tracklist = "Track\tHeader Line\tKey Color\tRoom\tGID\n\
A\t1\t#fff\tHall\t200\n\
B\t1\t#000\tAnnex\t404\n";
    let (_tmp, mut config) = setup(&[("1228727534", tracklist), ("200", JANE_SHEET)]);
    config.max_tracks = Some(1);
    let source = DirectorySheetSource::new(config.input_dir.clone().unwrap());

    let collected = collect_schedule(&config, &source).await.expect("collect failed");
    assert_eq!(collected.tracks.len(), 2);
    assert_eq!(collected.summaries.len(), 1);
    assert_eq!(collected.schedule.sessions.len(), 1);
}

#[test]
fn http_source_requires_sheet_id() {
    let config = SyncConfig::default();
    match config.sheet_source() {
        Err(SyncError::Config(message)) => assert!(message.contains("SHEET_ID")),
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("expected a configuration error"),
    }
}

#[test]
fn export_url_points_at_tsv_export() {
    let source = HttpSheetSource::new("abc123");
    assert_eq!(
        source.export_url("42"),
        "https://docs.google.com/spreadsheets/d/abc123/export?format=tsv&gid=42"
    );
}

#[test]
fn rendered_documents_keep_field_order() {
    let tracks = sample_tracks();
    let text = render_document("tracks", &tracks).unwrap();
    assert!(text.starts_with("{\n  \"tracks\": [\n    {\n      \"id\": 3,"));

    let order = [
        "\"id\"",
        "\"name\"",
        "\"header_line\"",
        "\"key_color\"",
        "\"location\"",
        "\"gid\"",
        "\"order\"",
    ];
    let positions: Vec<usize> = order.iter().map(|key| text.find(key).unwrap()).collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

fn sample_tracks() -> Vec<confsheet_parser::Track> {
    vec![confsheet_parser::Track {
        id: 3,
        name: "Main".to_string(),
        header_line: 2,
        key_color: "#fff".to_string(),
        location: "Hall".to_string(),
        gid: "7".to_string(),
        order: 3,
    }]
}
