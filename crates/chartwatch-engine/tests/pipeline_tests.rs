#![allow(clippy::unwrap_used, clippy::expect_used)]

use chartwatch_core::baseline::baseline_entries;
use chartwatch_core::errors::{ExError, ExErrorKind, Result};
use chartwatch_core::logging_facility::test_capture::init_test_capture;
use chartwatch_core::model::ProvenanceNote;
use chartwatch_core_types::schema::{
    EVENT_END, EVENT_START, FIELD_ENTRY_COUNT, FIELD_PREVIOUS_DATE,
};
use chartwatch_engine::{
    compare_snapshots, run_pipeline, ChartSource, FixedClock, PipelineConfig,
};
use chartwatch_store::SnapshotStore;
use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

enum FakeSource {
    Page(String),
    Failing,
}

impl ChartSource for FakeSource {
    fn describe(&self) -> String {
        "fake://chart".to_string()
    }

    fn fetch(&self) -> Result<String> {
        match self {
            FakeSource::Page(html) => Ok(html.clone()),
            FakeSource::Failing => Err(ExError::new(ExErrorKind::ExternalService)
                .with_op("fetch_chart")
                .with_message("HTTP 503")),
        }
    }
}

fn chart_page(rows: &[(&str, &str)]) -> String {
    let mut page = String::from("<html><body><ul class=\"pc_temp_songlist\">");
    for (i, (title, singer)) in rows.iter().enumerate() {
        page.push_str(&format!(
            "<li><div class=\"pc_temp_songname\"><a href=\"/mixsong/{i}.html\">{title}</a><span>-{singer}</span></div></li>"
        ));
    }
    page.push_str("</ul></body></html>");
    page
}

const DAY_ONE: &[(&str, &str)] = &[
    ("A", "X"),
    ("B", "Y"),
    ("C", "Z"),
    ("D", "W"),
    ("E", "V"),
];

const DAY_TWO: &[(&str, &str)] = &[
    ("B", "Y"),
    ("A", "X"),
    ("C", "Z"),
    ("D", "W"),
    ("F", "U"),
];

fn config(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        data_dir: dir.path().join("charts"),
        ..PipelineConfig::default()
    }
}

fn clock(day: u32) -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 10, day, 8, 0, 0).unwrap())
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_first_run_has_no_comparison() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::Page(chart_page(DAY_ONE));

    let outcome = run_pipeline(&config(&dir), &source, &clock(16), None).unwrap();

    assert_eq!(outcome.snapshot.date, date(16));
    assert_eq!(outcome.snapshot.songs.len(), 5);
    assert_eq!(outcome.snapshot.songs[0].singer, "X");
    assert_eq!(outcome.snapshot.note, ProvenanceNote::Live);
    assert_eq!(outcome.strategy, Some("song_name_blocks"));
    assert!(outcome.previous_date.is_none());
    assert_eq!(outcome.snapshot.changes.counts().total(), 0);
    assert!(outcome.path.ends_with("charts/2026-10-16.json"));
}

#[test]
fn test_second_day_diffs_against_first() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    run_pipeline(&config, &FakeSource::Page(chart_page(DAY_ONE)), &clock(16), None).unwrap();

    let outcome =
        run_pipeline(&config, &FakeSource::Page(chart_page(DAY_TWO)), &clock(17), None).unwrap();

    let changes = &outcome.snapshot.changes;
    assert_eq!(outcome.previous_date, Some(date(16)));
    assert_eq!(changes.new_entries.len(), 1);
    assert_eq!(changes.new_entries[0].title, "F");
    assert_eq!(changes.moved.len(), 2);
    assert_eq!(changes.moved[0].entry.title, "B");
    assert_eq!(changes.moved[0].change, 1);
    assert_eq!(changes.unchanged.len(), 2);
}

#[test]
fn test_same_day_rerun_replaces_snapshot_and_keeps_basis() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    run_pipeline(&config, &FakeSource::Page(chart_page(DAY_ONE)), &clock(16), None).unwrap();
    run_pipeline(&config, &FakeSource::Page(chart_page(DAY_ONE)), &clock(17), None).unwrap();

    let rerun =
        run_pipeline(&config, &FakeSource::Page(chart_page(DAY_TWO)), &clock(17), None).unwrap();

    assert_eq!(rerun.previous_date, Some(date(16)));
    let store = SnapshotStore::new(&config.data_dir);
    assert_eq!(
        store.list_dates().unwrap(),
        vec!["2026-10-16".to_string(), "2026-10-17".to_string()]
    );
    assert_eq!(store.load(date(17)).unwrap().songs[4].title, "F");
}

#[test]
fn test_fetch_failure_substitutes_baseline() {
    let dir = TempDir::new().unwrap();

    let outcome = run_pipeline(&config(&dir), &FakeSource::Failing, &clock(16), None).unwrap();

    assert_eq!(outcome.snapshot.note, ProvenanceNote::Baseline);
    assert_eq!(outcome.snapshot.songs, baseline_entries());
    assert_eq!(outcome.strategy, None);
}

#[test]
fn test_fetch_failure_propagates_without_fallback() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        fallback_on_fetch_error: false,
        ..config(&dir)
    };

    let err = run_pipeline(&config, &FakeSource::Failing, &clock(16), None).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert!(SnapshotStore::new(&config.data_dir).list_dates().unwrap().is_empty());
}

#[test]
fn test_empty_page_substitutes_baseline() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::Page("<html><body></body></html>".to_string());

    let outcome = run_pipeline(&config(&dir), &source, &clock(16), None).unwrap();

    assert_eq!(outcome.snapshot.note, ProvenanceNote::Baseline);
    assert_eq!(outcome.snapshot.songs.len(), 20);
}

#[test]
fn test_empty_page_fails_without_fallback() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        fallback_on_fetch_error: false,
        ..config(&dir)
    };
    let source = FakeSource::Page("<html><body></body></html>".to_string());

    let err = run_pipeline(&config, &source, &clock(16), None).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ExtractionFailed);
    assert!(err.message().contains("data_index_rows"));
    assert!(SnapshotStore::new(&config.data_dir).list_dates().unwrap().is_empty());
}

#[test]
fn test_explicit_date_overrides_clock() {
    let dir = TempDir::new().unwrap();
    let source = FakeSource::Page(chart_page(DAY_ONE));

    let outcome = run_pipeline(&config(&dir), &source, &clock(16), Some(date(1))).unwrap();

    assert_eq!(outcome.snapshot.date, date(1));
    assert_eq!(outcome.snapshot.timestamp, clock(16).0);
}

#[test]
fn test_run_logs_operation_boundaries() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let source = FakeSource::Page(chart_page(DAY_ONE));

    let outcome = run_pipeline(&config(&dir), &source, &clock(16), None).unwrap();

    let ends: Vec<_> = capture
        .events_for_op("run_pipeline")
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();
    assert!(!ends.is_empty());
    assert!(ends.iter().any(|e| {
        e.fields.get(FIELD_ENTRY_COUNT) == Some(&"5".to_string())
            && e.fields.get(FIELD_PREVIOUS_DATE) == Some(&String::new())
    }));
    capture.assert_event_exists("run_pipeline", EVENT_START);
    assert!(!outcome.run_id.as_str().is_empty());
}

#[test]
fn test_compare_recomputes_delta_between_stored_dates() {
    let dir = TempDir::new().unwrap();
    let config = config(&dir);
    run_pipeline(&config, &FakeSource::Page(chart_page(DAY_ONE)), &clock(15), None).unwrap();
    run_pipeline(&config, &FakeSource::Page(chart_page(DAY_ONE)), &clock(16), None).unwrap();
    run_pipeline(&config, &FakeSource::Page(chart_page(DAY_TWO)), &clock(17), None).unwrap();
    let store = SnapshotStore::new(&config.data_dir);

    let comparison = compare_snapshots(&store, date(15), date(17)).unwrap();

    assert_eq!(comparison.snapshot.changes.moved.len(), 2);
    assert_eq!(comparison.snapshot.changes.new_entries.len(), 1);
    let err = compare_snapshots(&store, date(17), date(15)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    let err = compare_snapshots(&store, date(1), date(17)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}
