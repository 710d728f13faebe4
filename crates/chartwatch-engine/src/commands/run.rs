//! Chart capture pipeline.
//!
//! ## Steps (in order):
//! 1. Fetch page HTML from the source
//! 2. Extract ranked entries (first confident strategy wins)
//! 3. Substitute the baseline dataset on fetch failure or empty extraction
//!    (only while fallback is enabled)
//! 4. Load the latest snapshot strictly before the run date
//! 5. Compute the delta
//! 6. Persist the snapshot under the run date (replacing a same-date file)
//!
//! Rendering the summary is left to the caller.

use chartwatch_core::baseline::baseline_entries;
use chartwatch_core::diff::compute_delta;
use chartwatch_core::errors::{ChartError, Result};
use chartwatch_core::extract::Extractor;
use chartwatch_core::model::{date_key, Entry, ProvenanceNote, Snapshot};
use chartwatch_core::{log_op_end, log_op_error, log_op_start};
use chartwatch_core_types::RunId;
use chartwatch_store::SnapshotStore;
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::fetch::ChartSource;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Correlation id carried by every log line of the run
    pub run_id: RunId,
    /// The snapshot as persisted
    pub snapshot: Snapshot,
    /// File the snapshot was written to
    pub path: PathBuf,
    /// Date of the snapshot compared against, if any
    pub previous_date: Option<NaiveDate>,
    /// Extraction strategy that produced the entries; `None` for baseline data
    pub strategy: Option<&'static str>,
    /// False when the entries came from a strategy below the confidence
    /// threshold
    pub confident: bool,
}

/// Capture today's chart (or `date`'s), diff it and persist it.
///
/// # Errors
///
/// - Fetch errors when `fallback_on_fetch_error` is off
/// - `ExtractionFailed` when no entries are extracted and fallback is off
/// - `Serialization` when the previous snapshot cannot be decoded
/// - `Io` when the snapshot cannot be written
pub fn run_pipeline(
    config: &PipelineConfig,
    source: &dyn ChartSource,
    clock: &dyn Clock,
    date: Option<NaiveDate>,
) -> Result<RunOutcome> {
    let run_id = RunId::new();
    let date = date.unwrap_or_else(|| clock.today());
    let span = tracing::info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    log_op_start!(
        "run_pipeline",
        date = %date_key(date),
        source = %source.describe()
    );
    let start = std::time::Instant::now();

    let result = run_pipeline_impl(config, source, clock, date, run_id).map_err(|e| {
        log_op_error!(
            "run_pipeline",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    let counts = result.snapshot.changes.counts();
    log_op_end!(
        "run_pipeline",
        duration_ms = start.elapsed().as_millis() as u64,
        entry_count = result.snapshot.songs.len(),
        new_count = counts.new_entries,
        moved_count = counts.moved,
        unchanged_count = counts.unchanged,
        previous_date = %result.previous_date.map(date_key).unwrap_or_default(),
        strategy = result.strategy.unwrap_or("baseline")
    );

    Ok(result)
}

fn run_pipeline_impl(
    config: &PipelineConfig,
    source: &dyn ChartSource,
    clock: &dyn Clock,
    date: NaiveDate,
    run_id: RunId,
) -> Result<RunOutcome> {
    config.validate()?;

    let capture = capture_entries(config, source)?;
    let (songs, note, strategy, confident) = match capture {
        Some((songs, strategy, confident)) => {
            (songs, ProvenanceNote::Live, Some(strategy), confident)
        }
        None => (baseline_entries(), ProvenanceNote::Baseline, None, true),
    };

    let store = SnapshotStore::new(&config.data_dir);
    let previous = store.latest_before(date)?;
    let changes = compute_delta(&songs, previous.as_ref().map(|p| p.songs.as_slice()));

    let snapshot = Snapshot {
        date,
        timestamp: clock.now(),
        songs,
        changes,
        note,
    };
    let path = store.save(&snapshot)?;

    Ok(RunOutcome {
        run_id,
        snapshot,
        path,
        previous_date: previous.map(|p| p.date),
        strategy,
        confident,
    })
}

/// Live entries with the strategy that produced them, or `None` when the
/// baseline dataset should be used instead.
fn capture_entries(
    config: &PipelineConfig,
    source: &dyn ChartSource,
) -> Result<Option<(Vec<Entry>, &'static str, bool)>> {
    let html = match source.fetch() {
        Ok(html) => html,
        Err(e) if config.fallback_on_fetch_error => {
            tracing::warn!(
                err_code = e.code(),
                error = %e,
                "chart fetch failed, using baseline dataset"
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let extractor = Extractor::new(config.limit, config.min_entries);
    let extraction = extractor.extract(&html);
    match extraction.strategy {
        Some(strategy) if !extraction.is_empty() => {
            if !extraction.confident {
                tracing::warn!(
                    strategy,
                    entry_count = extraction.entries.len(),
                    "low-confidence extraction kept"
                );
            }
            Ok(Some((extraction.entries, strategy, extraction.confident)))
        }
        _ if config.fallback_on_fetch_error => {
            tracing::warn!("no entries extracted, using baseline dataset");
            Ok(None)
        }
        _ => Err(ChartError::NothingExtracted {
            strategies: extractor.strategy_names(),
        }
        .into()),
    }
}
