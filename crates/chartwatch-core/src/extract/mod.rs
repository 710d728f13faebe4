//! Chart extraction from page HTML.
//!
//! A single [`Extractor`] runs a prioritized list of [`ExtractionStrategy`]
//! implementations and keeps the first result that clears the confidence
//! threshold. Strategies are pure functions of the page text, so every
//! heuristic is testable offline against captured HTML.

pub mod html;
pub mod strategies;

pub use strategies::{DataIndexRows, ListItems, SongNameBlocks, TextLines};

use crate::model::entry::{Entry, DEFAULT_DURATION, UNKNOWN_SINGER};

/// Default number of entries kept from a chart.
pub const DEFAULT_LIMIT: usize = 20;

/// Default minimum entry count for a strategy result to be trusted.
pub const DEFAULT_MIN_ENTRIES: usize = 5;

/// An unranked song as read by a strategy. Missing fields get placeholders
/// when the draft is ranked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub singer: Option<String>,
    pub duration: Option<String>,
    pub url: Option<String>,
}

/// One extraction heuristic.
pub trait ExtractionStrategy: Send + Sync {
    /// Stable name used in logs and run outcomes
    fn name(&self) -> &'static str;

    /// Read songs from the page in chart order.
    fn extract(&self, page: &str) -> Vec<EntryDraft>;
}

/// Result of running the strategy list over one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Ranked entries, 1..=N with N capped at the limit
    pub entries: Vec<Entry>,
    /// Strategy that produced `entries`, if any produced something
    pub strategy: Option<&'static str>,
    /// False when no strategy reached the minimum entry count
    pub confident: bool,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs strategies in order until one yields at least `min_entries`.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    limit: usize,
    min_entries: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_MIN_ENTRIES)
    }
}

impl Extractor {
    /// Extractor with the built-in strategies: `data-index` rows, song-name
    /// blocks, list rows, then the text-line fallback.
    pub fn new(limit: usize, min_entries: usize) -> Self {
        Self::with_strategies(
            vec![
                Box::new(DataIndexRows),
                Box::new(SongNameBlocks),
                Box::new(ListItems),
                Box::new(TextLines),
            ],
            limit,
            min_entries,
        )
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn ExtractionStrategy>>,
        limit: usize,
        min_entries: usize,
    ) -> Self {
        Self {
            strategies,
            limit,
            min_entries,
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extract ranked entries from a page.
    ///
    /// When no strategy reaches `min_entries`, the longest non-empty result
    /// is returned with `confident == false` (earlier strategies win ties).
    /// When every strategy comes back empty the extraction is empty.
    pub fn extract(&self, page: &str) -> Extraction {
        let mut best: Option<(&'static str, Vec<Entry>)> = None;

        for strategy in &self.strategies {
            let entries = rank_drafts(strategy.extract(page), self.limit);
            tracing::debug!(
                strategy = strategy.name(),
                entry_count = entries.len(),
                "strategy finished"
            );

            if entries.len() >= self.min_entries && !entries.is_empty() {
                return Extraction {
                    entries,
                    strategy: Some(strategy.name()),
                    confident: true,
                };
            }

            let longer = best
                .as_ref()
                .map_or(true, |(_, kept)| entries.len() > kept.len());
            if !entries.is_empty() && longer {
                best = Some((strategy.name(), entries));
            }

            tracing::warn!(
                strategy = strategy.name(),
                min_entries = self.min_entries,
                "too few entries, trying next strategy"
            );
        }

        match best {
            Some((name, entries)) => Extraction {
                entries,
                strategy: Some(name),
                confident: false,
            },
            None => Extraction {
                entries: Vec::new(),
                strategy: None,
                confident: false,
            },
        }
    }
}

/// Assign contiguous 1-based ranks in draft order, dropping drafts without a
/// title and keeping at most `limit`.
pub fn rank_drafts(drafts: Vec<EntryDraft>, limit: usize) -> Vec<Entry> {
    drafts
        .into_iter()
        .filter(|draft| !draft.title.trim().is_empty())
        .take(limit)
        .zip(1u32..)
        .map(|(draft, rank)| {
            let singer = draft
                .singer
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_SINGER.to_string());
            let duration = draft
                .duration
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DURATION.to_string());
            let entry = Entry::new(rank, draft.title.trim(), singer).with_duration(duration);
            match draft.url {
                Some(url) => entry.with_url(url),
                None => entry,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, usize);

    impl ExtractionStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _page: &str) -> Vec<EntryDraft> {
            (0..self.1)
                .map(|i| EntryDraft {
                    title: format!("{} {}", self.0, i),
                    ..Default::default()
                })
                .collect()
        }
    }

    fn extractor(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Extractor {
        Extractor::with_strategies(strategies, 20, 5)
    }

    #[test]
    fn test_first_confident_strategy_wins() {
        let ex = extractor(vec![
            Box::new(Fixed("a", 2)),
            Box::new(Fixed("b", 6)),
            Box::new(Fixed("c", 9)),
        ]);
        let out = ex.extract("");
        assert_eq!(out.strategy, Some("b"));
        assert!(out.confident);
        assert_eq!(out.entries.len(), 6);
    }

    #[test]
    fn test_low_confidence_keeps_longest_result() {
        let ex = extractor(vec![
            Box::new(Fixed("a", 2)),
            Box::new(Fixed("b", 4)),
            Box::new(Fixed("c", 0)),
        ]);
        let out = ex.extract("");
        assert_eq!(out.strategy, Some("b"));
        assert!(!out.confident);
        assert_eq!(out.entries.len(), 4);
    }

    #[test]
    fn test_all_empty_yields_empty_extraction() {
        let ex = extractor(vec![Box::new(Fixed("a", 0))]);
        let out = ex.extract("");
        assert!(out.is_empty());
        assert_eq!(out.strategy, None);
    }

    #[test]
    fn test_built_in_strategy_order() {
        assert_eq!(
            Extractor::default().strategy_names(),
            vec!["data_index_rows", "song_name_blocks", "list_items", "text_lines"]
        );
    }

    #[test]
    fn test_rank_drafts_caps_and_fills_placeholders() {
        let mut drafts: Vec<EntryDraft> = (0..30)
            .map(|i| EntryDraft {
                title: format!("T{i}"),
                ..Default::default()
            })
            .collect();
        drafts.insert(0, EntryDraft::default());

        let entries = rank_drafts(drafts, 20);

        assert_eq!(entries.len(), 20);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].title, "T0");
        assert_eq!(entries[19].rank, 20);
        assert_eq!(entries[0].singer, UNKNOWN_SINGER);
        assert_eq!(entries[0].duration, DEFAULT_DURATION);
        assert_eq!(entries[0].url, None);
    }
}
