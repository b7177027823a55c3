// src/poller.rs
use anyhow::Result;
use metrics::{counter, gauge};
use tokio::task::JoinHandle;

use crate::history::HistoryQueue;
use crate::search::types::SearchItem;
use crate::search::KeywordFetcher;

/// What to do with a freshly matched item. The poll loop only records an
/// item as processed (history add + watermark advance) after the handler
/// returns `Ok`.
#[async_trait::async_trait]
pub trait ItemHandler: Send + Sync {
    async fn handle(&self, keyword: &str, item: &SearchItem) -> Result<()>;
}

/// Per-keyword fetch state. The watermark is owned here, never by the
/// fetcher.
#[derive(Debug)]
struct KeywordState {
    keyword: String,
    last_seen: u64,
}

/// Counters from one poll cycle across all keywords.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub fetched: usize,
    pub handled: usize,
    pub failed_fetches: usize,
    pub failed_handles: usize,
}

/// Sequential per-keyword poll loop. Owns the history queue exclusively,
/// so queue access needs no extra synchronization.
pub struct Poller {
    fetcher: KeywordFetcher,
    handler: Box<dyn ItemHandler>,
    history: HistoryQueue,
    keywords: Vec<KeywordState>,
}

impl Poller {
    pub fn new(
        fetcher: KeywordFetcher,
        handler: Box<dyn ItemHandler>,
        history_capacity: usize,
        keywords: Vec<String>,
    ) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|keyword| KeywordState {
                keyword,
                last_seen: 0,
            })
            .collect();
        Self {
            fetcher,
            handler,
            history: HistoryQueue::with_capacity(history_capacity),
            keywords,
        }
    }

    /// Run one fetch-and-handle pass over every keyword.
    ///
    /// Items are handled oldest-first so the watermark can advance
    /// monotonically; a handler failure stops the keyword's pass before the
    /// watermark moves past the failed item, leaving it for the next cycle.
    pub async fn run_cycle(&mut self) -> CycleStats {
        let mut stats = CycleStats::default();

        for state in &mut self.keywords {
            let outcome = self
                .fetcher
                .fetch(&state.keyword, state.last_seen, &self.history)
                .await;
            if outcome.is_failed() {
                stats.failed_fetches += 1;
                continue;
            }
            let items = outcome.into_items();
            stats.fetched += items.len();

            for item in items.iter().rev() {
                match self.handler.handle(&state.keyword, item).await {
                    Ok(()) => {
                        self.history.add(&item.id);
                        state.last_seen = state.last_seen.max(item.created_utc);
                        stats.handled += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            keyword = %state.keyword,
                            item = %item.id,
                            "handler failed; item left for next cycle"
                        );
                        stats.failed_handles += 1;
                        break;
                    }
                }
            }
        }

        gauge!("poll_history_len").set(self.history.len() as f64);
        stats
    }

    #[cfg(test)]
    fn watermark(&self, keyword: &str) -> Option<u64> {
        self.keywords
            .iter()
            .find(|s| s.keyword == keyword)
            .map(|s| s.last_seen)
    }
}

/// Spawn the poll loop on its own task, ticking at `interval`.
pub fn spawn(mut poller: Poller, interval: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let stats = poller.run_cycle().await;

            counter!("poll_runs_total").increment(1);
            tracing::info!(
                target: "poll",
                fetched = stats.fetched,
                handled = stats.handled,
                failed_fetches = stats.failed_fetches,
                failed_handles = stats.failed_handles,
                "poll tick"
            );
        }
    })
}
