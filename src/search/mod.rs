// src/search/mod.rs
pub mod pushshift;
pub mod types;

use crate::history::HistoryQueue;
use crate::search::types::{FetchOutcome, SearchBackend, SearchItem};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::time::Instant;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("search_requests_total", "Search index requests issued.");
        describe_counter!(
            "search_request_errors_total",
            "Search requests that failed (transport, parse, or non-200)."
        );
        describe_counter!("search_items_total", "Items received from the search index.");
        describe_counter!(
            "search_kept_total",
            "Items kept after watermark cutoff and dedup."
        );
        describe_counter!(
            "search_dedup_total",
            "Items dropped because they were already in the history queue."
        );
        describe_histogram!("search_request_ms", "Search request time in milliseconds.");
    });
}

/// Render a unix-seconds watermark for logs.
fn watermark_string(last_seen: u64) -> String {
    chrono::DateTime::from_timestamp(last_seen as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| last_seen.to_string())
}

/// Walk a newest-first page, stop at the watermark, drop already-seen ids.
///
/// The cutoff is a short-circuit, not a filter: the first item strictly
/// older than `last_seen` ends the scan, and nothing past it is inspected.
/// Items at exactly the watermark are still considered. Returns the kept
/// items (order preserved) and the number dropped by dedup.
pub fn cutoff_and_dedup(
    items: Vec<SearchItem>,
    last_seen: u64,
    history: &HistoryQueue,
) -> (Vec<SearchItem>, usize) {
    let mut kept = Vec::with_capacity(items.len());
    let mut deduped = 0usize;

    for item in items {
        if item.created_utc < last_seen {
            break;
        }
        if history.contains(&item.id) {
            deduped += 1;
            continue;
        }
        kept.push(item);
    }

    (kept, deduped)
}

/// Incremental keyword fetcher: one page per call, bounded by the
/// caller-owned watermark and filtered against the history queue.
///
/// Stateless between calls; it reads the queue but never mutates it. The
/// caller decides which returned items to act on and adds their ids back
/// into the queue afterward.
pub struct KeywordFetcher {
    backend: Box<dyn SearchBackend>,
    page_limit: u32,
    slow_request_secs: u64,
}

impl KeywordFetcher {
    pub fn new(backend: Box<dyn SearchBackend>, page_limit: u32, slow_request_secs: u64) -> Self {
        Self {
            backend,
            page_limit,
            slow_request_secs,
        }
    }

    /// Fetch items matching `keyword` newer than (or at) `last_seen` that
    /// are not already in `history`, newest-first.
    ///
    /// Operational failures never propagate as `Err`: they are logged as
    /// warnings and surfaced as [`FetchOutcome::Failed`] so the poll loop
    /// keeps running.
    pub async fn fetch(
        &self,
        keyword: &str,
        last_seen: u64,
        history: &HistoryQueue,
    ) -> FetchOutcome {
        ensure_metrics_described();
        tracing::debug!(
            keyword,
            watermark = %watermark_string(last_seen),
            "fetching items for keyword"
        );

        let t0 = Instant::now();
        let result = self.backend.recent(keyword, self.page_limit).await;
        let elapsed = t0.elapsed();
        histogram!("search_request_ms").record(elapsed.as_secs_f64() * 1_000.0);
        counter!("search_requests_total").increment(1);

        if elapsed.as_secs() > self.slow_request_secs {
            tracing::warn!(
                keyword,
                seconds = elapsed.as_secs(),
                "long request time for search term"
            );
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, keyword, backend = self.backend.name(), "could not fetch data for search term");
                counter!("search_request_errors_total").increment(1);
                return FetchOutcome::Failed(e);
            }
        };

        if items.is_empty() {
            tracing::warn!(keyword, "no items found for search term");
            return FetchOutcome::Items(Vec::new());
        }
        counter!("search_items_total").increment(items.len() as u64);

        let (kept, deduped) = cutoff_and_dedup(items, last_seen, history);
        counter!("search_kept_total").increment(kept.len() as u64);
        counter!("search_dedup_total").increment(deduped as u64);

        tracing::debug!(keyword, found = kept.len(), deduped, "found items");
        FetchOutcome::Items(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, created_utc: u64) -> SearchItem {
        SearchItem {
            id: id.into(),
            created_utc,
            author: None,
            body: None,
            permalink: None,
        }
    }

    #[test]
    fn cutoff_stops_at_watermark() {
        let history = HistoryQueue::with_capacity(10);
        let t = 1_000u64;
        let items = vec![item("x", t + 10), item("y", t + 5), item("z", t - 5)];
        let (kept, deduped) = cutoff_and_dedup(items, t, &history);
        assert_eq!(
            kept.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["x", "y"]
        );
        assert_eq!(deduped, 0);
    }

    #[test]
    fn dedup_drops_seen_ids_but_keeps_scanning() {
        let mut history = HistoryQueue::with_capacity(10);
        history.add("y");
        let t = 1_000u64;
        let items = vec![item("x", t + 10), item("y", t + 5), item("z", t - 5)];
        let (kept, deduped) = cutoff_and_dedup(items, t, &history);
        assert_eq!(
            kept.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["x"]
        );
        assert_eq!(deduped, 1);
    }

    #[test]
    fn items_at_exactly_the_watermark_are_kept() {
        let history = HistoryQueue::with_capacity(10);
        let t = 1_000u64;
        let items = vec![item("a", t + 1), item("b", t)];
        let (kept, _) = cutoff_and_dedup(items, t, &history);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn epoch_watermark_means_no_lower_bound() {
        let history = HistoryQueue::with_capacity(10);
        let items = vec![item("a", 50), item("b", 10), item("c", 1)];
        let (kept, _) = cutoff_and_dedup(items, 0, &history);
        assert_eq!(kept.len(), 3);
    }
}
