// tests/fetch_filtering.rs
//! Fetcher behavior against a stubbed search backend: watermark cutoff,
//! history dedup, order preservation, and non-fatal failure handling.

use mentionbot::search::types::{FetchError, FetchOutcome, SearchBackend, SearchItem};
use mentionbot::{HistoryQueue, KeywordFetcher};

enum Stub {
    Page(Vec<SearchItem>),
    Status(u16),
}

#[async_trait::async_trait]
impl SearchBackend for Stub {
    async fn recent(&self, _keyword: &str, _limit: u32) -> Result<Vec<SearchItem>, FetchError> {
        match self {
            Stub::Page(items) => Ok(items.clone()),
            Stub::Status(code) => Err(FetchError::Status(
                reqwest::StatusCode::from_u16(*code).unwrap(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn item(id: &str, created_utc: u64) -> SearchItem {
    SearchItem {
        id: id.into(),
        created_utc,
        author: None,
        body: None,
        permalink: None,
    }
}

fn fetcher(stub: Stub) -> KeywordFetcher {
    KeywordFetcher::new(Box::new(stub), 100, 5)
}

#[tokio::test]
async fn cutoff_dedup_and_order() {
    let t = 1_000_000u64;
    let page = vec![item("x", t + 10), item("y", t + 5), item("z", t - 5)];
    let mut history = HistoryQueue::with_capacity(100);
    history.add("y");

    let f = fetcher(Stub::Page(page));
    let items = f.fetch("foo", t, &history).await.into_items();

    // z excluded by cutoff, y excluded by dedup, x kept.
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "x");
}

#[tokio::test]
async fn results_stay_newest_first() {
    let page = vec![item("n3", 300), item("n2", 200), item("n1", 100)];
    let history = HistoryQueue::with_capacity(100);

    let f = fetcher(Stub::Page(page));
    let items = f.fetch("foo", 0, &history).await.into_items();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["n3", "n2", "n1"]);
}

#[tokio::test]
async fn nothing_older_than_watermark_is_returned() {
    let t = 500u64;
    let page = vec![item("a", t + 1), item("b", t), item("c", t - 1), item("d", t - 2)];
    let history = HistoryQueue::with_capacity(100);

    let f = fetcher(Stub::Page(page));
    let items = f.fetch("foo", t, &history).await.into_items();
    assert!(items.iter().all(|i| i.created_utc >= t));
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn fetch_never_mutates_the_history() {
    let page = vec![item("a", 100)];
    let history = HistoryQueue::with_capacity(100);

    let f = fetcher(Stub::Page(page));
    let _ = f.fetch("foo", 0, &history).await;
    assert!(history.is_empty());
}

#[tokio::test]
async fn non_200_is_a_failure_not_a_panic() {
    let history = HistoryQueue::with_capacity(100);
    let f = fetcher(Stub::Status(502));

    let outcome = f.fetch("foo", 0, &history).await;
    match &outcome {
        FetchOutcome::Failed(FetchError::Status(code)) => assert_eq!(code.as_u16(), 502),
        other => panic!("expected status failure, got {other:?}"),
    }
    assert!(outcome.into_items().is_empty());
}

#[tokio::test]
async fn empty_page_is_a_successful_empty_batch() {
    let history = HistoryQueue::with_capacity(100);
    let f = fetcher(Stub::Page(Vec::new()));

    let outcome = f.fetch("foo", 0, &history).await;
    assert!(!outcome.is_failed());
    assert!(outcome.into_items().is_empty());
}
