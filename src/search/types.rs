// src/search/types.rs
use thiserror::Error;

/// One comment-like record from the external search index.
///
/// Only `id` and `created_utc` are required by the core; the remaining
/// fields are passed through so handlers can act on a match without a
/// second lookup.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    /// Creation time, unix seconds.
    pub created_utc: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// Why a poll cycle produced no usable response.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search endpoint returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Result of one incremental fetch.
///
/// Callers that care can tell "nothing new" (`Items(vec![])`) apart from
/// "the endpoint is down" (`Failed`); callers that don't can use
/// [`FetchOutcome::into_items`] and get the lossy empty-on-failure
/// behavior.
#[derive(Debug)]
pub enum FetchOutcome {
    Items(Vec<SearchItem>),
    Failed(FetchError),
}

impl FetchOutcome {
    /// Collapse a failure into an empty batch. One bad poll cycle must not
    /// halt the bot; the failure has already been logged by the fetcher.
    pub fn into_items(self) -> Vec<SearchItem> {
        match self {
            FetchOutcome::Items(items) => items,
            FetchOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Seam over the external search index, one page per call.
///
/// Implementations request `limit` items matching `keyword`, sorted
/// newest-first by creation time.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn recent(&self, keyword: &str, limit: u32) -> Result<Vec<SearchItem>, FetchError>;

    fn name(&self) -> &'static str;
}
