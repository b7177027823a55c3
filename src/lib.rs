// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod history;
pub mod platform;
pub mod poller;
pub mod search;

// ---- Re-exports for stable public API ----
pub use crate::config::BotConfig;
pub use crate::history::HistoryQueue;
pub use crate::platform::{DryRunPlatform, PlatformClient, PLACEHOLDER_ID};
pub use crate::poller::{ItemHandler, Poller};
pub use crate::search::types::{FetchError, FetchOutcome, SearchBackend, SearchItem};
pub use crate::search::KeywordFetcher;
