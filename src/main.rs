//! Mention Bot — Binary Entrypoint
//! Loads configuration, wires the fetcher/poller, and runs the poll loop.
//!
//! This binary always drives the dry-run posting collaborator: matched
//! items are announced via log output rather than posted. Embedders with a
//! live platform client plug it in through `PlatformClient`/`ItemHandler`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use mentionbot::platform::{DryRunPlatform, PlatformClient};
use mentionbot::poller::{self, ItemHandler, Poller};
use mentionbot::search::pushshift::PushshiftBackend;
use mentionbot::search::types::SearchItem;
use mentionbot::search::KeywordFetcher;
use mentionbot::BotConfig;

/// Replies to each matched item through the platform collaborator.
struct ReplyHandler {
    platform: Arc<dyn PlatformClient>,
    account_name: String,
}

#[async_trait::async_trait]
impl ItemHandler for ReplyHandler {
    async fn handle(&self, keyword: &str, item: &SearchItem) -> Result<()> {
        let author = item.author.as_deref().unwrap_or("[unknown]");
        tracing::info!(keyword, item = %item.id, author, "new mention");

        let body = format!(
            "Hi, I'm /u/{}. I noticed you mentioned \"{}\".",
            self.account_name, keyword
        );
        let reply_id = self.platform.reply_comment(&item.id, &body).await?;
        tracing::debug!(reply_id, "posted reply");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cfg = BotConfig::load_default().context("loading bot config")?;
    if cfg.poll.keywords.is_empty() {
        anyhow::bail!("no keywords configured; nothing to poll");
    }
    if !cfg.bot.dry_run {
        tracing::warn!("no live platform client is wired into this binary; forcing dry run");
    }
    tracing::info!(
        account = %cfg.bot.account_name,
        keywords = ?cfg.poll.keywords,
        interval_secs = cfg.poll.interval_secs,
        "starting mention bot (dry run)"
    );

    // Prometheus scrape endpoint on the default listener; optional.
    if std::env::var("MENTIONBOT_METRICS").is_ok_and(|v| v == "1") {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .install()
            .context("installing prometheus exporter")?;
    }

    let backend = PushshiftBackend::new(
        &cfg.search.base_url,
        &cfg.user_agent(),
        cfg.request_timeout(),
    )?;
    let fetcher = KeywordFetcher::new(
        Box::new(backend),
        cfg.search.page_limit,
        cfg.search.slow_request_secs,
    );
    let handler = ReplyHandler {
        platform: Arc::new(DryRunPlatform),
        account_name: cfg.bot.account_name.clone(),
    };
    let poller = Poller::new(
        fetcher,
        Box::new(handler),
        cfg.poll.history_capacity,
        cfg.poll.keywords.clone(),
    );

    let handle = poller::spawn(poller, cfg.poll_interval());
    handle.await.context("poll loop exited")?;
    Ok(())
}
