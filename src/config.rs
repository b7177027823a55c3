// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PATH: &str = "MENTIONBOT_CONFIG";
const DEFAULT_PATH: &str = "config/bot.toml";

/// Bot configuration, loaded once at startup and passed explicitly to
/// whichever component needs it. There is no ambient global account state;
/// the account name travels inside this value (and into the User-Agent
/// header built from it).
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub bot: BotSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub poll: PollSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotSection {
    /// Account the bot posts as, e.g. "mention-bot".
    pub account_name: String,
    /// Maintainer contact included in the User-Agent.
    pub owner: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// When true, posting operations log their output instead of posting.
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Items requested per poll; a single page, older overflow is caught by
    /// the watermark on later cycles.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Requests slower than this are logged as warnings.
    #[serde(default = "default_slow_request_secs")]
    pub slow_request_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollSection {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_platform() -> String {
    "reddit".to_string()
}
fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
fn default_base_url() -> String {
    "https://api.pushshift.io/reddit/comment/search".to_string()
}
fn default_page_limit() -> u32 {
    100
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_slow_request_secs() -> u64 {
    5
}
fn default_interval_secs() -> u64 {
    60
}
fn default_history_capacity() -> usize {
    100
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_limit: default_page_limit(),
            request_timeout_secs: default_request_timeout_secs(),
            slow_request_secs: default_slow_request_secs(),
        }
    }
}

impl Default for PollSection {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            interval_secs: default_interval_secs(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl BotConfig {
    /// Load using env var + fallback:
    /// 1) $MENTIONBOT_CONFIG
    /// 2) config/bot.toml
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("MENTIONBOT_CONFIG points to non-existent path"));
        }
        Self::load_from(Path::new(DEFAULT_PATH))
    }

    /// Load and validate from an explicit TOML path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading bot config from {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(s: &str) -> Result<Self> {
        let mut cfg: BotConfig = toml::from_str(s).context("parsing bot config toml")?;
        cfg.validate()?;
        // Ignore blank keyword lines rather than polling for them.
        cfg.poll.keywords = cfg
            .poll
            .keywords
            .iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.bot.account_name.trim().is_empty() {
            bail!("bot.account_name must not be empty");
        }
        if self.poll.history_capacity == 0 {
            bail!("poll.history_capacity must be positive");
        }
        if self.search.page_limit == 0 {
            bail!("search.page_limit must be positive");
        }
        Ok(())
    }

    /// User-Agent for outbound requests, in the platform's conventional
    /// `<platform>:<name>:<version> (by /u/<owner>)` shape.
    pub fn user_agent(&self) -> String {
        format!(
            "{}:{}:{} (by /u/{})",
            self.bot.platform, self.bot.account_name, self.bot.version, self.bot.owner
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.search.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }
}
