// src/search/pushshift.rs
use serde::Deserialize;
use std::time::Duration;

use crate::search::types::{FetchError, SearchBackend, SearchItem};

/// Response envelope of the comment-search endpoint.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    data: Vec<SearchItem>,
}

/// HTTP backend for the Pushshift-style comment search API.
///
/// Issues exactly one GET per call: `?q=<keyword>&limit=<n>&sort=desc`,
/// identifying itself with the configured User-Agent. A hard client
/// timeout bounds worst-case blocking per poll cycle.
pub struct PushshiftBackend {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl PushshiftBackend {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl SearchBackend for PushshiftBackend {
    async fn recent(&self, keyword: &str, limit: u32) -> Result<Vec<SearchItem>, FetchError> {
        let limit = limit.to_string();
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("q", keyword), ("limit", limit.as_str()), ("sort", "desc")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let envelope: SearchEnvelope = resp.json().await?;
        Ok(envelope.data)
    }

    fn name(&self) -> &'static str {
        "pushshift"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_minimal_and_full_records() {
        let body = r#"{
            "data": [
                {"id": "t1_abc", "created_utc": 1700000000,
                 "author": "someone", "body": "remindme! 2 days",
                 "score": 5, "subreddit": "test"},
                {"id": "t1_def", "created_utc": 1699999990}
            ]
        }"#;
        let env: SearchEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.data.len(), 2);
        assert_eq!(env.data[0].id, "t1_abc");
        assert_eq!(env.data[0].author.as_deref(), Some("someone"));
        assert_eq!(env.data[1].created_utc, 1_699_999_990);
        assert!(env.data[1].body.is_none());
    }
}
