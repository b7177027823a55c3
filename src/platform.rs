// src/platform.rs
//! Posting/account collaborator seam.
//!
//! The fetch/dedup core never touches this module; it exists for the code
//! that acts on matched items. Live implementations wrap a real platform
//! API client; [`DryRunPlatform`] logs the intended output instead of
//! posting, for rehearsing a bot against live search data.

use anyhow::Result;

/// Sentinel comment id returned by dry-run replies. Resolving it via
/// [`PlatformClient::comment`] yields `None`.
pub const PLACEHOLDER_ID: &str = "xxxxxx";

/// An inbox message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub author: String,
    pub subject: String,
    pub body: String,
}

/// A comment fetched by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub body: String,
}

/// One-call-per-operation glue against the platform account.
#[async_trait::async_trait]
pub trait PlatformClient: Send + Sync {
    /// Fetch unread inbox messages.
    async fn unread_messages(&self) -> Result<Vec<Message>>;

    /// Reply to an inbox message.
    async fn reply_message(&self, message_id: &str, body: &str) -> Result<()>;

    /// Reply to a comment, returning the id of the posted reply.
    async fn reply_comment(&self, comment_id: &str, body: &str) -> Result<String>;

    /// Edit a previously posted comment.
    async fn edit_comment(&self, comment_id: &str, body: &str) -> Result<()>;

    /// Delete a comment. Failures are reported as `false`, not errors;
    /// a comment that cannot be deleted is not worth halting the bot for.
    async fn delete_comment(&self, comment_id: &str) -> bool;

    /// Send a direct message to a user.
    async fn send_message(&self, username: &str, subject: &str, body: &str) -> Result<()>;

    /// Fetch a comment by id. The dry-run placeholder id resolves to `None`.
    async fn comment(&self, comment_id: &str) -> Result<Option<Comment>>;
}

/// Collaborator that logs every intended side effect instead of performing
/// it. Reply-style operations hand back [`PLACEHOLDER_ID`].
#[derive(Debug, Default)]
pub struct DryRunPlatform;

#[async_trait::async_trait]
impl PlatformClient for DryRunPlatform {
    async fn unread_messages(&self) -> Result<Vec<Message>> {
        tracing::debug!("fetching unread messages (dry run)");
        Ok(Vec::new())
    }

    async fn reply_message(&self, message_id: &str, body: &str) -> Result<()> {
        tracing::debug!(message_id, "replying to message (dry run)");
        tracing::info!(body, "dry run reply");
        Ok(())
    }

    async fn reply_comment(&self, comment_id: &str, body: &str) -> Result<String> {
        tracing::debug!(comment_id, "replying to comment (dry run)");
        tracing::info!(body, "dry run reply");
        Ok(PLACEHOLDER_ID.to_string())
    }

    async fn edit_comment(&self, comment_id: &str, body: &str) -> Result<()> {
        tracing::debug!(comment_id, "editing comment (dry run)");
        tracing::info!(body, "dry run edit");
        Ok(())
    }

    async fn delete_comment(&self, comment_id: &str) -> bool {
        tracing::debug!(comment_id, "deleting comment (dry run)");
        true
    }

    async fn send_message(&self, username: &str, subject: &str, body: &str) -> Result<()> {
        tracing::debug!(username, subject, "sending message (dry run)");
        tracing::info!(body, "dry run message");
        Ok(())
    }

    async fn comment(&self, comment_id: &str) -> Result<Option<Comment>> {
        tracing::debug!(comment_id, "fetching comment by id");
        if comment_id == PLACEHOLDER_ID {
            return Ok(None);
        }
        // Nothing was ever posted in dry-run mode, so nothing resolves.
        Ok(None)
    }
}
