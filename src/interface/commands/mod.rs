//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., /comic, /search, /feedback).
//! These handlers are invoked by the Router.

use crate::domain::traits::ChatProvider;
use anyhow::Result;

pub mod comic;
pub mod feedback;
pub mod help;
pub mod misc;
pub mod search;

/// Sends a markdown message, discarding the event ID.
pub(crate) async fn say(chat: &impl ChatProvider, content: &str) -> Result<()> {
    chat.send_message(content)
        .await
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e))
}
