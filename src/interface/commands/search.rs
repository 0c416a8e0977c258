//! # Search Command
//!
//! Handles `/search <text>`: matches comic titles from the archive and shows
//! them one page at a time. When more pages remain the room is left waiting
//! for a `yes`/`no`.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::state::{BotState, PendingState};
use crate::domain::traits::ChatProvider;
use crate::domain::types::CommandKind;
use crate::infrastructure::xkcd::XkcdClient;
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_search(
    client: &XkcdClient,
    state: &Arc<Mutex<BotState>>,
    chat: &impl ChatProvider,
    query: Option<&str>,
    page: u32,
    page_size: usize,
) -> Result<()> {
    let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
        state.lock().await.set_pending(
            &chat.room_id(),
            PendingState::AwaitingArgument {
                kind: CommandKind::Search,
                page: 1,
            },
        );
        return say(chat, messages::ASK_SEARCH).await;
    };

    let hits = match client.search(query).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::error!("Archive search for {:?} failed: {}", query, e);
            return say(chat, messages::GENERIC_ERROR).await;
        }
    };

    if hits.is_empty() {
        return say(chat, &messages::search_empty(query)).await;
    }

    let page_size = page_size.max(1);
    let start = (page.max(1) as usize - 1) * page_size;
    if start >= hits.len() {
        return say(chat, messages::NO_MORE_RESULTS).await;
    }
    let end = (start + page_size).min(hits.len());

    let mut lines = vec![messages::search_header(query, start + 1, end, hits.len())];
    lines.extend(hits[start..end].iter().map(|entry| {
        messages::search_entry(
            entry.index,
            &entry.title,
            &client.permalink(entry.index),
            &entry.date,
        )
    }));

    if end < hits.len() {
        lines.push(messages::SEARCH_MORE.to_string());
        state.lock().await.set_pending(
            &chat.room_id(),
            PendingState::AwaitingConfirmation {
                kind: CommandKind::Search,
                page,
                argument: query.to_string(),
            },
        );
    }

    say(chat, &lines.join("\n")).await
}
