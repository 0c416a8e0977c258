//! # Comic Commands
//!
//! Handles `/latest`, `/random` and `/comic [<number>|latest|random]`.
//! A comic is delivered as three messages, strictly in order: intro with
//! permanent link, the image, then the hover text.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::state::{BotState, PendingState};
use crate::domain::traits::ChatProvider;
use crate::domain::types::{CommandKind, ComicResult};
use crate::infrastructure::xkcd::{RetrievalError, XkcdClient};
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;

/// What a `/comic` argument asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComicRequest {
    Latest,
    Random,
    Index(u32),
}

impl ComicRequest {
    pub fn parse(argument: &str) -> Option<Self> {
        let argument = argument.trim();
        if argument.eq_ignore_ascii_case("latest") {
            return Some(Self::Latest);
        }
        if argument.eq_ignore_ascii_case("random") {
            return Some(Self::Random);
        }
        argument
            .parse::<u32>()
            .ok()
            .filter(|index| *index >= 1)
            .map(Self::Index)
    }
}

pub async fn handle_latest(
    client: &XkcdClient,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    deliver(client, chat, client.latest().await, sender).await
}

pub async fn handle_random(
    client: &XkcdClient,
    chat: &impl ChatProvider,
    sender: &str,
) -> Result<()> {
    deliver(client, chat, client.random().await, sender).await
}

pub async fn handle_comic(
    client: &XkcdClient,
    state: &Arc<Mutex<BotState>>,
    chat: &impl ChatProvider,
    argument: Option<&str>,
    sender: &str,
) -> Result<()> {
    let Some(argument) = argument.filter(|arg| !arg.trim().is_empty()) else {
        state.lock().await.set_pending(
            &chat.room_id(),
            PendingState::AwaitingArgument {
                kind: CommandKind::Comic,
                page: 1,
            },
        );
        return say(chat, messages::ASK_COMIC).await;
    };

    let fetched = match ComicRequest::parse(argument) {
        Some(ComicRequest::Latest) => client.latest().await,
        Some(ComicRequest::Random) => client.random().await,
        Some(ComicRequest::Index(index)) => client.comic(index).await,
        None => return say(chat, messages::INVALID_NUMBER).await,
    };
    deliver(client, chat, fetched, sender).await
}

async fn deliver(
    client: &XkcdClient,
    chat: &impl ChatProvider,
    fetched: Result<ComicResult, RetrievalError>,
    sender: &str,
) -> Result<()> {
    let comic = match fetched {
        Ok(comic) => comic,
        Err(e) => {
            tracing::error!("Failed to retrieve comic for \"{}\": {}", sender, e);
            return say(chat, messages::GENERIC_ERROR).await;
        }
    };

    tracing::info!("Sending comic #{} to \"{}\".", comic.index, sender);

    say(
        chat,
        &messages::comic_intro(comic.index, &client.permalink(comic.index), &comic.title),
    )
    .await?;

    let name = if comic.image.extension.is_empty() {
        format!("xkcd-{}", comic.index)
    } else {
        format!("xkcd-{}.{}", comic.index, comic.image.extension)
    };
    chat.send_image(&comic.image, &name)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    if !comic.comment.is_empty() {
        say(chat, &messages::comic_caption(&comic.comment)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comic_request_parse() {
        assert_eq!(ComicRequest::parse("42"), Some(ComicRequest::Index(42)));
        assert_eq!(ComicRequest::parse(" 42 "), Some(ComicRequest::Index(42)));
        assert_eq!(ComicRequest::parse("LATEST"), Some(ComicRequest::Latest));
        assert_eq!(ComicRequest::parse("random"), Some(ComicRequest::Random));
        assert_eq!(ComicRequest::parse("0"), None);
        assert_eq!(ComicRequest::parse("-3"), None);
        assert_eq!(ComicRequest::parse("forty-two"), None);
        assert_eq!(ComicRequest::parse("4.2"), None);
    }
}
