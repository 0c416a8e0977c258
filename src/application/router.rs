//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! Owns the per-room pending state: when a handler asked a question, the next
//! message in that room is fed back into it instead of being parsed as a new command.

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::application::parsing;
use crate::application::state::{BotState, PendingState};
use crate::domain::config::AppConfig;
use crate::domain::traits::{ChatDirectory, ChatProvider};
use crate::domain::types::{CommandKind, IncomingMessage};
use crate::infrastructure::xkcd::XkcdClient;
use crate::interface::commands::{self, say};
use crate::strings::messages;

pub struct CommandRouter {
    comics: Arc<XkcdClient>,
    directory: Arc<dyn ChatDirectory>,
    state: Arc<Mutex<BotState>>,
    feedback_room: Option<String>,
    page_size: usize,
    started: Instant,
}

impl CommandRouter {
    pub fn new(
        config: &AppConfig,
        comics: Arc<XkcdClient>,
        directory: Arc<dyn ChatDirectory>,
        state: Arc<Mutex<BotState>>,
    ) -> Self {
        Self {
            comics,
            directory,
            state,
            feedback_room: config.feedback.room.clone(),
            page_size: config.comics.search_page_size,
            started: Instant::now(),
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &IncomingMessage) -> Result<()>
    where
        C: ChatProvider,
    {
        let room_id = chat.room_id();
        let parsed = parsing::parse(&message.body);
        // Taken before handling so a handler can set a fresh one.
        let pending = self.state.lock().await.take_pending(&room_id);

        tracing::info!(
            "Router dispatching kind={:?} keyword='{}' sender='{}' pending={:?}",
            parsed.kind,
            parsed.raw_keyword,
            message.sender,
            pending
        );

        match pending {
            Some(PendingState::AwaitingArgument { kind, page }) => {
                self.acknowledge(chat, message).await;
                return self
                    .answer(chat, kind, Some(message.body.as_str()), page, &message.sender)
                    .await;
            }
            Some(PendingState::AwaitingConfirmation {
                kind,
                page,
                argument,
            }) => match parsed.kind {
                CommandKind::AnswerYes => {
                    return self
                        .answer(chat, kind, Some(argument.as_str()), page + 1, &message.sender)
                        .await;
                }
                CommandKind::AnswerNo => return say(chat, messages::DECLINED).await,
                _ => tracing::debug!("Confirmation in {} lapsed", room_id),
            },
            None => {}
        }

        if parsed.kind.is_actionable() {
            self.acknowledge(chat, message).await;
        }

        match parsed.kind {
            CommandKind::UnknownCommand => {
                commands::misc::handle_unknown(chat, &parsed.raw_keyword).await
            }
            CommandKind::NoCommand | CommandKind::AnswerYes | CommandKind::AnswerNo => Ok(()),
            kind => {
                self.answer(chat, kind, parsed.argument.as_deref(), 1, &message.sender)
                    .await
            }
        }
    }

    /// Answers an invite or connection request with the help text.
    pub async fn greet<C>(&self, chat: &C) -> Result<()>
    where
        C: ChatProvider,
    {
        commands::help::handle_help(chat).await
    }

    async fn answer<C>(
        &self,
        chat: &C,
        kind: CommandKind,
        argument: Option<&str>,
        page: u32,
        sender: &str,
    ) -> Result<()>
    where
        C: ChatProvider,
    {
        match kind {
            CommandKind::Help => commands::help::handle_help(chat).await,
            CommandKind::Uptime => commands::misc::handle_uptime(chat, self.started).await,
            CommandKind::Latest => commands::comic::handle_latest(&self.comics, chat, sender).await,
            CommandKind::Random => commands::comic::handle_random(&self.comics, chat, sender).await,
            CommandKind::Comic => {
                commands::comic::handle_comic(&self.comics, &self.state, chat, argument, sender)
                    .await
            }
            CommandKind::Search => {
                commands::search::handle_search(
                    &self.comics,
                    &self.state,
                    chat,
                    argument,
                    page,
                    self.page_size,
                )
                .await
            }
            CommandKind::Feedback => {
                commands::feedback::handle_feedback(
                    self.feedback_room.as_deref(),
                    self.directory.as_ref(),
                    &self.state,
                    chat,
                    argument,
                    sender,
                )
                .await
            }
            CommandKind::UnknownCommand
            | CommandKind::NoCommand
            | CommandKind::AnswerYes
            | CommandKind::AnswerNo => {
                tracing::warn!("No handler for {:?}", kind);
                Ok(())
            }
        }
    }

    async fn acknowledge<C>(&self, chat: &C, message: &IncomingMessage)
    where
        C: ChatProvider,
    {
        if let Err(e) = chat.react(&message.event_id, messages::ACK_REACTION).await {
            tracing::warn!("Failed to react to {}: {}", message.event_id, e);
        }
    }
}
