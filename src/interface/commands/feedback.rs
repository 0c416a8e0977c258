//! # Feedback Command
//!
//! Handles `/feedback <text>` by relaying the text verbatim to the configured
//! feedback room.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::state::{BotState, PendingState};
use crate::domain::traits::{ChatDirectory, ChatProvider};
use crate::domain::types::CommandKind;
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_feedback(
    feedback_room: Option<&str>,
    directory: &dyn ChatDirectory,
    state: &Arc<Mutex<BotState>>,
    chat: &impl ChatProvider,
    text: Option<&str>,
    sender: &str,
) -> Result<()> {
    let Some(room_id) = feedback_room else {
        return say(chat, messages::NO_FEEDBACK_CHANNEL).await;
    };

    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        state.lock().await.set_pending(
            &chat.room_id(),
            PendingState::AwaitingArgument {
                kind: CommandKind::Feedback,
                page: 1,
            },
        );
        return say(chat, messages::ASK_FEEDBACK).await;
    };

    let Some(target) = directory.room(room_id) else {
        tracing::error!("Feedback room {} is not joined", room_id);
        return say(chat, messages::GENERIC_ERROR).await;
    };

    tracing::info!("Sending feedback from \"{}\" to \"{}\".", sender, room_id);
    if let Err(e) = target
        .send_message(&messages::feedback_relay(sender, text))
        .await
    {
        tracing::error!("Failed to relay feedback to {}: {}", room_id, e);
        return say(chat, messages::GENERIC_ERROR).await;
    }

    say(chat, messages::FEEDBACK_THANKS).await
}
