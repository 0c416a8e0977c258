//! # Miscellaneous Commands
//!
//! Handles `/uptime` and unknown commands.

use crate::domain::traits::ChatProvider;
use crate::interface::commands::say;
use crate::strings::messages;
use anyhow::Result;
use std::time::{Duration, Instant};

pub async fn handle_uptime(chat: &impl ChatProvider, started: Instant) -> Result<()> {
    say(chat, &messages::uptime(&format_uptime(started.elapsed()))).await
}

pub async fn handle_unknown(chat: &impl ChatProvider, raw_keyword: &str) -> Result<()> {
    say(chat, &messages::unknown_command(raw_keyword)).await
}

/// `HH:MM:SS`; hours keep growing past 99.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
