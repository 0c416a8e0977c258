//! # Help Command
//!
//! Handles the `/help` command.
//! Displays the main help menu to the user.

use crate::domain::traits::ChatProvider;
use crate::interface::commands::say;
use anyhow::Result;

pub async fn handle_help(chat: &impl ChatProvider) -> Result<()> {
    say(chat, &crate::strings::help::main_text()).await
}
