//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.

/// Reaction put on every message that triggered a command.
pub const ACK_REACTION: &str = "❤️";

pub const GENERIC_ERROR: &str = "Sorry, an error occurred. Please try again later.";
pub const INVALID_NUMBER: &str = "Invalid number specified.";
pub const ASK_COMIC: &str =
    "Which comic would you like to see? Answer with a number, \"random\" or \"latest\".";
pub const ASK_SEARCH: &str = "What would you like to search for?";
pub const ASK_FEEDBACK: &str = "What would you like to tell the developer?";
pub const NO_FEEDBACK_CHANNEL: &str = "Sorry, the developer did not specify a feedback channel.";
pub const FEEDBACK_THANKS: &str = "Thank you for your feedback.";
pub const DECLINED: &str = "Alright!";
pub const NO_MORE_RESULTS: &str = "There are no more results.";

pub fn unknown_command(raw: &str) -> String {
    format!("Sorry, I don't know the command \"{raw}\" yet.")
}

pub fn uptime(formatted: &str) -> String {
    format!("Current uptime: {formatted}")
}

pub fn comic_intro(index: u32, permalink: &str, title: &str) -> String {
    format!("Here is your xkcd comic #{index} ({permalink}) titled \"{title}\":")
}

/// Quotes every line, so a multi-line hover text stays one block quote.
pub fn comic_caption(comment: &str) -> String {
    comment
        .lines()
        .map(|line| format!("> {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn feedback_relay(sender: &str, text: &str) -> String {
    format!("Feedback from user \"{sender}\":\n\"{text}\"")
}

pub fn search_empty(query: &str) -> String {
    format!("Sorry, I could not find any comic matching \"{query}\".")
}

pub fn search_header(query: &str, from: usize, to: usize, total: usize) -> String {
    format!("Comics matching \"{query}\" ({from}-{to} of {total}):")
}

pub fn search_entry(index: u32, title: &str, permalink: &str, date: &str) -> String {
    format!("- #{index} [{title}]({permalink}) ({date})")
}

pub const SEARCH_MORE: &str = "Would you like to see more? (yes/no)";
