//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

use bytes::Bytes;

/// Every kind of input the command grammar can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Latest,
    Comic,
    Random,
    Search,
    Uptime,
    Feedback,
    AnswerYes,
    AnswerNo,
    NoCommand,
    UnknownCommand,
}

impl CommandKind {
    /// Whether a message of this kind gets an acknowledgement reaction.
    pub fn is_actionable(self) -> bool {
        !matches!(
            self,
            CommandKind::NoCommand
                | CommandKind::UnknownCommand
                | CommandKind::AnswerYes
                | CommandKind::AnswerNo
        )
    }
}

/// Result of running the command grammar over one incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub kind: CommandKind,
    pub raw_keyword: String,
    pub argument: Option<String>,
}

/// An incoming text event, as handed over by the chat transport.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub event_id: String,
    pub sender: String,
    pub body: String,
}

/// Image payload plus whatever metadata could be sniffed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub extension: String,
}

/// One fully retrieved comic, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicResult {
    pub index: u32,
    pub title: String,
    pub comment: String,
    pub image: ImageContent,
}

/// A single line of the comic archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub index: u32,
    pub title: String,
    pub date: String,
}
