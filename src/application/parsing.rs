//! # Command Grammar
//!
//! Classifies raw message text into a [`ParsedCommand`].
//! Commands look like `/keyword optional free text`; a bare `yes`/`no` is a short answer.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::types::{CommandKind, ParsedCommand};

pub const COMMAND_MARKER: char = '/';

/// Static description of a command the bot understands.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub keyword: &'static str,
    pub takes_argument: bool,
    pub argument_label: Option<&'static str>,
    pub description: &'static str,
    pub kind: CommandKind,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        keyword: "help",
        takes_argument: false,
        argument_label: None,
        description: "Display this message.",
        kind: CommandKind::Help,
    },
    CommandSpec {
        keyword: "latest",
        takes_argument: false,
        argument_label: None,
        description: "Get the latest comic.",
        kind: CommandKind::Latest,
    },
    CommandSpec {
        keyword: "comic",
        takes_argument: true,
        argument_label: Some("number"),
        description: "Get a comic.",
        kind: CommandKind::Comic,
    },
    CommandSpec {
        keyword: "uptime",
        takes_argument: false,
        argument_label: None,
        description: "Get the current uptime of this bot.",
        kind: CommandKind::Uptime,
    },
    CommandSpec {
        keyword: "random",
        takes_argument: false,
        argument_label: None,
        description: "Get a random comic.",
        kind: CommandKind::Random,
    },
    CommandSpec {
        keyword: "search",
        takes_argument: true,
        argument_label: Some("text"),
        description: "Search comic titles.",
        kind: CommandKind::Search,
    },
    CommandSpec {
        keyword: "feedback",
        takes_argument: true,
        argument_label: Some("text"),
        description: "Send feedback to the developer.",
        kind: CommandKind::Feedback,
    },
];

static COMMAND_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*/(\w+)(?:\s(.*))?").expect("command regex"));

pub fn parse(message: &str) -> ParsedCommand {
    let short_answer = message.trim();
    if short_answer.eq_ignore_ascii_case("yes") || short_answer.eq_ignore_ascii_case("no") {
        let kind = if short_answer.eq_ignore_ascii_case("yes") {
            CommandKind::AnswerYes
        } else {
            CommandKind::AnswerNo
        };
        return ParsedCommand {
            kind,
            raw_keyword: short_answer.to_lowercase(),
            argument: None,
        };
    }

    let Some(caps) = COMMAND_REGEX.captures(message) else {
        tracing::debug!("No command found in {:?}", preview(message));
        return ParsedCommand {
            kind: CommandKind::NoCommand,
            raw_keyword: String::new(),
            argument: Some(message.to_string()),
        };
    };

    let keyword = caps
        .get(1)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default();
    let argument = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|arg| !arg.is_empty())
        .map(str::to_string);

    match COMMANDS.iter().find(|spec| spec.keyword == keyword) {
        Some(spec) => {
            tracing::debug!("Found command '{}'", spec.keyword);
            ParsedCommand {
                kind: spec.kind,
                raw_keyword: keyword,
                argument: if spec.takes_argument { argument } else { None },
            }
        }
        None => {
            tracing::debug!("Unknown command '{}'", keyword);
            ParsedCommand {
                kind: CommandKind::UnknownCommand,
                raw_keyword: keyword,
                argument: None,
            }
        }
    }
}

/// Renders every command as a markdown bullet list, sorted by keyword.
pub fn format_help() -> String {
    let mut specs: Vec<&CommandSpec> = COMMANDS.iter().collect();
    specs.sort_by_key(|spec| spec.keyword);

    specs
        .iter()
        .map(|spec| {
            let label = match (spec.takes_argument, spec.argument_label) {
                (true, Some(label)) => format!(" <{label}>"),
                _ => String::new(),
            };
            format!(
                "- **{}{}{}**: {}",
                COMMAND_MARKER, spec.keyword, label, spec.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn preview(message: &str) -> String {
    if message.chars().count() > 10 {
        format!("{}...", message.chars().take(10).collect::<String>())
    } else {
        message.to_string()
    }
}
