//! # Help Text
//!
//! Greeting and command overview.
//! Displayed via the `/help` command and when the bot is invited to a room.

use crate::application::parsing;

pub fn main_text() -> String {
    format!(
        "**Hello!** 😎 This is xkcd bot v{} speaking.\n\n\
         Available commands:\n{}\n\n\
         Answer `yes` or `no` when I ask whether you want to see more.\n\n\
         Please also visit https://xkcd.com.",
        env!("CARGO_PKG_VERSION"),
        parsing::format_help()
    )
}
