//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot:
//! command parsing, image sniffing, per-room state and command routing.

pub mod image;
pub mod parsing;
pub mod router;
pub mod state;
