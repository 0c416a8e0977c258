//! # Bot State
//!
//! Per-room conversation state: whether the bot is waiting for the answer to a
//! question it asked. Lives in memory only and is lost on restart.

use std::collections::HashMap;

use crate::domain::types::CommandKind;

/// What the next message in a room is expected to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingState {
    /// The next message is the argument `kind` was missing.
    AwaitingArgument { kind: CommandKind, page: u32 },
    /// `yes` re-runs `kind` for `page + 1` with the cached argument.
    AwaitingConfirmation {
        kind: CommandKind,
        page: u32,
        argument: String,
    },
}

/// Maps Room IDs to their pending state. At most one entry per room.
#[derive(Debug, Default)]
pub struct BotState {
    rooms: HashMap<String, PendingState>,
}

impl BotState {
    #[cfg(test)]
    pub fn pending(&self, room_id: &str) -> Option<&PendingState> {
        self.rooms.get(room_id)
    }

    /// Removes and returns the pending state, so it is consumed exactly once.
    pub fn take_pending(&mut self, room_id: &str) -> Option<PendingState> {
        self.rooms.remove(room_id)
    }

    pub fn set_pending(&mut self, room_id: &str, pending: PendingState) {
        tracing::debug!("Room {} now {:?}", room_id, pending);
        self.rooms.insert(room_id.to_string(), pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_entry() {
        let mut state = BotState::default();
        state.set_pending(
            "!a:example.org",
            PendingState::AwaitingArgument {
                kind: CommandKind::Comic,
                page: 1,
            },
        );
        assert!(state.pending("!a:example.org").is_some());
        assert!(state.take_pending("!a:example.org").is_some());
        assert!(state.take_pending("!a:example.org").is_none());
    }

    #[test]
    fn test_rooms_are_independent() {
        let mut state = BotState::default();
        state.set_pending(
            "!a:example.org",
            PendingState::AwaitingArgument {
                kind: CommandKind::Feedback,
                page: 1,
            },
        );
        state.set_pending(
            "!b:example.org",
            PendingState::AwaitingConfirmation {
                kind: CommandKind::Search,
                page: 2,
                argument: "sketch".to_string(),
            },
        );
        state.take_pending("!a:example.org");
        assert!(state.pending("!a:example.org").is_none());
        assert!(matches!(
            state.pending("!b:example.org"),
            Some(PendingState::AwaitingConfirmation { page: 2, .. })
        ));
    }

    #[test]
    fn test_new_state_supersedes_old() {
        let mut state = BotState::default();
        state.set_pending(
            "!a:example.org",
            PendingState::AwaitingArgument {
                kind: CommandKind::Comic,
                page: 1,
            },
        );
        state.set_pending(
            "!a:example.org",
            PendingState::AwaitingArgument {
                kind: CommandKind::Search,
                page: 1,
            },
        );
        assert_eq!(
            state.pending("!a:example.org"),
            Some(&PendingState::AwaitingArgument {
                kind: CommandKind::Search,
                page: 1
            })
        );
    }
}
