//! Commands sent to the dispatcher and messages delivered back to the state
//! machine.
//!
//! This is the internal boundary between the interactive loop and the
//! background tasks that talk to the calendar service. Every [`Command`]
//! produces exactly one [`Message`] when it finishes: `EventsFetched` or
//! `CommandSucceeded` on success, `CommandFailed` otherwise. Key presses and
//! terminal resizes travel through the same [`Message`] type so the state
//! machine consumes a single serialized stream.

use crate::domain::Event;
use crossterm::event::KeyEvent;

/// One unit of work against the calendar service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the upcoming events.
    FetchEvents,

    /// Create an event built from a completed form.
    CreateEvent(Event),

    /// Overwrite an existing event, matched by its id.
    UpdateEvent(Event),

    /// Delete an event by its id.
    DeleteEvent(Event),
}

impl Command {
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::FetchEvents => CommandKind::Fetch,
            Self::CreateEvent(_) => CommandKind::Create,
            Self::UpdateEvent(_) => CommandKind::Update,
            Self::DeleteEvent(_) => CommandKind::Delete,
        }
    }
}

/// Payload-free tag identifying which command succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Fetch,
    Create,
    Update,
    Delete,
}

impl CommandKind {
    /// Status line shown when a command of this kind succeeds.
    #[must_use]
    pub const fn success_status(self) -> &'static str {
        match self {
            Self::Fetch => "Events refreshed",
            Self::Create => "Event created",
            Self::Update => "Event updated",
            Self::Delete => "Event deleted",
        }
    }
}

/// Everything the state machine reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press from the terminal.
    Key(KeyEvent),

    /// The terminal was resized.
    Resize {
        width: u16,
        height: u16,
    },

    /// A fetch finished; the events are in service order.
    EventsFetched(Vec<Event>),

    /// A create, update or delete finished successfully.
    CommandSucceeded(CommandKind),

    /// A command failed; carries the human-readable reason.
    CommandFailed(String),
}

impl Message {
    /// Stable name used in logs and spans.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Resize { .. } => "resize",
            Self::EventsFetched(_) => "events_fetched",
            Self::CommandSucceeded(_) => "command_succeeded",
            Self::CommandFailed(_) => "command_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_their_kind() {
        assert_eq!(Command::FetchEvents.kind(), CommandKind::Fetch);
        assert_eq!(Command::DeleteEvent(Event::default()).kind(), CommandKind::Delete);
        assert_eq!(CommandKind::Delete.success_status(), "Event deleted");
    }

    #[test]
    fn message_names() {
        assert_eq!(Message::Resize { width: 1, height: 1 }.name(), "resize");
        assert_eq!(Message::EventsFetched(vec![]).name(), "events_fetched");
        assert_eq!(Message::CommandFailed("boom".to_string()).name(), "command_failed");
    }
}
