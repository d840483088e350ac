//! Runs commands against the calendar service on background tasks.
//!
//! Each [`Command`] becomes one `tokio` task. The task owns clones of the
//! service handle and the message sender and shares nothing mutable with the
//! interactive loop; its only output is the single [`Message`] it sends when it
//! finishes. Messages therefore arrive in completion order, and there is no
//! cancellation: a slow fetch that finishes after a newer one still replaces
//! the list.

use super::messages::{Command, Message};
use crate::domain::dates::Clock;
use crate::service::{CalendarService, ListQuery};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Spawns commands and funnels their outcomes back as messages.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn CalendarService>,
    sender: UnboundedSender<Message>,
    calendar_id: String,
    max_results: u32,
    clock: Clock,
}

impl Dispatcher {
    /// Creates a dispatcher listing the `primary` calendar, ten events at a time.
    #[must_use]
    pub fn new(service: Arc<dyn CalendarService>, sender: UnboundedSender<Message>) -> Self {
        Self {
            service,
            sender,
            calendar_id: "primary".to_string(),
            max_results: 10,
            clock: Clock::system(),
        }
    }

    #[must_use]
    pub fn with_calendar(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    #[must_use]
    pub const fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Replaces the clock used for the listing's lower time bound.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Starts `command` on its own task and returns immediately.
    ///
    /// The task sends exactly one message. If the receiving side has gone away
    /// the message is dropped.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        let query = ListQuery::upcoming(self.calendar_id.clone(), self.clock.now(), self.max_results);
        let span = tracing::debug_span!("command", kind = ?command.kind());

        tracing::debug!(kind = ?command.kind(), "dispatching command");
        tokio::spawn(
            async move {
                let message = execute(service.as_ref(), command, &query).await;
                if sender.send(message).is_err() {
                    tracing::debug!("message receiver closed, dropping command result");
                }
            }
            .instrument(span),
        )
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("calendar_id", &self.calendar_id)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

/// Runs one command to completion and converts its outcome into a message.
pub async fn execute(service: &dyn CalendarService, command: Command, query: &ListQuery) -> Message {
    let kind = command.kind();
    let outcome = match command {
        Command::FetchEvents => service.list_upcoming(query).await.map(Message::EventsFetched),
        Command::CreateEvent(event) => service
            .create(&event)
            .await
            .map(|()| Message::CommandSucceeded(kind)),
        Command::UpdateEvent(event) => service
            .update(&event)
            .await
            .map(|()| Message::CommandSucceeded(kind)),
        Command::DeleteEvent(event) => service
            .delete(&event.id)
            .await
            .map(|()| Message::CommandSucceeded(kind)),
    };

    outcome.unwrap_or_else(|e| {
        tracing::warn!(kind = ?kind, error = %e, "command failed");
        Message::CommandFailed(e.to_string())
    })
}
