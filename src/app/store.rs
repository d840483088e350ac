//! In-memory event list with an optional selection.
//!
//! The store is owned by [`AppState`](crate::app::AppState) and only mutated
//! from the message handler, so it needs no synchronization. Updates and
//! removals that reference an id the store no longer holds are misses: they
//! return `false` and leave the store untouched.

use crate::domain::Event;

/// Ordered events plus the event currently shown in detail or being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<Event>,
    selection: Option<Event>,
}

impl EventStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            selection: None,
        }
    }

    /// Replaces the whole list with `events`, keeping their order.
    ///
    /// The selection survives only if an event with the same id is in the new
    /// set, in which case it is refreshed to the new value.
    pub fn replace_all(&mut self, events: Vec<Event>) {
        self.events = events;

        if let Some(selected) = self.selection.take() {
            self.selection = self
                .events
                .iter()
                .find(|e| !selected.id.is_empty() && e.id == selected.id)
                .cloned();
            if self.selection.is_none() {
                tracing::debug!(id = %selected.id, "selection dropped by refresh");
            }
        }

        tracing::debug!(count = self.events.len(), "event store replaced");
    }

    /// Appends a newly created event.
    pub fn insert(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Replaces the event sharing `event.id`.
    ///
    /// Returns `false` (a miss) when no such event exists.
    pub fn update_by_id(&mut self, event: Event) -> bool {
        let Some(slot) = self.events.iter_mut().find(|e| e.id == event.id) else {
            tracing::debug!(id = %event.id, "update missed: id not in store");
            return false;
        };

        if self.selection.as_ref().is_some_and(|s| s.id == event.id) {
            self.selection = Some(event.clone());
        }
        *slot = event;
        true
    }

    /// Removes the event with `id`, clearing the selection if it pointed there.
    ///
    /// Returns `false` (a miss) when no such event exists.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            tracing::debug!(id = %id, "remove missed: id not in store");
            return false;
        };

        self.events.remove(index);
        if self.selection.as_ref().is_some_and(|s| s.id == id) {
            self.selection = None;
        }
        true
    }

    pub fn select(&mut self, event: Event) {
        self.selection = Some(event);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Event> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
