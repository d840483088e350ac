//! Application state owned by the interactive loop.
//!
//! [`AppState`] is the single source of truth for everything the render
//! selector draws: the mode, the event store and its selection, the list
//! cursor, the form being edited, the status line and any pending error. It is
//! mutated only by [`handle_message`](crate::app::handle_message), one message
//! at a time, so nothing in it needs locking.
//!
//! # Example
//!
//! ```rust
//! use gcal_tui::app::{AppState, ErrorPolicy, Mode};
//! use gcal_tui::domain::dates::Clock;
//! use gcal_tui::ui::theme::Theme;
//! use gcal_tui::LayoutConfig;
//!
//! let state = AppState::new(LayoutConfig::default(), Theme::default(), Clock::system(), ErrorPolicy::Terminate);
//! assert_eq!(state.mode, Mode::List);
//! assert!(!state.loaded);
//! ```

use super::keymap::KeyMap;
use super::list::ListNav;
use super::modes::Mode;
use super::store::EventStore;
use crate::domain::dates::Clock;
use crate::domain::Event;
use crate::form::Form;
use crate::ui::theme::Theme;
use crate::LayoutConfig;

/// What happens when a command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Show the error and end the session.
    #[default]
    Terminate,

    /// Show the error, return to the list and keep going. The next key press
    /// dismisses the error.
    Recover,
}

/// Central application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active top-level mode.
    pub mode: Mode,

    /// Events in service order plus the current selection.
    pub store: EventStore,

    /// Cursor and filter over `store`.
    pub nav: ListNav,

    /// Form being filled in; present only in the form modes.
    pub form: Option<Form>,

    /// Transient status line ("You chose ...", "Deleting ...").
    pub status: Option<String>,

    /// Reason of the last failed command. Overrides every other view while set.
    pub pending_error: Option<String>,

    /// Set once the first fetch has completed. Until then an empty store
    /// renders as loading rather than as an empty calendar.
    pub loaded: bool,

    /// Terminal size in cells, `(width, height)`.
    pub viewport: (u16, u16),

    pub layout: LayoutConfig,
    pub theme: Theme,
    pub error_policy: ErrorPolicy,
    pub list_keys: KeyMap,
    pub detail_keys: KeyMap,

    /// Reference time for date parsing in forms.
    pub clock: Clock,
}

impl AppState {
    /// Creates the initial state: list mode, empty store, nothing loaded yet.
    #[must_use]
    pub fn new(layout: LayoutConfig, theme: Theme, clock: Clock, error_policy: ErrorPolicy) -> Self {
        Self {
            mode: Mode::List,
            store: EventStore::new(),
            nav: ListNav::new(),
            form: None,
            status: None,
            pending_error: None,
            loaded: false,
            viewport: (0, 0),
            layout,
            theme,
            error_policy,
            list_keys: KeyMap::list(),
            detail_keys: KeyMap::detail(),
            clock,
        }
    }

    /// The event under the list cursor.
    #[must_use]
    pub fn highlighted_event(&self) -> Option<&Event> {
        self.nav.highlighted().and_then(|index| self.store.get(index))
    }

    /// Re-synchronizes the list cursor after the store changed.
    pub fn sync_nav(&mut self) {
        self.nav.refresh(self.store.events());
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        tracing::debug!(status = %status, "status updated");
        self.status = Some(status);
    }

    /// Records a new terminal size and resizes list paging to match.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.nav.set_page_size(usize::from(self.list_rows()));
    }

    /// Rows available to list entries after margins, title, status and help.
    ///
    /// Each entry takes two rows (title and date range).
    #[must_use]
    pub fn list_rows(&self) -> u16 {
        const CHROME_ROWS: u16 = 4;
        let (_, height) = self.viewport;
        height
            .saturating_sub(self.layout.margin_y.saturating_mul(2))
            .saturating_sub(CHROME_ROWS)
            / 2
    }

    /// Width of the content area inside the horizontal margins.
    #[must_use]
    pub fn content_width(&self) -> u16 {
        self.viewport.0.saturating_sub(self.layout.margin_x.saturating_mul(2))
    }

    /// Leaves any form or detail view and returns to the list.
    pub fn return_to_list(&mut self) {
        self.mode = Mode::List;
        self.form = None;
        self.store.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventDateTime;

    fn state() -> AppState {
        AppState::new(LayoutConfig::default(), Theme::default(), Clock::system(), ErrorPolicy::Terminate)
    }

    #[test]
    fn highlighted_event_follows_nav() {
        let mut state = state();
        state.store.replace_all(vec![
            Event {
                id: "a".to_string(),
                summary: "A".to_string(),
                start: EventDateTime::timed("2024-04-03T00:00:00-07:00"),
                ..Event::default()
            },
            Event {
                id: "b".to_string(),
                summary: "B".to_string(),
                ..Event::default()
            },
        ]);
        assert_eq!(state.highlighted_event(), None);

        state.sync_nav();
        assert_eq!(state.highlighted_event().map(|e| e.id.as_str()), Some("a"));
    }

    #[test]
    fn resize_derives_list_rows_from_layout() {
        let mut state = state();
        state.resize(80, 24);
        assert_eq!(state.viewport, (80, 24));
        assert_eq!(state.list_rows(), 9);
        assert_eq!(state.content_width(), 76);
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let mut state = state();
        state.resize(1, 1);
        assert_eq!(state.list_rows(), 0);
        assert_eq!(state.content_width(), 0);
    }
}
