//! Top-level UI mode of the application.
//!
//! Exactly one [`Mode`] is active at a time. It decides which key bindings
//! apply and, together with the pending error and the store, which view the
//! render selector produces.
//!
//! # State Machine
//!
//! ```text
//!            choose              new / edit
//!   Detail ◀──────── List ────────────────▶ NewEvent / EditEvent
//!      │    escape    ▲   form completed or aborted   │
//!      └──────────────┴───────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use gcal_tui::app::Mode;
//!
//! let mode = Mode::default();
//! assert_eq!(mode, Mode::List);
//! assert!(!mode.is_form());
//! ```

/// Current top-level mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing the upcoming events.
    ///
    /// Keys: enter (detail), n (new), e (edit), d (delete), r (refresh),
    /// / (filter), esc (clear selection), q (quit).
    #[default]
    List,

    /// Filling in a blank form to create an event.
    NewEvent,

    /// Filling in a form pre-filled from the highlighted event.
    EditEvent,

    /// Reading the details of the selected event.
    Detail,
}

impl Mode {
    /// Returns true for the two form modes.
    #[must_use]
    pub const fn is_form(self) -> bool {
        matches!(self, Self::NewEvent | Self::EditEvent)
    }
}
