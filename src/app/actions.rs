//! Side effects requested by the message handler.
//!
//! [`handle_message`](crate::app::handle_message) only mutates state. Anything
//! that reaches outside of it is returned as an [`Action`] for the interactive
//! loop to carry out, in order.
//!
//! # Example
//!
//! ```rust
//! use gcal_tui::app::Action;
//! use gcal_tui::dispatcher::Command;
//!
//! let actions = vec![Action::Dispatch(Command::FetchEvents)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::dispatcher::Command;

/// Effects executed by the interactive loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start a command on the dispatcher.
    Dispatch(Command),

    /// End the interactive loop after drawing the current state once more.
    Quit,
}
