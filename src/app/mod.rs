//! Application layer: the mode state machine and the state it owns.
//!
//! Sits between the interactive loop (`main.rs`) and the domain, form,
//! dispatcher and UI layers.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! ```text
//! Key input ─┐                                   ┌─▶ Actions ─▶ Dispatcher ─┐
//!            ├─▶ Message ─▶ handle_message ─▶ AppState                      │
//! Results ───┘                                   └─▶ select_view ─▶ draw    │
//!    ▲                                                                       │
//!    └───────────────────────── command results ◀────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the handler
//! - [`handler`]: Message processing and mode transitions
//! - [`keymap`]: Key bindings and derived help text
//! - [`list`]: List cursor, paging and fuzzy filter
//! - [`modes`]: The [`Mode`] enumeration
//! - [`state`]: The [`AppState`] container
//! - [`store`]: The [`EventStore`]

pub mod actions;
pub mod handler;
pub mod keymap;
pub mod list;
pub mod modes;
pub mod state;
pub mod store;

pub use actions::Action;
pub use handler::handle_message;
pub use keymap::{KeyMap, ListCommand};
pub use list::ListNav;
pub use modes::Mode;
pub use state::{AppState, ErrorPolicy};
pub use store::EventStore;
