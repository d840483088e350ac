//! Domain layer for the calendar client.
//!
//! Core types independent of the terminal, the HTTP transport and the async
//! runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`event`]: Calendar event model and its display wrapper
//! - [`dates`]: Free-text and structured date/time parsing

pub mod dates;
pub mod error;
pub mod event;

pub use error::{CalendarError, Result};
pub use event::{Event, EventDateTime, EventItem};
