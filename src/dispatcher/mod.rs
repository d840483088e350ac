//! Asynchronous command execution and result messages.
//!
//! # Modules
//!
//! - [`messages`]: Command and message types crossing the loop boundary
//! - [`handler`]: The [`Dispatcher`] that runs commands on `tokio` tasks

pub mod handler;
pub mod messages;

pub use handler::{execute, Dispatcher};
pub use messages::{Command, CommandKind, Message};
