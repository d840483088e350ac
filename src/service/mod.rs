//! Access to the remote calendar service.
//!
//! # Modules
//!
//! - [`backend`]: The [`CalendarService`] trait and listing parameters
//! - [`models`]: JSON wire types and their conversions to domain events
//! - [`google`]: REST client for Google Calendar

pub mod backend;
pub mod google;
pub mod models;

pub use backend::{CalendarService, ListQuery};
pub use google::{GoogleCalendar, DEFAULT_BASE_URL};
