//! Form engine for creating and editing events.
//!
//! A form is an ordered set of labeled fields (title, description, location,
//! start, end) with per-field validation and a completion/abort lifecycle.
//! Date fields are validated through [`crate::domain::dates`] and keep the
//! resolved timestamp, which makes [`Form::to_event`] a pure conversion.
//!
//! # Modules
//!
//! - [`field`]: Field keys, labels and validation
//! - [`engine`]: The [`Form`] itself: focus, editing, submission, conversion

pub mod engine;
pub mod field;

pub use engine::{Form, FormKind, FormStatus};
pub use field::{Field, FieldKey};
