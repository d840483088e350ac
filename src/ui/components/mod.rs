//! One drawing function per view.
//!
//! # Components
//!
//! - [`list`]: Event rows with filter bar
//! - [`detail`]: Wrapped detail text
//! - [`form`]: Labeled inputs with inline errors
//! - [`error`]: Failed command reason
//! - [`loading`]: Placeholder before the first fetch
//! - [`footer`]: Status and help lines shared by the content views

mod detail;
mod error;
mod footer;
mod form;
mod list;
mod loading;

pub use detail::render_detail;
pub use error::render_error;
pub use form::render_form;
pub use list::render_list;
pub use loading::render_loading;
