//! Terminal user interface.
//!
//! Rendering is split in two steps so that the decision of what to show can be
//! tested without a terminal:
//!
//! ```text
//! AppState → select_view → View → draw → ratatui Frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: The Render Selector and its view models
//! - [`renderer`]: Top-level drawing entry point
//! - [`components`]: One drawing function per view
//! - [`helpers`]: Word wrapping, highlighted spans, layout helpers
//! - [`theme`]: TOML color themes mapped to ratatui styles

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::draw;
pub use theme::Theme;
pub use viewmodel::{select_view, View};
