//! Top-level drawing entry point.
//!
//! Applies the outer margins and hands the remaining area to the component
//! for the selected view. Nothing here reads application state.

use ratatui::Frame;

use crate::ui::components::{render_detail, render_error, render_form, render_list, render_loading};
use crate::ui::helpers::inset;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::View;
use crate::LayoutConfig;

/// Draws `view` into the whole frame.
pub fn draw(frame: &mut Frame, view: &View, theme: &Theme, layout: &LayoutConfig) {
    let area = inset(frame.area(), layout.margin_x, layout.margin_y);
    if area.width == 0 || area.height == 0 {
        return;
    }

    match view {
        View::Error(error) => render_error(frame, area, error, theme),
        View::Loading(loading) => render_loading(frame, area, loading, theme),
        View::Detail(detail) => render_detail(frame, area, detail, theme),
        View::Form(form) => render_form(frame, area, form, theme),
        View::List(list) => render_list(frame, area, list, theme),
    }
}
