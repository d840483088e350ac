//! Detail view: the selected event's full text.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::footer::render_footer;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

/// The text arrives already wrapped, so the paragraph is drawn without
/// ratatui's own wrapping.
pub fn render_detail(frame: &mut Frame, area: Rect, view: &DetailView, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    frame.render_widget(Paragraph::new(view.text.clone()).style(theme.text()), chunks[0]);
    render_footer(frame, chunks[1], chunks[2], view.status.as_deref(), &view.help, theme);
}
