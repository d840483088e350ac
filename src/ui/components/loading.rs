//! Placeholder shown until the first fetch completes.

use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::helpers::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::LoadingView;

pub fn render_loading(frame: &mut Frame, area: Rect, view: &LoadingView, theme: &Theme) {
    let area = centered_rect(60, 20, area);
    frame.render_widget(
        Paragraph::new(view.message.clone())
            .style(theme.dim())
            .alignment(Alignment::Center),
        area,
    );
}
