//! Error view: the reason of a failed command, centered in a bordered box.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::helpers::centered_rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ErrorView;

pub fn render_error(frame: &mut Frame, area: Rect, view: &ErrorView, theme: &Theme) {
    let area = centered_rect(70, 40, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.error())
        .title("Error");

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(view.message.clone())
            .style(theme.error())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
