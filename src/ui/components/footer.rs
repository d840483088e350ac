//! Status and help lines shown at the bottom of every content view.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::theme::Theme;

/// Draws the status line into `status_area` and the key help into `help_area`.
///
/// A missing status leaves its line blank so the help line never moves.
pub fn render_footer(
    frame: &mut Frame,
    status_area: Rect,
    help_area: Rect,
    status: Option<&str>,
    help: &str,
    theme: &Theme,
) {
    if let Some(status) = status {
        frame.render_widget(
            Paragraph::new(Line::styled(status.to_string(), theme.status())),
            status_area,
        );
    }

    frame.render_widget(
        Paragraph::new(Line::styled(help.to_string(), theme.dim())),
        help_area,
    );
}
