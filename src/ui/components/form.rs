//! Form view: one bordered input per field, labels as block titles and
//! validation messages as bottom titles.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::footer::render_footer;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormRow, FormView};

const INPUT_HEIGHT: u16 = 3;

pub fn render_form(frame: &mut Frame, area: Rect, view: &FormView, theme: &Theme) {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(view.rows.iter().map(|_| Constraint::Length(INPUT_HEIGHT)));
    constraints.extend([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::styled(view.title.clone(), theme.title())),
        chunks[0],
    );

    for (row, chunk) in view.rows.iter().zip(chunks.iter().skip(1)) {
        let input_area = Rect {
            width: chunk.width.min(view.input_width),
            ..*chunk
        };
        render_input(frame, input_area, row, theme);
    }

    let footer = chunks.len() - 2;
    render_footer(frame, chunks[footer], chunks[footer + 1], None, &view.help, theme);
}

fn render_input(frame: &mut Frame, area: Rect, row: &FormRow, theme: &Theme) {
    let border_style = if row.focused {
        theme.focus_border()
    } else {
        theme.border()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(row.label.clone());
    if let Some(error) = &row.error {
        block = block.title_bottom(Line::styled(error.clone(), theme.error()));
    }

    let inner = block.inner(area);
    let content = if row.value.is_empty() {
        Paragraph::new(Line::styled(row.placeholder.clone(), theme.dim()))
    } else {
        // Keep the end of long values visible.
        let len = row.value.chars().count();
        let visible = usize::from(inner.width.saturating_sub(1));
        let skip = len.saturating_sub(visible);
        Paragraph::new(row.value.chars().skip(skip).collect::<String>()).style(theme.text())
    };
    frame.render_widget(content.block(block), area);

    if row.focused && inner.width > 0 && inner.height > 0 {
        let typed = u16::try_from(row.value.chars().count()).unwrap_or(u16::MAX);
        let x = inner.x + typed.min(inner.width - 1);
        frame.set_cursor_position((x, inner.y));
    }
}
