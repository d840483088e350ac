//! List view: title, filter bar, two-line event rows, status and help.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::footer::render_footer;
use crate::ui::helpers::highlighted_spans;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterBar, ListView};

pub fn render_list(frame: &mut Frame, area: Rect, view: &ListView, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::styled(view.title.clone(), theme.title())),
        chunks[0],
    );

    if let Some(filter) = &view.filter {
        render_filter_bar(frame, chunks[1], filter, theme);
    }

    if let Some(message) = &view.empty_message {
        frame.render_widget(
            Paragraph::new(Line::styled(message.clone(), theme.dim())),
            chunks[2],
        );
    } else {
        frame.render_widget(Paragraph::new(row_lines(view, theme)), chunks[2]);
    }

    render_footer(frame, chunks[3], chunks[4], view.status.as_deref(), &view.help, theme);
}

fn row_lines(view: &ListView, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(view.rows.len() * 2);

    for (position, row) in view.rows.iter().enumerate() {
        let selected = view.selected == Some(position);
        let marker = if selected { "│ " } else { "  " };

        let mut title = vec![Span::raw(marker)];
        if selected {
            title.push(Span::styled(row.title.clone(), theme.selection()));
        } else {
            title.extend(highlighted_spans(
                &row.title,
                &row.highlight_ranges,
                theme.text(),
                theme.match_highlight(),
            ));
        }

        lines.push(Line::from(title));
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(row.subtitle.clone(), theme.dim()),
        ]));
    }

    lines
}

fn render_filter_bar(frame: &mut Frame, area: Rect, filter: &FilterBar, theme: &Theme) {
    let style = if filter.typing {
        theme.focus_border()
    } else {
        theme.dim()
    };
    let line = Line::from(vec![
        Span::styled("Filter: ", style),
        Span::styled(filter.query.clone(), theme.text()),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if filter.typing {
        let typed = u16::try_from("Filter: ".len() + filter.query.chars().count()).unwrap_or(u16::MAX);
        let x = area.x + typed.min(area.width.saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}
