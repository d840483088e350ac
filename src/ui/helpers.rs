//! Shared rendering utilities.
//!
//! Text shaping used by more than one component: word wrapping for the detail
//! view, splitting a title into highlighted spans for filter matches, and
//! carving a centered box out of an area for the error and loading views.
//!
//! All character positions are `char` indices, not byte offsets.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;

/// Word-wraps every line of `text` to at most `width` characters.
///
/// Lines already within `width` are kept as they are, including empty lines.
/// A single word longer than `width` is not split and occupies its own line.
/// A `width` of zero disables wrapping.
///
/// # Example
///
/// ```rust
/// use gcal_tui::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("one two three", 7), "one two\nthree");
/// assert_eq!(wrap_text("a\n\nb", 7), "a\n\nb");
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Splits `text` into spans, styling the character ranges in `ranges` with
/// `highlight` and everything else with `base`.
///
/// Ranges are `(start, end)` with an exclusive end, sorted and non-overlapping.
/// Out-of-bounds ends are clamped.
#[must_use]
pub fn highlighted_spans(
    text: &str,
    ranges: &[(usize, usize)],
    base: Style,
    highlight: Style,
) -> Vec<Span<'static>> {
    if ranges.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut position = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < position || start >= end {
            continue;
        }

        if start > position {
            spans.push(Span::styled(chars[position..start].iter().collect::<String>(), base));
        }
        spans.push(Span::styled(chars[start..end].iter().collect::<String>(), highlight));
        position = end;
    }

    if position < chars.len() {
        spans.push(Span::styled(chars[position..].iter().collect::<String>(), base));
    }

    spans
}

/// A `percent_x` by `percent_y` rectangle centered in `area`.
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Shrinks `area` by the configured outer margins.
#[must_use]
pub fn inset(area: Rect, margin_x: u16, margin_y: u16) -> Rect {
    let width = area.width.saturating_sub(margin_x.saturating_mul(2));
    let height = area.height.saturating_sub(margin_y.saturating_mul(2));
    Rect {
        x: area.x.saturating_add(margin_x.min(area.width / 2)),
        y: area.y.saturating_add(margin_y.min(area.height / 2)),
        width,
        height,
    }
}
