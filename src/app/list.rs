//! List navigation widget: cursor movement, paging and fuzzy filtering.
//!
//! `ListNav` never owns events. It keeps indices into the store's slice and is
//! re-synchronized with [`ListNav::refresh`] whenever the store changes.
//!
//! # Filtering
//!
//! `/` starts typing a filter. Each whitespace-separated token of the query
//! must fuzzy-match the event summary (Skim algorithm, case-insensitive).
//! Enter keeps the filter and returns to navigation; Esc clears it.

use crate::domain::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::ops::Range;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Cursor and filter state for the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNav {
    cursor: usize,
    visible: Vec<usize>,
    filter: String,
    filtering: bool,
    page_size: usize,
}

impl Default for ListNav {
    fn default() -> Self {
        Self::new()
    }
}

impl ListNav {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor: 0,
            visible: Vec::new(),
            filter: String::new(),
            filtering: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Index into the store of the highlighted event.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    /// Position of the cursor within the visible rows.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Store indices of the rows that pass the filter, in store order.
    #[must_use]
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// True while the filter query is being typed.
    #[must_use]
    pub const fn is_filtering(&self) -> bool {
        self.filtering
    }

    #[must_use]
    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    pub fn set_page_size(&mut self, rows: usize) {
        self.page_size = rows.max(1);
    }

    /// Recomputes the visible rows for `events` and clamps the cursor.
    pub fn refresh(&mut self, events: &[Event]) {
        let tokens: Vec<String> = self
            .filter
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        self.visible = events
            .iter()
            .enumerate()
            .filter(|(_, event)| {
                matcher.as_ref().map_or(true, |m| {
                    let summary = event.summary.to_lowercase();
                    tokens.iter().all(|token| m.fuzzy_match(&summary, token).is_some())
                })
            })
            .map(|(index, _)| index)
            .collect();

        self.cursor = self.cursor.min(self.visible.len().saturating_sub(1));

        tracing::trace!(
            total = events.len(),
            visible = self.visible.len(),
            filter = %self.filter,
            "list refreshed"
        );
    }

    /// Drops the filter and shows every event again.
    pub fn clear_filter(&mut self, events: &[Event]) {
        self.filter.clear();
        self.filtering = false;
        self.refresh(events);
    }

    /// Handles navigation and filter keys.
    ///
    /// Returns `true` if the key was consumed. While the filter is being typed
    /// every key is consumed.
    pub fn handle_key(&mut self, key: &KeyEvent, events: &[Event]) -> bool {
        if self.filtering {
            self.handle_filter_key(key, events);
            return true;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = self.visible.len().saturating_sub(1),
            KeyCode::PageDown => {
                self.cursor = (self.cursor + self.page_size).min(self.visible.len().saturating_sub(1));
            }
            KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(self.page_size),
            KeyCode::Char('/') => {
                self.filtering = true;
                self.filter.clear();
                self.refresh(events);
            }
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: &KeyEvent, events: &[Event]) {
        match key.code {
            KeyCode::Enter => self.filtering = false,
            KeyCode::Esc => self.clear_filter(events),
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            KeyCode::Backspace => {
                self.filter.pop();
                self.refresh(events);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.push(c);
                self.refresh(events);
            }
            _ => {}
        }
    }

    /// Moves down one row, wrapping to the top.
    fn move_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.visible.len();
    }

    /// Moves up one row, wrapping to the bottom.
    fn move_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.visible.len() - 1
        } else {
            self.cursor - 1
        };
    }

    /// Range of visible rows to draw in a viewport `rows` tall, keeping the
    /// cursor near the middle.
    #[must_use]
    pub fn window(&self, rows: usize) -> Range<usize> {
        let total = self.visible.len();
        if rows == 0 || total == 0 {
            return 0..0;
        }

        let mut start = self.cursor.saturating_sub(rows / 2);
        let end = (start + rows).min(total);
        if end - start < rows && total >= rows {
            start = end - rows;
        }
        start..end
    }

    /// Character ranges of `text` matched by the current filter, merged into
    /// contiguous `(start, end)` spans with exclusive ends.
    #[must_use]
    pub fn highlight_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        if self.filter.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.filter) else {
            return Vec::new();
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for index in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == index => *end = index + 1,
                _ => ranges.push((index, index + 1)),
            }
        }
        ranges
    }
}
