//! The event form: focus, editing, submission and conversion to an [`Event`].

use super::field::{Field, FieldKey};
use crate::domain::dates::Clock;
use crate::domain::error::{CalendarError, Result};
use crate::domain::Event;
use crate::LayoutConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether the form creates a new event or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    New,
    Edit,
}

/// Lifecycle of a form. `Completed` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Completed,
    Aborted,
}

/// Ordered set of labeled, validated input fields.
///
/// Built blank with [`Form::blank`] or pre-filled from an event with
/// [`Form::filled`]. Keys are fed through [`Form::handle_key`] until the form
/// reaches a terminal [`FormStatus`]; after that it ignores input and
/// [`Form::to_event`] yields the event to send.
#[derive(Debug, Clone)]
pub struct Form {
    kind: FormKind,
    fields: Vec<Field>,
    focus: usize,
    status: FormStatus,
    source_id: String,
    layout: LayoutConfig,
    clock: Clock,
}

impl Form {
    /// Creates an empty form for a new event.
    #[must_use]
    pub fn blank(layout: LayoutConfig, clock: Clock) -> Self {
        let fields = FieldKey::ALL
            .iter()
            .map(|key| Field::new(*key, String::new()))
            .collect();

        Self {
            kind: FormKind::New,
            fields,
            focus: 0,
            status: FormStatus::Editing,
            source_id: String::new(),
            layout,
            clock,
        }
    }

    /// Creates a form pre-filled from `source` for editing.
    ///
    /// Date fields take the timed value and fall back to the all-day date. The
    /// pre-filled values are validated immediately so any problem is visible
    /// before the user edits anything.
    #[must_use]
    pub fn filled(source: &Event, layout: LayoutConfig, clock: Clock) -> Self {
        let value_for = |key: FieldKey| match key {
            FieldKey::Summary => source.summary.clone(),
            FieldKey::Description => source.description.clone(),
            FieldKey::Location => source.location.clone(),
            FieldKey::Start => source.start.as_text().to_string(),
            FieldKey::End => source.end.as_text().to_string(),
        };

        let mut form = Self {
            kind: FormKind::Edit,
            fields: FieldKey::ALL
                .iter()
                .map(|key| Field::new(*key, value_for(*key)))
                .collect(),
            focus: 0,
            status: FormStatus::Editing,
            source_id: source.id.clone(),
            layout,
            clock,
        };
        form.validate_all();
        form
    }

    #[must_use]
    pub const fn kind(&self) -> FormKind {
        self.kind
    }

    #[must_use]
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status != FormStatus::Editing
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, key: FieldKey) -> Option<&Field> {
        self.fields.iter().find(|f| f.key() == key)
    }

    #[must_use]
    pub fn focused_key(&self) -> FieldKey {
        self.fields
            .get(self.focus)
            .map_or(FieldKey::Summary, Field::key)
    }

    #[must_use]
    pub const fn layout(&self) -> LayoutConfig {
        self.layout
    }

    /// Title shown above the form.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.kind {
            FormKind::New => "New event",
            FormKind::Edit => "Edit event",
        }
    }

    /// Width available to input boxes inside an area `area_width` cells wide.
    #[must_use]
    pub fn input_width(&self, area_width: u16) -> u16 {
        area_width
            .saturating_sub(self.layout.margin_x.saturating_mul(2))
            .min(self.layout.max_content_width)
    }

    /// Feeds one key press into the form and returns the resulting status.
    ///
    /// Terminal forms ignore all input.
    pub fn handle_key(&mut self, key: &KeyEvent) -> FormStatus {
        if self.is_done() {
            return self.status;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.abort(),
            KeyCode::Char('s') if ctrl => {
                self.submit();
            }
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter => {
                if self.focus + 1 >= self.fields.len() {
                    self.submit();
                } else {
                    self.focus_next();
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.pop();
                }
                self.validate_focused();
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.push(c);
                }
                self.validate_focused();
            }
            _ => {}
        }

        self.status
    }

    /// Replaces a field's text and validates it.
    ///
    /// Ignored once the form is terminal.
    pub fn set_value(&mut self, key: FieldKey, value: impl Into<String>) {
        if self.is_done() {
            return;
        }
        let now = self.clock.now();
        if let Some(field) = self.fields.iter_mut().find(|f| f.key() == key) {
            field.set(value.into());
            field.validate(now);
        }
    }

    /// Moves focus to the next field, validating the one being left.
    pub fn focus_next(&mut self) {
        self.validate_focused();
        if self.focus + 1 < self.fields.len() {
            self.focus += 1;
        }
    }

    /// Moves focus to the previous field, validating the one being left.
    pub fn focus_prev(&mut self) {
        self.validate_focused();
        self.focus = self.focus.saturating_sub(1);
    }

    /// Attempts to complete the form.
    ///
    /// Every field is validated again. On failure focus jumps to the first
    /// invalid field and the form keeps editing.
    pub fn submit(&mut self) -> FormStatus {
        if self.is_done() {
            return self.status;
        }

        if let Some(first_invalid) = self.validate_all() {
            tracing::debug!(
                field = self.focused_key().key(),
                invalid = first_invalid.key(),
                "form submission rejected"
            );
            if let Some(index) = self.fields.iter().position(|f| f.key() == first_invalid) {
                self.focus = index;
            }
        } else {
            tracing::debug!(kind = ?self.kind, "form completed");
            self.status = FormStatus::Completed;
        }
        self.status
    }

    /// Cancels the form.
    pub fn abort(&mut self) {
        if !self.is_done() {
            tracing::debug!(kind = ?self.kind, "form aborted");
            self.status = FormStatus::Aborted;
        }
    }

    /// Converts a completed form into the event to send to the service.
    ///
    /// Text fields are copied unchanged. Start and end use the values cached at
    /// validation: RFC 3339 text as typed, bare dates as whole days, anything
    /// else in the wire format. A blank end is one hour after a timed start or
    /// the day after a whole-day start. When only one side is a whole day it is
    /// sent as midnight so both sides match. The source event's id is kept when
    /// editing.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::FormIncomplete`] unless the form is
    /// [`FormStatus::Completed`], and [`CalendarError::Validation`] if the start
    /// timestamp is missing.
    pub fn to_event(&self) -> Result<Event> {
        if self.status != FormStatus::Completed {
            return Err(CalendarError::FormIncomplete);
        }

        let text = |key: FieldKey| self.field(key).map(|f| f.value().to_string()).unwrap_or_default();
        let mut start = self
            .field(FieldKey::Start)
            .and_then(Field::parsed)
            .cloned()
            .ok_or_else(|| CalendarError::Validation {
                field: FieldKey::Start.key().to_string(),
                message: "start is required".to_string(),
            })?;
        let mut end = self
            .field(FieldKey::End)
            .and_then(Field::parsed)
            .cloned()
            .unwrap_or_else(|| start.default_end());
        if start.is_all_day() != end.is_all_day() {
            start = start.into_timed();
            end = end.into_timed();
        }

        Ok(Event {
            id: self.source_id.clone(),
            summary: text(FieldKey::Summary),
            description: text(FieldKey::Description),
            location: text(FieldKey::Location),
            start: start.to_event_date_time(),
            end: end.to_event_date_time(),
        })
    }

    fn validate_focused(&mut self) {
        let now = self.clock.now();
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.validate(now);
        }
    }

    /// Validates every field and returns the first invalid one.
    fn validate_all(&mut self) -> Option<FieldKey> {
        let now = self.clock.now();
        let mut first_invalid = None;
        for field in &mut self.fields {
            if !field.validate(now) && first_invalid.is_none() {
                first_invalid = Some(field.key());
            }
        }
        first_invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventDateTime;
    use chrono::DateTime;

    fn clock() -> Clock {
        Clock::fixed(DateTime::parse_from_rfc3339("2024-04-01T12:00:00-07:00").unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_key(&press(KeyCode::Char(c)));
        }
    }

    fn sample_event() -> Event {
        Event {
            id: "evt-1".to_string(),
            summary: "Sample Event".to_string(),
            description: "Sample".to_string(),
            location: "Room 4".to_string(),
            start: EventDateTime::timed("2024-04-03T00:00:00-07:00"),
            end: EventDateTime::timed("2024-04-04T00:00:00-07:00"),
        }
    }

    #[test]
    fn filled_form_round_trips_after_visiting_every_field() {
        let source = sample_event();
        let mut form = Form::filled(&source, LayoutConfig::default(), clock());
        assert_eq!(form.kind(), FormKind::Edit);

        for _ in 0..FieldKey::ALL.len() {
            form.handle_key(&press(KeyCode::Enter));
        }

        assert_eq!(form.status(), FormStatus::Completed);
        assert_eq!(form.to_event().unwrap(), source);
    }

    #[test]
    fn blank_end_defaults_to_one_hour_after_start() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.set_value(FieldKey::Summary, "Sample Event");
        form.set_value(FieldKey::Start, "2024-04-03T00:00:00-07:00");
        assert_eq!(form.submit(), FormStatus::Completed);

        let event = form.to_event().unwrap();
        assert_eq!(event.start.date_time, "2024-04-03T00:00:00-07:00");
        assert_eq!(event.end.date_time, "2024-04-03T01:00:00-07:00");
        assert!(event.id.is_empty());
    }

    #[test]
    fn conversion_is_repeatable() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.set_value(FieldKey::Summary, "Lunch");
        form.set_value(FieldKey::Start, "2024-04-03 13:00");
        form.submit();
        assert_eq!(form.to_event().unwrap(), form.to_event().unwrap());
    }

    #[test]
    fn typing_edits_focused_field() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        type_text(&mut form, "Standupx");
        form.handle_key(&press(KeyCode::Backspace));
        form.handle_key(&press(KeyCode::Tab));
        type_text(&mut form, "daily");

        assert_eq!(form.field(FieldKey::Summary).unwrap().value(), "Standup");
        assert_eq!(form.field(FieldKey::Description).unwrap().value(), "daily");
        assert_eq!(form.focused_key(), FieldKey::Description);
    }

    #[test]
    fn focus_moves_both_ways_and_stays_in_bounds() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.handle_key(&press(KeyCode::BackTab));
        assert_eq!(form.focused_key(), FieldKey::Summary);

        for _ in 0..10 {
            form.handle_key(&press(KeyCode::Down));
        }
        assert_eq!(form.focused_key(), FieldKey::End);

        form.handle_key(&press(KeyCode::Up));
        assert_eq!(form.focused_key(), FieldKey::Start);
    }

    #[test]
    fn submission_with_missing_fields_focuses_first_invalid() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.set_value(FieldKey::Summary, "Retro");
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert_eq!(form.handle_key(&ctrl_s), FormStatus::Editing);
        assert_eq!(form.focused_key(), FieldKey::Start);
        assert_eq!(
            form.field(FieldKey::Start).unwrap().error(),
            Some("start is required")
        );
        assert!(matches!(form.to_event(), Err(CalendarError::FormIncomplete)));
    }

    #[test]
    fn invalid_date_blocks_completion() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.set_value(FieldKey::Summary, "Retro");
        form.set_value(FieldKey::Start, "2024-04-03");
        form.set_value(FieldKey::End, "not a date at all xyz");

        assert_eq!(form.submit(), FormStatus::Editing);
        assert_eq!(form.focused_key(), FieldKey::End);
    }

    #[test]
    fn escape_aborts_and_freezes_form() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        assert_eq!(form.handle_key(&press(KeyCode::Esc)), FormStatus::Aborted);

        type_text(&mut form, "late");
        form.set_value(FieldKey::Summary, "ignored");
        assert_eq!(form.field(FieldKey::Summary).unwrap().value(), "");
        assert_eq!(form.submit(), FormStatus::Aborted);
        assert!(form.to_event().is_err());
    }

    #[test]
    fn completed_form_ignores_further_edits() {
        let mut form = Form::filled(&sample_event(), LayoutConfig::default(), clock());
        assert_eq!(form.submit(), FormStatus::Completed);

        type_text(&mut form, "!!");
        assert_eq!(form.to_event().unwrap().summary, "Sample Event");
    }

    #[test]
    fn all_day_source_round_trips_unchanged() {
        let source = Event {
            id: "evt-2".to_string(),
            summary: "Offsite".to_string(),
            start: EventDateTime::all_day("2024-05-01"),
            end: EventDateTime::all_day("2024-05-02"),
            ..Event::default()
        };
        let mut form = Form::filled(&source, LayoutConfig::default(), clock());
        assert_eq!(form.field(FieldKey::Start).unwrap().value(), "2024-05-01");
        assert!(form.fields().iter().all(Field::is_valid));

        assert_eq!(form.submit(), FormStatus::Completed);
        assert_eq!(form.to_event().unwrap(), source);
    }

    #[test]
    fn utc_source_round_trips_unchanged() {
        let source = Event {
            start: EventDateTime::timed("2024-04-03T10:00:00Z"),
            end: EventDateTime::timed("2024-04-03T11:00:00Z"),
            ..sample_event()
        };
        let mut form = Form::filled(&source, LayoutConfig::default(), clock());
        assert_eq!(form.submit(), FormStatus::Completed);
        assert_eq!(form.to_event().unwrap(), source);
    }

    #[test]
    fn whole_day_start_with_blank_end_lasts_one_day() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.set_value(FieldKey::Summary, "Offsite");
        form.set_value(FieldKey::Start, "2024-05-01");
        assert_eq!(form.submit(), FormStatus::Completed);

        let event = form.to_event().unwrap();
        assert_eq!(event.start, EventDateTime::all_day("2024-05-01"));
        assert_eq!(event.end, EventDateTime::all_day("2024-05-02"));
    }

    #[test]
    fn mixed_whole_day_and_timed_are_both_sent_timed() {
        let mut form = Form::blank(LayoutConfig::default(), clock());
        form.set_value(FieldKey::Summary, "Offsite");
        form.set_value(FieldKey::Start, "2024-05-01");
        form.set_value(FieldKey::End, "2024-05-01 17:00");
        assert_eq!(form.submit(), FormStatus::Completed);

        let event = form.to_event().unwrap();
        assert_eq!(event.start, EventDateTime::timed("2024-05-01T00:00:00-07:00"));
        assert_eq!(event.end, EventDateTime::timed("2024-05-01T17:00:00-07:00"));
    }

    #[test]
    fn input_width_respects_margins_and_cap() {
        let form = Form::blank(LayoutConfig::default(), clock());
        assert_eq!(form.input_width(40), 36);
        assert_eq!(form.input_width(400), 150);
    }
}
