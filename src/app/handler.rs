//! Message handling and mode transitions.
//!
//! [`handle_message`] is the state machine. It consumes one [`Message`] at a
//! time, mutates [`AppState`] and returns the [`Action`]s the loop must carry
//! out. Nothing here performs I/O.
//!
//! # Transitions
//!
//! | From | Trigger | Effect | To |
//! |---|---|---|---|
//! | List | enter | select highlighted event | Detail |
//! | List | n | blank form | NewEvent |
//! | List | e | form pre-filled from highlighted event | EditEvent |
//! | List | r | dispatch `FetchEvents` | List |
//! | List | d | status, optimistic removal, dispatch `DeleteEvent` | List |
//! | List, Detail | esc | clear selection | List |
//! | form | completed | optimistic store change, dispatch create/update | List |
//! | form | aborted | discard form | List |
//! | any | ctrl-c, q (List/Detail) | quit | - |
//!
//! Dispatcher results are handled in every mode. `EventsFetched` replaces the
//! store; `CommandSucceeded` reports and refetches to pick up service-assigned
//! ids and ordering; `CommandFailed` records the pending error and either ends
//! the session or returns to the list, depending on [`ErrorPolicy`].
//!
//! Messages are applied in arrival order with no sequence guard, so a stale
//! fetch that completes late replaces the list again.

use super::keymap::{is_interrupt, ListCommand};
use super::modes::Mode;
use super::state::ErrorPolicy;
use crate::app::{Action, AppState};
use crate::dispatcher::{Command, CommandKind, Message};
use crate::domain::error::Result;
use crate::form::{Form, FormKind, FormStatus};
use crossterm::event::{KeyEvent, KeyEventKind};

/// Processes one message and returns whether a redraw is needed plus the
/// actions to execute.
///
/// # Errors
///
/// Returns an error only if a completed form cannot be converted to an event,
/// which indicates a bug in the form engine.
///
/// # Example
///
/// ```rust
/// use gcal_tui::app::{handle_message, AppState, ErrorPolicy};
/// use gcal_tui::dispatcher::Message;
/// use gcal_tui::domain::dates::Clock;
/// use gcal_tui::ui::theme::Theme;
/// use gcal_tui::LayoutConfig;
///
/// let mut state = AppState::new(LayoutConfig::default(), Theme::default(), Clock::system(), ErrorPolicy::Terminate);
/// let (redraw, actions) = handle_message(&mut state, &Message::EventsFetched(vec![]))?;
/// assert!(redraw && actions.is_empty() && state.loaded);
/// # Ok::<(), gcal_tui::domain::CalendarError>(())
/// ```
pub fn handle_message(state: &mut AppState, message: &Message) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_message", mode = ?state.mode, message = message.name()).entered();

    match message {
        Message::Key(key) => handle_key(state, key),
        Message::Resize { width, height } => {
            state.resize(*width, *height);
            Ok((true, vec![]))
        }
        Message::EventsFetched(events) => {
            tracing::debug!(count = events.len(), "events fetched");
            state.store.replace_all(events.clone());
            state.loaded = true;
            state.sync_nav();
            if state.mode == Mode::Detail && state.store.selected().is_none() {
                tracing::debug!("selected event vanished, leaving detail view");
                state.mode = Mode::List;
            }
            state.set_status(format!("Fetched {} events", events.len()));
            Ok((true, vec![]))
        }
        Message::CommandSucceeded(kind) => {
            tracing::debug!(kind = ?kind, "command succeeded");
            state.set_status(kind.success_status());
            let actions = if *kind == CommandKind::Fetch {
                vec![]
            } else {
                vec![Action::Dispatch(Command::FetchEvents)]
            };
            Ok((true, actions))
        }
        Message::CommandFailed(reason) => {
            tracing::warn!(reason = %reason, policy = ?state.error_policy, "command failed");
            state.pending_error = Some(reason.clone());
            match state.error_policy {
                ErrorPolicy::Terminate => Ok((true, vec![Action::Quit])),
                ErrorPolicy::Recover => {
                    state.return_to_list();
                    state.set_status(reason.clone());
                    Ok((true, vec![]))
                }
            }
        }
    }
}

fn handle_key(state: &mut AppState, key: &KeyEvent) -> Result<(bool, Vec<Action>)> {
    if key.kind == KeyEventKind::Release {
        return Ok((false, vec![]));
    }

    if is_interrupt(key) {
        tracing::debug!("interrupt");
        if state.error_policy == ErrorPolicy::Recover {
            state.pending_error = None;
        }
        return Ok((false, vec![Action::Quit]));
    }

    if state.pending_error.take().is_some() {
        tracing::debug!("pending error dismissed");
        return Ok((true, vec![]));
    }

    match state.mode {
        Mode::List => Ok(handle_list_key(state, key)),
        Mode::Detail => Ok(handle_detail_key(state, key)),
        Mode::NewEvent | Mode::EditEvent => handle_form_key(state, key),
    }
}

fn handle_list_key(state: &mut AppState, key: &KeyEvent) -> (bool, Vec<Action>) {
    if !state.nav.is_filtering() {
        if let Some(command) = state.list_keys.lookup(key) {
            return run_list_command(state, command);
        }
    }

    let events = state.store.events();
    let consumed = state.nav.handle_key(key, events);
    (consumed, vec![])
}

fn run_list_command(state: &mut AppState, command: ListCommand) -> (bool, Vec<Action>) {
    tracing::debug!(command = ?command, "list command");

    match command {
        ListCommand::Choose => {
            let Some(event) = state.highlighted_event().cloned() else {
                return (false, vec![]);
            };
            state.set_status(format!("You chose {}", event.summary));
            state.store.select(event);
            state.mode = Mode::Detail;
            (true, vec![])
        }
        ListCommand::New => {
            state.form = Some(Form::blank(state.layout, state.clock.clone()));
            state.mode = Mode::NewEvent;
            (true, vec![])
        }
        ListCommand::Edit => {
            let Some(event) = state.highlighted_event().cloned() else {
                return (false, vec![]);
            };
            state.form = Some(Form::filled(&event, state.layout, state.clock.clone()));
            state.store.select(event);
            state.mode = Mode::EditEvent;
            (true, vec![])
        }
        ListCommand::Delete => {
            let Some(event) = state.highlighted_event().cloned() else {
                return (false, vec![]);
            };
            if event.id.is_empty() {
                state.set_status(format!("{} is not saved yet", event.summary));
                return (true, vec![]);
            }
            state.set_status(format!("Deleting {}...", event.summary));
            state.store.remove_by_id(&event.id);
            state.sync_nav();
            (true, vec![Action::Dispatch(Command::DeleteEvent(event))])
        }
        ListCommand::Refresh => {
            state.set_status("Refreshing...");
            (true, vec![Action::Dispatch(Command::FetchEvents)])
        }
        ListCommand::Escape => {
            state.store.clear_selection();
            if state.nav.has_filter() {
                let events = state.store.events();
                state.nav.clear_filter(events);
            }
            (true, vec![])
        }
        ListCommand::Quit => (false, vec![Action::Quit]),
    }
}

fn handle_detail_key(state: &mut AppState, key: &KeyEvent) -> (bool, Vec<Action>) {
    match state.detail_keys.lookup(key) {
        Some(ListCommand::Escape) => {
            state.store.clear_selection();
            state.mode = Mode::List;
            (true, vec![])
        }
        Some(ListCommand::Quit) => (false, vec![Action::Quit]),
        _ => (false, vec![]),
    }
}

fn handle_form_key(state: &mut AppState, key: &KeyEvent) -> Result<(bool, Vec<Action>)> {
    let Some(form) = state.form.as_mut() else {
        tracing::debug!("form mode without a form, returning to list");
        state.return_to_list();
        return Ok((true, vec![]));
    };

    match form.handle_key(key) {
        FormStatus::Editing => Ok((true, vec![])),
        FormStatus::Aborted => {
            state.return_to_list();
            Ok((true, vec![]))
        }
        FormStatus::Completed => {
            let event = form.to_event()?;
            let kind = form.kind();
            state.return_to_list();

            let command = match kind {
                FormKind::New => {
                    state.set_status(format!("Creating {}...", event.summary));
                    state.store.insert(event.clone());
                    Command::CreateEvent(event)
                }
                FormKind::Edit => {
                    state.set_status(format!("Saving {}...", event.summary));
                    if !state.store.update_by_id(event.clone()) {
                        tracing::warn!(id = %event.id, "edited event is no longer in the store");
                    }
                    Command::UpdateEvent(event)
                }
            };
            state.sync_nav();
            Ok((true, vec![Action::Dispatch(command)]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates::Clock;
    use crate::domain::{Event, EventDateTime};
    use crate::ui::theme::Theme;
    use crate::LayoutConfig;
    use chrono::DateTime;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn state(policy: ErrorPolicy) -> AppState {
        let clock = Clock::fixed(DateTime::parse_from_rfc3339("2024-04-01T12:00:00-07:00").unwrap());
        AppState::new(LayoutConfig::default(), Theme::default(), clock, policy)
    }

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn event(id: &str, summary: &str) -> Event {
        Event {
            id: id.to_string(),
            summary: summary.to_string(),
            start: EventDateTime::timed("2024-04-03T00:00:00-07:00"),
            end: EventDateTime::timed("2024-04-04T00:00:00-07:00"),
            ..Event::default()
        }
    }

    fn loaded(policy: ErrorPolicy, events: Vec<Event>) -> AppState {
        let mut state = state(policy);
        handle_message(&mut state, &Message::EventsFetched(events)).unwrap();
        state
    }

    #[test]
    fn key_release_is_ignored() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("a", "A")]);
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_message(&mut state, &Message::Key(release)).unwrap(), (false, vec![]));
    }

    #[test]
    fn choose_without_events_does_nothing() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![]);
        let (redraw, actions) = handle_message(&mut state, &key(KeyCode::Enter)).unwrap();
        assert!(!redraw && actions.is_empty());
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn choose_sets_status_and_enters_detail() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("a", "Standup")]);
        handle_message(&mut state, &key(KeyCode::Enter)).unwrap();
        assert_eq!(state.mode, Mode::Detail);
        assert_eq!(state.status.as_deref(), Some("You chose Standup"));
        assert_eq!(state.store.selected(), Some(&event("a", "Standup")));
    }

    #[test]
    fn detail_ignores_unbound_keys() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("a", "A")]);
        handle_message(&mut state, &key(KeyCode::Enter)).unwrap();

        for code in [KeyCode::Char('d'), KeyCode::Char('n'), KeyCode::Down] {
            assert_eq!(handle_message(&mut state, &key(code)).unwrap(), (false, vec![]));
        }
        assert_eq!(state.mode, Mode::Detail);
        assert_eq!(state.store.len(), 1);
    }

    #[test]
    fn q_quits_from_list_but_types_into_forms() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![]);
        let (_, actions) = handle_message(&mut state, &key(KeyCode::Char('q'))).unwrap();
        assert_eq!(actions, vec![Action::Quit]);

        handle_message(&mut state, &key(KeyCode::Char('n'))).unwrap();
        let (_, actions) = handle_message(&mut state, &key(KeyCode::Char('q'))).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.mode, Mode::NewEvent);
    }

    #[test]
    fn ctrl_c_quits_from_forms() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![]);
        handle_message(&mut state, &key(KeyCode::Char('n'))).unwrap();
        let ctrl_c = Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_message(&mut state, &ctrl_c).unwrap().1, vec![Action::Quit]);
    }

    #[test]
    fn delete_of_unsaved_event_is_refused() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("", "Draft")]);
        let (_, actions) = handle_message(&mut state, &key(KeyCode::Char('d'))).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.store.len(), 1);
        assert_eq!(state.status.as_deref(), Some("Draft is not saved yet"));
    }

    #[test]
    fn successful_mutation_triggers_refetch() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![]);
        let (_, actions) = handle_message(&mut state, &Message::CommandSucceeded(CommandKind::Create)).unwrap();
        assert_eq!(actions, vec![Action::Dispatch(Command::FetchEvents)]);
        assert_eq!(state.status.as_deref(), Some("Event created"));
    }

    #[test]
    fn refresh_dispatches_fetch() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("a", "A")]);
        let (_, actions) = handle_message(&mut state, &key(KeyCode::Char('r'))).unwrap();
        assert_eq!(actions, vec![Action::Dispatch(Command::FetchEvents)]);
    }

    #[test]
    fn filtering_keeps_bound_letters_out_of_commands() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("a", "Dentist"), event("b", "Team sync")]);
        handle_message(&mut state, &key(KeyCode::Char('/'))).unwrap();
        for c in "den".chars() {
            let (_, actions) = handle_message(&mut state, &key(KeyCode::Char(c))).unwrap();
            assert!(actions.is_empty());
        }
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.nav.visible(), &[0]);

        handle_message(&mut state, &key(KeyCode::Enter)).unwrap();
        handle_message(&mut state, &key(KeyCode::Esc)).unwrap();
        assert_eq!(state.nav.visible(), &[0, 1]);
    }

    #[test]
    fn recovered_error_is_dismissed_by_next_key() {
        let mut state = loaded(ErrorPolicy::Recover, vec![event("a", "A")]);
        handle_message(&mut state, &Message::CommandFailed("boom".to_string())).unwrap();
        assert_eq!(state.pending_error.as_deref(), Some("boom"));

        let (redraw, actions) = handle_message(&mut state, &key(KeyCode::Char('n'))).unwrap();
        assert!(redraw && actions.is_empty());
        assert_eq!(state.pending_error, None);
        assert_eq!(state.mode, Mode::List);
    }

    #[test]
    fn ctrl_c_over_recovered_error_quits_cleanly() {
        let mut state = loaded(ErrorPolicy::Recover, vec![event("a", "A")]);
        handle_message(&mut state, &Message::CommandFailed("boom".to_string())).unwrap();

        let ctrl_c = Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_message(&mut state, &ctrl_c).unwrap().1, vec![Action::Quit]);
        assert_eq!(state.pending_error, None);
    }

    #[test]
    fn fetch_removing_selected_event_leaves_detail() {
        let mut state = loaded(ErrorPolicy::Terminate, vec![event("a", "A")]);
        handle_message(&mut state, &key(KeyCode::Enter)).unwrap();
        handle_message(&mut state, &Message::EventsFetched(vec![event("b", "B")])).unwrap();
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.store.selected(), None);
    }
}
