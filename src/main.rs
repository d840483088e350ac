//! Terminal entry point.
//!
//! Wires configuration, credentials, the Google client and the dispatcher
//! together, then runs the interactive loop until the state machine asks to
//! quit.
//!
//! # Event Loop
//!
//! ```text
//!  crossterm EventStream ──┐
//!                          ├─ select! ─▶ Message ─▶ handle_message ─▶ actions
//!  dispatcher receiver ────┘                              │
//!                                                          └─▶ select_view ─▶ draw
//! ```
//!
//! Exactly one message is applied at a time. Dispatched commands run on their
//! own tasks and come back through the receiver.
//!
//! # Exit Status
//!
//! - `0`: the user quit
//! - `1`: startup failed (config, credentials, terminal) or a command failed
//!   with `recover_from_errors = false`; the reason goes to stderr after the
//!   terminal is restored

#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;
use std::sync::Arc;

use crossterm::event::{Event as TerminalEvent, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use gcal_tui::app::{handle_message, Action, AppState};
use gcal_tui::dispatcher::{Command, Dispatcher, Message};
use gcal_tui::domain::dates::Clock;
use gcal_tui::infrastructure::load_token;
use gcal_tui::observability::init_tracing;
use gcal_tui::service::GoogleCalendar;
use gcal_tui::ui::{draw, select_view};
use gcal_tui::{initialize, Config, Result};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(reason)) => {
            eprintln!("gcal-tui: {reason}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "gcal-tui exited with an error");
            eprintln!("gcal-tui: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs a session and returns the pending error, if one ended it.
async fn run() -> Result<Option<String>> {
    let config = Config::load()?;
    init_tracing(&config);

    tracing::info!(calendar_id = %config.calendar_id, max_results = config.max_results, "session started");

    let token = load_token(&config.token_path(), Clock::system().now())?;
    let service = GoogleCalendar::new(&config.api_base_url, config.calendar_id.clone(), token.access_token)?;

    let (sender, receiver) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(Arc::new(service), sender)
        .with_calendar(config.calendar_id.clone())
        .with_max_results(config.max_results);
    let mut state = initialize(&config);

    let mut terminal = ratatui::try_init()?;
    let outcome = event_loop(&mut terminal, &mut state, &dispatcher, receiver).await;
    ratatui::restore();
    outcome?;

    tracing::info!(failed = state.pending_error.is_some(), "session ended");
    Ok(state.pending_error.take())
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    dispatcher: &Dispatcher,
    mut messages: UnboundedReceiver<Message>,
) -> Result<()> {
    let size = terminal.size()?;
    handle_message(state, &Message::Resize { width: size.width, height: size.height })?;
    dispatcher.dispatch(Command::FetchEvents);
    render(terminal, state)?;

    let mut input = EventStream::new();
    loop {
        let message = tokio::select! {
            terminal_event = input.next() => match terminal_event {
                Some(Ok(event)) => match to_message(event) {
                    Some(message) => message,
                    None => continue,
                },
                Some(Err(e)) => return Err(e.into()),
                None => {
                    tracing::debug!("terminal input closed");
                    return Ok(());
                }
            },
            Some(message) = messages.recv() => message,
        };

        let (redraw, actions) = match handle_message(state, &message) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "failed to handle message");
                continue;
            }
        };

        let mut quit = false;
        for action in actions {
            match action {
                Action::Dispatch(command) => {
                    dispatcher.dispatch(command);
                }
                Action::Quit => quit = true,
            }
        }

        if redraw || quit {
            render(terminal, state)?;
        }
        if quit {
            tracing::debug!("quit requested");
            return Ok(());
        }
    }
}

fn to_message(event: TerminalEvent) -> Option<Message> {
    match event {
        TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Message::Key(key)),
        TerminalEvent::Resize(width, height) => Some(Message::Resize { width, height }),
        _ => None,
    }
}

fn render(terminal: &mut DefaultTerminal, state: &AppState) -> Result<()> {
    let view = select_view(state);
    terminal.draw(|frame| draw(frame, &view, &state.theme, &state.layout))?;
    Ok(())
}
