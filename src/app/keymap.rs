//! Key bindings and the help text derived from them.
//!
//! Bindings map literal keys to a [`ListCommand`]. The footer help is built from
//! the same table, so a binding and its help entry cannot drift apart.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands available from the list (and, partly, the detail view).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Choose,
    New,
    Edit,
    Delete,
    Refresh,
    Escape,
    Quit,
}

/// One or more keys bound to a command, plus its help entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub command: ListCommand,
    keys: Vec<(KeyCode, KeyModifiers)>,
    pub help_key: &'static str,
    pub help: &'static str,
}

impl Binding {
    fn new(command: ListCommand, keys: &[KeyCode], help_key: &'static str, help: &'static str) -> Self {
        Self {
            command,
            keys: keys.iter().map(|code| (*code, KeyModifiers::NONE)).collect(),
            help_key,
            help,
        }
    }

    /// Returns true if `key` is one of this binding's keys.
    ///
    /// Shift is ignored so uppercase letters and symbols match as typed;
    /// Control and Alt must agree.
    #[must_use]
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let significant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        self.keys.iter().any(|(code, modifiers)| {
            *code == key.code && (key.modifiers & significant) == (*modifiers & significant)
        })
    }
}

/// An ordered set of bindings for one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<Binding>,
}

impl KeyMap {
    /// Bindings active in list mode.
    #[must_use]
    pub fn list() -> Self {
        Self {
            bindings: vec![
                Binding::new(ListCommand::Choose, &[KeyCode::Enter], "enter", "details"),
                Binding::new(ListCommand::New, &[KeyCode::Char('n')], "n", "new"),
                Binding::new(ListCommand::Edit, &[KeyCode::Char('e')], "e", "edit"),
                Binding::new(
                    ListCommand::Delete,
                    &[KeyCode::Char('d'), KeyCode::Delete],
                    "d",
                    "delete",
                ),
                Binding::new(ListCommand::Refresh, &[KeyCode::Char('r')], "r", "refresh"),
                Binding::new(ListCommand::Escape, &[KeyCode::Esc], "esc", "clear"),
                Binding::new(ListCommand::Quit, &[KeyCode::Char('q')], "q", "quit"),
            ],
        }
    }

    /// Bindings active in detail mode.
    #[must_use]
    pub fn detail() -> Self {
        Self {
            bindings: vec![
                Binding::new(ListCommand::Escape, &[KeyCode::Esc], "esc", "back"),
                Binding::new(ListCommand::Quit, &[KeyCode::Char('q')], "q", "quit"),
            ],
        }
    }

    /// Returns the command bound to `key`, if any.
    #[must_use]
    pub fn lookup(&self, key: &KeyEvent) -> Option<ListCommand> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(key))
            .map(|binding| binding.command)
    }

    /// `(key, description)` pairs in binding order.
    pub fn help_entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.bindings.iter().map(|b| (b.help_key, b.help))
    }

    /// Single-line help, e.g. `"enter details • n new • q quit"`.
    #[must_use]
    pub fn short_help(&self) -> String {
        self.help_entries()
            .map(|(key, help)| format!("{key} {help}"))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

/// Ctrl-C quits from every mode, including forms and the error view.
#[must_use]
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
