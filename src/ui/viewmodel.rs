//! Render selector and the view models it produces.
//!
//! [`select_view`] is a pure function of [`AppState`]: it picks exactly one
//! [`View`] and fills it with display-ready data (wrapped detail text, list
//! rows with match highlights, form rows with inline errors). The renderer
//! draws a view without consulting the state again.
//!
//! # Selection order
//!
//! 1. A pending error shows the error view, whatever the mode.
//! 2. Before the first fetch completes, an empty store shows the loading view.
//! 3. Detail mode with a selection shows the detail view.
//! 4. Form modes with a form show the form view.
//! 5. Everything else shows the list view.

use crate::app::{AppState, Mode};
use crate::domain::EventItem;
use crate::form::Form;
use crate::ui::helpers::wrap_text;

const FORM_HELP: &str = "tab/↓ next • shift+tab/↑ prev • enter next/submit • ctrl+s submit • esc cancel";

/// The one view drawn this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Error(ErrorView),
    Loading(LoadingView),
    Detail(DetailView),
    Form(FormView),
    List(ListView),
}

/// A failed command's reason, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingView {
    pub message: String,
}

/// Full text of the selected event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Detail text, word-wrapped to the content width.
    pub text: String,
    pub status: Option<String>,
    pub help: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub rows: Vec<FormRow>,
    pub input_width: u16,
    pub help: String,
}

/// One labeled input of the form view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub error: Option<String>,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub title: String,
    pub rows: Vec<ListRow>,
    /// Position of the highlighted row within `rows`.
    pub selected: Option<usize>,
    pub filter: Option<FilterBar>,
    pub status: Option<String>,
    /// Shown instead of rows when there is nothing to list.
    pub empty_message: Option<String>,
    pub help: String,
}

/// One event row: title and date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub title: String,
    pub subtitle: String,
    /// Character ranges of `title` matched by the filter.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    pub query: String,
    /// True while the query is being typed.
    pub typing: bool,
}

/// Chooses and builds the view for the current state.
///
/// # Example
///
/// ```rust
/// use gcal_tui::app::{AppState, ErrorPolicy};
/// use gcal_tui::domain::dates::Clock;
/// use gcal_tui::ui::theme::Theme;
/// use gcal_tui::ui::viewmodel::{select_view, View};
/// use gcal_tui::LayoutConfig;
///
/// let mut state = AppState::new(LayoutConfig::default(), Theme::default(), Clock::system(), ErrorPolicy::Terminate);
/// assert!(matches!(select_view(&state), View::Loading(_)));
///
/// state.pending_error = Some("503: Backend Error".to_string());
/// assert!(matches!(select_view(&state), View::Error(e) if e.message == "503: Backend Error"));
/// ```
#[must_use]
pub fn select_view(state: &AppState) -> View {
    if let Some(message) = &state.pending_error {
        return View::Error(ErrorView {
            message: message.clone(),
        });
    }

    if state.store.is_empty() && !state.loaded {
        return View::Loading(LoadingView {
            message: "Loading events...".to_string(),
        });
    }

    match state.mode {
        Mode::Detail => {
            if let Some(view) = detail_view(state) {
                return View::Detail(view);
            }
        }
        Mode::NewEvent | Mode::EditEvent => {
            if let Some(form) = &state.form {
                return View::Form(form_view(form, state.content_width()));
            }
        }
        Mode::List => {}
    }

    View::List(list_view(state))
}

fn detail_view(state: &AppState) -> Option<DetailView> {
    let event = state.store.selected()?;
    let details = EventItem::new(event).details();
    let width = state.content_width().min(state.layout.max_content_width);

    Some(DetailView {
        text: wrap_text(&details, usize::from(width)),
        status: state.status.clone(),
        help: state.detail_keys.short_help(),
    })
}

fn form_view(form: &Form, content_width: u16) -> FormView {
    let focused = form.focused_key();
    let rows = form
        .fields()
        .iter()
        .map(|field| FormRow {
            label: field.key().label().to_string(),
            value: field.value().to_string(),
            placeholder: field.key().placeholder().to_string(),
            error: field.error().map(str::to_string),
            focused: field.key() == focused,
        })
        .collect();

    FormView {
        title: form.title().to_string(),
        rows,
        input_width: form.input_width(content_width),
        help: FORM_HELP.to_string(),
    }
}

fn list_view(state: &AppState) -> ListView {
    let window = state.nav.window(usize::from(state.list_rows()).max(1));
    let window_start = window.start;

    let rows: Vec<ListRow> = state.nav.visible()[window]
        .iter()
        .filter_map(|index| state.store.get(*index))
        .map(|event| {
            let item = EventItem::new(event);
            ListRow {
                title: item.title().to_string(),
                subtitle: item.description(),
                highlight_ranges: state.nav.highlight_ranges(item.title()),
            }
        })
        .collect();

    let selected = (!rows.is_empty()).then(|| state.nav.cursor().saturating_sub(window_start));

    let empty_message = if state.store.is_empty() {
        Some("No upcoming events. Press n to create one.".to_string())
    } else if rows.is_empty() {
        Some("No events match the filter.".to_string())
    } else {
        None
    };

    let filter = (state.nav.is_filtering() || state.nav.has_filter()).then(|| FilterBar {
        query: state.nav.filter().to_string(),
        typing: state.nav.is_filtering(),
    });

    let mut help = state.list_keys.short_help();
    help.push_str(" • / filter • j/k move");

    ListView {
        title: format!("Events ({})", state.nav.visible().len()),
        rows,
        selected,
        filter,
        status: state.status.clone(),
        empty_message,
        help,
    }
}
