use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::model::task::{Task, TaskId};
use crate::ops::form::TaskForm;
use crate::session::Session;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search box; the list filters live
    Search,
    /// New/edit popup is open
    Form,
    /// Settings popup is open
    Settings,
}

/// Fields of the task popup, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Priority,
    DueDate,
    Projects,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Text,
        FormField::Priority,
        FormField::DueDate,
        FormField::Projects,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Text => "Task",
            FormField::Priority => "Priority",
            FormField::DueDate => "Due date",
            FormField::Projects => "Projects",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Text => "What needs doing?",
            FormField::Priority => "A-D",
            FormField::DueDate => "YYYY-MM-DD",
            FormField::Projects => "+Home +Work",
        }
    }

    fn index(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        FormField::ALL[(self.index() + 1) % FormField::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        let len = FormField::ALL.len();
        FormField::ALL[(self.index() + len - 1) % len]
    }
}

/// What the popup submits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    New,
    Existing(TaskId),
}

/// State of the open task popup
#[derive(Debug, Clone)]
pub struct FormState {
    pub target: FormTarget,
    pub form: TaskForm,
    pub field: FormField,
    /// Byte offset into the focused field
    pub cursor: usize,
    /// Validation message from the last submit attempt
    pub error: Option<String>,
}

impl FormState {
    pub fn new_task() -> Self {
        FormState {
            target: FormTarget::New,
            form: TaskForm::default(),
            field: FormField::Text,
            cursor: 0,
            error: None,
        }
    }

    pub fn edit(task: &Task) -> Self {
        let form = TaskForm::from_task(task);
        let cursor = form.text.len();
        FormState {
            target: FormTarget::Existing(task.id.clone()),
            form,
            field: FormField::Text,
            cursor,
            error: None,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Text => &self.form.text,
            FormField::Priority => &self.form.priority,
            FormField::DueDate => &self.form.due_date,
            FormField::Projects => &self.form.projects,
        }
    }

    pub fn value_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Text => &mut self.form.text,
            FormField::Priority => &mut self.form.priority,
            FormField::DueDate => &mut self.form.due_date,
            FormField::Projects => &mut self.form.projects,
        }
    }

    /// Move focus, placing the cursor at the end of the new field
    pub fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.value(field).len();
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.target, FormTarget::Existing(_))
    }
}

/// Rows of the settings popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    FontSize,
    Compact,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 2] = [SettingsRow::FontSize, SettingsRow::Compact];
}

/// Main application state
pub struct App {
    pub session: Session,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Index into the visible tasks, in display order
    pub cursor: usize,
    /// First visible list row
    pub scroll_offset: usize,
    pub form: Option<FormState>,
    pub settings_cursor: usize,
    /// Transient message shown in the status row until the next key press
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::default(),
            cursor: 0,
            scroll_offset: 0,
            form: None,
            settings_cursor: 0,
            status_message: None,
            status_is_error: false,
        }
    }

    /// Ids of the tasks currently on screen, in display order
    pub fn visible_task_ids(&self) -> Vec<TaskId> {
        self.session
            .groups()
            .iter()
            .flat_map(|g| g.tasks.iter().map(|t| t.id.clone()))
            .collect()
    }

    /// The task under the cursor
    pub fn cursor_task_id(&self) -> Option<TaskId> {
        self.visible_task_ids().into_iter().nth(self.cursor)
    }

    /// Keep the cursor inside the visible list after the list changed
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_task_ids().len();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }

    /// Put the cursor on a specific task if it is visible
    pub fn select_task(&mut self, id: &TaskId) {
        if let Some(pos) = self.visible_task_ids().iter().position(|t| t == id) {
            self.cursor = pos;
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }
}

/// Run the TUI application
pub fn run(session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(tasks = app.session.tasks().len(), "session ended");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Config;
    use crate::model::task::{Priority, TaskDraft};
    use crate::ops::task_ops::TaskStore;

    fn app() -> App {
        let mut store = TaskStore::new();
        store.create_on(TaskDraft::new("low").priority(Priority::C), "2025-06-01");
        store.create_on(TaskDraft::new("high").priority(Priority::A), "2025-06-01");
        App::new(Session::new(store, &Config::default()))
    }

    #[test]
    fn visible_ids_follow_display_order() {
        let app = app();
        let ids: Vec<String> = app
            .visible_task_ids()
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(app.cursor_task_id(), Some(TaskId::new("2")));
    }

    #[test]
    fn clamp_after_filtering() {
        let mut app = app();
        app.cursor = 1;
        app.session.set_query("high");
        app.clamp_cursor();
        assert_eq!(app.cursor, 0);
        app.session.set_query("nothing matches");
        app.clamp_cursor();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.cursor_task_id(), None);
    }

    #[test]
    fn form_field_cycle() {
        assert_eq!(FormField::Text.next(), FormField::Priority);
        assert_eq!(FormField::Projects.next(), FormField::Text);
        assert_eq!(FormField::Text.prev(), FormField::Projects);
    }

    #[test]
    fn edit_form_starts_on_text_with_cursor_at_end() {
        let app = app();
        let task = app.session.task(&TaskId::new("2")).unwrap();
        let state = FormState::edit(task);
        assert!(state.is_edit());
        assert_eq!(state.field, FormField::Text);
        assert_eq!(state.cursor, "high".len());
        assert_eq!(state.form.priority, "A");
    }
}
