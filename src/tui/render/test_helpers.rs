use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::config::Config;
use crate::model::task::{Priority, TaskDraft};
use crate::ops::task_ops::TaskStore;
use crate::session::Session;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen at the default test size.
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| {
        crate::tui::render::render(frame, app)
    })
}

/// The fixed date every rendering test treats as today.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

/// An App over an empty store.
pub fn empty_app() -> App {
    app_with_store(TaskStore::new())
}

pub fn app_with_store(store: TaskStore) -> App {
    let mut session = Session::new(store, &Config::default());
    session.today_override = Some(test_today());
    App::new(session)
}

/// Three tasks: an overdue A, a B due tomorrow with a project, and an undated one.
pub fn sample_app() -> App {
    let mut store = TaskStore::new();
    store.create_on(
        TaskDraft::new("Pay rent").priority(Priority::A).due("2025-06-09"),
        "2025-06-01",
    );
    store.create_on(
        TaskDraft::new("Email landlord")
            .priority(Priority::B)
            .due("2025-06-11")
            .project("Home"),
        "2025-06-01",
    );
    store.create_on(TaskDraft::new("Read a book"), "2025-06-01");
    app_with_store(store)
}
