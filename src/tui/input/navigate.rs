use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::tui::app::{App, FormState, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
        }

        // Movement
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::PageDown) => move_cursor(app, 10),
        (_, KeyCode::PageUp) => move_cursor(app, -10),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => jump_to_top(app),
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => jump_to_bottom(app),

        // Toggle completion
        (_, KeyCode::Char(' ')) | (_, KeyCode::Char('x')) => {
            let Some(id) = app.cursor_task_id() else {
                return;
            };
            match app.session.toggle_complete(&id) {
                Some(true) => app.set_status(format!("completed {}", id)),
                Some(false) => app.set_status(format!("reopened {}", id)),
                None => debug!(%id, "toggle on vanished task"),
            }
            app.clamp_cursor();
        }

        // Open the edit popup for the task under the cursor
        (_, KeyCode::Enter) | (_, KeyCode::Char('e')) => {
            let Some(id) = app.cursor_task_id() else {
                return;
            };
            if let Some(task) = app.session.task(&id) {
                app.form = Some(FormState::edit(task));
                app.mode = Mode::Form;
            }
        }

        // New task popup
        (_, KeyCode::Char('n')) | (_, KeyCode::Char('a')) => {
            app.form = Some(FormState::new_task());
            app.mode = Mode::Form;
        }

        (_, KeyCode::Char('/')) => {
            app.mode = Mode::Search;
        }

        // Esc clears an active search
        (_, KeyCode::Esc) => {
            if !app.session.query.is_empty() {
                app.session.clear_query();
                app.clamp_cursor();
            }
        }

        // Sort chips: s toggles, p / d pick directly
        (_, KeyCode::Char('s')) | (_, KeyCode::Tab) => {
            let sort = app.session.sort.toggled();
            set_sort(app, sort);
        }
        (_, KeyCode::Char('p')) => set_sort(app, crate::model::view::SortMode::Priority),
        (_, KeyCode::Char('d')) => set_sort(app, crate::model::view::SortMode::Due),

        (_, KeyCode::Char(',')) => {
            app.settings_cursor = 0;
            app.mode = Mode::Settings;
        }

        _ => {}
    }
}

/// Switch grouping, keeping the cursor on the same task when it stays visible
fn set_sort(app: &mut App, sort: crate::model::view::SortMode) {
    let current = app.cursor_task_id();
    app.session.set_sort(sort);
    match current {
        Some(id) => app.select_task(&id),
        None => app.clamp_cursor(),
    }
}
