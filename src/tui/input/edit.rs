use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::tui::app::{App, FormTarget, Mode};

use super::*;

/// Task popup input: Tab/Shift-Tab/Up/Down switch fields, Enter saves,
/// Esc cancels, Ctrl-d deletes the task being edited.
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(state) = app.form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => close_form(app),

        (_, KeyCode::Tab) | (_, KeyCode::Down) => {
            let next = state.field.next();
            state.focus(next);
        }
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => {
            let prev = state.field.prev();
            state.focus(prev);
        }

        (_, KeyCode::Enter) => submit_form(app),

        (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
            if let FormTarget::Existing(id) = state.target.clone() {
                if app.session.delete(&id) {
                    app.set_status(format!("deleted {}", id));
                }
                close_form(app);
                app.clamp_cursor();
            }
        }

        _ => {
            let mut cursor = state.cursor;
            if edit_line(state.value_mut(), &mut cursor, key) {
                state.cursor = cursor;
                state.error = None;
            }
        }
    }
}

fn close_form(app: &mut App) {
    app.form = None;
    app.mode = Mode::Navigate;
}

/// Validate and apply the popup. Invalid input keeps the popup open with the
/// message shown; blank text closes it without changes.
fn submit_form(app: &mut App) {
    let Some(mut state) = app.form.take() else {
        return;
    };
    let form = state.form.clone();

    let result = match &state.target {
        FormTarget::New => app.session.submit_new(form),
        FormTarget::Existing(id) => app
            .session
            .submit_edit(id, form)
            .map(|changed| changed.then(|| id.clone())),
    };

    match result {
        Ok(Some(id)) => {
            let verb = if state.is_edit() { "saved" } else { "added" };
            app.set_status(format!("{} {}", verb, id));
            app.mode = Mode::Navigate;
            app.select_task(&id);
        }
        Ok(None) => {
            debug!("task popup closed without changes");
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        Err(e) => {
            state.error = Some(e.to_string());
            app.form = Some(state);
        }
    }
}
