use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

/// Move cursor by delta within the visible tasks
pub(super) fn move_cursor(app: &mut App, delta: i32) {
    let count = app.visible_task_ids().len();
    if count == 0 {
        return;
    }
    let new_cursor = (app.cursor as i32 + delta).clamp(0, count as i32 - 1);
    app.cursor = new_cursor as usize;
}

pub(super) fn jump_to_top(app: &mut App) {
    app.cursor = 0;
}

pub(super) fn jump_to_bottom(app: &mut App) {
    app.cursor = app.visible_task_ids().len().saturating_sub(1);
}

/// Apply a line-editing key to `buffer` with the cursor at byte offset `cursor`.
/// Returns false when the key is not an editing key.
pub(super) fn edit_line(buffer: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => {
            *cursor = unicode::word_boundary_left(buffer, *cursor);
        }
        (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => {
            *cursor = unicode::word_boundary_right(buffer, *cursor);
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = next;
            }
        }
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
            *cursor = 0;
        }
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            *cursor = buffer.len();
        }
        // Word backspace (Alt or Ctrl)
        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            let new_pos = unicode::word_boundary_left(buffer, *cursor);
            buffer.drain(new_pos..*cursor);
            *cursor = new_pos;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('w')) => {
            let new_pos = unicode::word_boundary_left(buffer, *cursor);
            buffer.drain(new_pos..*cursor);
            *cursor = new_pos;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.drain(prev..*cursor);
                *cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, *cursor) {
                buffer.drain(*cursor..next);
            }
        }
        // Clear the whole line
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            buffer.clear();
            *cursor = 0;
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        _ => return false,
    }
    true
}
