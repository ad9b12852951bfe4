use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Search box input. The query is applied to the list as it is typed.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cancel: drop the query
        (_, KeyCode::Esc) => {
            app.session.clear_query();
            app.mode = Mode::Navigate;
        }

        // Keep the query and go back to the list
        (_, KeyCode::Enter) | (_, KeyCode::Down) => {
            app.mode = Mode::Navigate;
        }

        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            app.session.clear_query();
        }

        (_, KeyCode::Backspace) => {
            let query = &mut app.session.query;
            if let Some(prev) = unicode::prev_grapheme_boundary(query, query.len()) {
                query.truncate(prev);
            }
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.session.query.push(c);
        }

        _ => return,
    }
    app.cursor = 0;
    app.scroll_offset = 0;
}
