use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::tui::app::{App, Mode, SettingsRow};

/// Settings popup: j/k pick a row, Enter/Space/Left/Right change it.
/// Changes apply to this session only.
pub(super) fn handle_settings(app: &mut App, key: KeyEvent) {
    let rows = SettingsRow::ALL.len();
    match key.code {
        KeyCode::Esc | KeyCode::Char(',') | KeyCode::Char('q') => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
            app.settings_cursor = (app.settings_cursor + 1).min(rows - 1);
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
            app.settings_cursor = app.settings_cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
            let settings = &mut app.session.settings;
            match SettingsRow::ALL.get(app.settings_cursor) {
                Some(SettingsRow::FontSize) => {
                    settings.font_size = settings.font_size.cycle();
                }
                Some(SettingsRow::Compact) => {
                    settings.compact = !settings.compact;
                }
                None => {}
            }
            debug!(font_size = %settings.font_size, compact = settings.compact, "settings changed");
        }
        _ => {}
    }
}
