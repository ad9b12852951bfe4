mod common;
mod edit;
mod navigate;
mod popups;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use popups::*;
#[allow(unused_imports)]
use search::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Clear any transient status message on keypress
    app.status_message = None;
    app.status_is_error = false;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Settings => handle_settings(app, key),
    }
}
