//! Keyboard input handling for the TUI.
//!
//! This module translates key events into form operations and
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use frontdoor_core::Route;

use crate::app::{App, AppState, LoginFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::LoggingIn => handle_login_input(app, key),
        AppState::Viewing(route) => handle_page_input(app, route, key),
        AppState::Quitting => true,
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return true;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.move_focus(app.login_focus.next());
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.move_focus(app.login_focus.prev());
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Email => app.move_focus(LoginFocus::Password),
            LoginFocus::Password | LoginFocus::Button => app.submit_login(),
            LoginFocus::Guest => app.guest_login(),
            LoginFocus::Register => app.open_register(),
        },
        KeyCode::Backspace => {
            if let (Some(form), Some(field)) = (app.form.as_mut(), app.login_focus.field()) {
                form.backspace(field);
            }
        }
        KeyCode::Char(c) => {
            // Characters on the buttons are ignored
            if let (Some(form), Some(field)) = (app.form.as_mut(), app.login_focus.field()) {
                form.input_char(field, c);
            }
        }
        _ => {}
    }
    false
}

fn handle_page_input(app: &mut App, route: Route, key: KeyEvent) -> bool {
    match (route, key.code) {
        (Route::Register, KeyCode::Esc) => app.start_login(),
        (Route::Landing | Route::GuestEntry, KeyCode::Char('l')) => app.logout(),
        (_, KeyCode::Char('q')) => {
            app.state = AppState::Quitting;
            return true;
        }
        _ => {}
    }
    false
}
