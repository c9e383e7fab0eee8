use super::help::handle_help_toggle;
use super::helpers::cycle_selection;
use crate::app::state::{App, LoadState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    if handle_help_toggle(app, key.code, now) {
        return;
    }

    if key.code == KeyCode::Char('q') {
        app.running = false;
        return;
    }

    if matches!(app.load, LoadState::Ready(_)) {
        handle_dashboard_key(app, key.code, now);
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyCode, now: Instant) {
    match key {
        KeyCode::Char(' ') => app.toggle_playback(now),
        KeyCode::Right => {
            app.player.step_forward(now);
        }
        KeyCode::Left => {
            app.player.step_back(now);
        }
        KeyCode::Home => {
            app.player.seek(0, now);
        }
        KeyCode::End => {
            let last = app.player.frame_count().saturating_sub(1);
            app.player.seek(last, now);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let len = app.atlas().map_or(0, |atlas| atlas.data.location_count());
            app.hover = None;
            app.selected_location = cycle_selection(app.selected_location, len, key == KeyCode::Tab);
        }
        KeyCode::Esc => {
            app.selected_location = None;
            app.hover = None;
        }
        KeyCode::Char('+' | '=') => app.viewport.zoom_in(),
        KeyCode::Char('-') => app.viewport.zoom_out(),
        KeyCode::Char('0') => app.viewport.reset(),
        KeyCode::Char('w') => app.viewport.pan(0.0, 1.0),
        KeyCode::Char('s') => app.viewport.pan(0.0, -1.0),
        KeyCode::Char('a') => app.viewport.pan(-1.0, 0.0),
        KeyCode::Char('d') => app.viewport.pan(1.0, 0.0),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::ready_app;

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    #[test]
    fn space_toggles_playback() {
        let now = Instant::now();
        let mut app = ready_app(now);
        assert!(app.player.is_playing());
        press(&mut app, KeyCode::Char(' '), now);
        assert!(!app.player.is_playing());
        press(&mut app, KeyCode::Char(' '), now);
        assert!(app.player.is_playing());
    }

    #[test]
    fn arrows_step_with_wraparound() {
        let now = Instant::now();
        let mut app = ready_app(now);
        press(&mut app, KeyCode::Left, now);
        assert_eq!(app.player.frame(), 2);
        press(&mut app, KeyCode::Right, now);
        assert_eq!(app.player.frame(), 0);
        press(&mut app, KeyCode::End, now);
        assert_eq!(app.player.frame(), 2);
        press(&mut app, KeyCode::Home, now);
        assert_eq!(app.player.frame(), 0);
    }

    #[test]
    fn tab_cycles_locations() {
        let now = Instant::now();
        let mut app = ready_app(now);
        press(&mut app, KeyCode::Tab, now);
        assert_eq!(app.selected_location, Some(0));
        press(&mut app, KeyCode::Tab, now);
        assert_eq!(app.selected_location, Some(1));
        press(&mut app, KeyCode::BackTab, now);
        assert_eq!(app.selected_location, Some(0));
        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.selected_location, None);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let now = Instant::now();
        let mut app = ready_app(now);
        press(&mut app, KeyCode::Char('?'), now);
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'), now);
        assert!(app.running);
        press(&mut app, KeyCode::Esc, now);
        assert!(!app.show_help);
        press(&mut app, KeyCode::Char('q'), now);
        assert!(!app.running);
    }
}
