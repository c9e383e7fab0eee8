use crate::app::state::App;
use crossterm::event::KeyCode;
use std::time::Instant;

pub fn handle_help_toggle(app: &mut App, key: KeyCode, now: Instant) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        if app.show_help {
            // The release may land on the popup, where the slider is hidden.
            app.player.end_drag(now);
        }
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::ready_app;
    use std::time::Duration;

    #[test]
    fn opening_help_releases_the_slider() {
        let now = Instant::now();
        let mut app = ready_app(now);
        app.player.begin_drag();

        assert!(handle_help_toggle(&mut app, KeyCode::Char('?'), now));
        assert!(app.show_help);
        assert!(!app.player.is_dragging());
        assert!(app.player.timer_armed());

        assert!(handle_help_toggle(&mut app, KeyCode::Esc, now));
        assert!(!app.show_help);
        app.update(now + Duration::from_secs(1));
        assert_eq!(app.player.frame(), 1);
    }
}
