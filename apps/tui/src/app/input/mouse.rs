use crate::app::{App, Hover};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use stance_atlas::markers::hit_test;
use std::time::Instant;

/// Hover tolerance around tiny markers, in canvas cells.
const HOVER_CELLS: f64 = 0.75;

pub fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    // Releases end a drag wherever they land, help popup included.
    if mouse.kind == MouseEventKind::Up(MouseButton::Left) {
        app.player.end_drag(now);
        return;
    }
    // Motion with no button held: the release happened outside the window.
    if mouse.kind == MouseEventKind::Moved && app.player.is_dragging() {
        app.player.end_drag(now);
    }

    if app.show_help || app.atlas().is_none() {
        return;
    }

    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => press(app, column, row, now),
        MouseEventKind::Drag(MouseButton::Left) => drag(app, column, now),
        MouseEventKind::Moved => hover(app, column, row),
        MouseEventKind::ScrollUp => {
            let layout = app.layout();
            if let Some(point) = layout.map_point_at(column, row, &app.viewport) {
                app.viewport.zoom_towards(point);
            }
        }
        MouseEventKind::ScrollDown => {
            let layout = app.layout();
            if layout.map_point_at(column, row, &app.viewport).is_some() {
                app.viewport.zoom_out();
            }
        }
        _ => {}
    }
}

/// A press on the slider jumps to the nearest frame and starts a drag.
fn press(app: &mut App, column: u16, row: u16, now: Instant) {
    let layout = app.layout();
    if !layout.in_slider(column, row) {
        return;
    }
    let scale = layout.slider_scale(app.player.frame_count());
    let frame = scale.frame_at(layout.track_offset(column));
    app.player.seek(frame, now);
    app.player.begin_drag();
    app.slider_hover = Some(layout.track_offset(column));
}

fn drag(app: &mut App, column: u16, now: Instant) {
    if !app.player.is_dragging() {
        return;
    }
    let layout = app.layout();
    let offset = layout.track_offset(column);
    let frame = layout
        .slider_scale(app.player.frame_count())
        .frame_at(offset);
    app.player.drag_to(frame, now);
    app.slider_hover = Some(offset);
}

fn hover(app: &mut App, column: u16, row: u16) {
    let layout = app.layout();

    app.slider_hover = if layout.in_slider(column, row) {
        layout.track_offset_strict(column)
    } else {
        None
    };

    let Some(point) = layout.map_point_at(column, row, &app.viewport) else {
        app.hover = None;
        return;
    };
    let Some(atlas) = app.atlas() else {
        return;
    };
    let markers = atlas.markers(app.player.frame(), None, 1.0);
    let tolerance = app.viewport.units_per_cell(layout.map_inner().width) * HOVER_CELLS;
    app.hover = hit_test(&markers, point, tolerance).map(|location| Hover {
        location,
        column,
        row,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::ready_app;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn pressing_the_track_seeks_and_drags() {
        let now = Instant::now();
        let mut app = ready_app(now);
        let track = app.layout().slider_track();
        let end = track.x + track.width - 1;

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), end, track.y), now);
        assert_eq!(app.player.frame(), 2);
        assert!(app.player.is_dragging());
        assert!(!app.player.timer_armed());

        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 0, track.y), now);
        assert_eq!(app.player.frame(), 0);

        // Dragging holds the frame even when deadlines pass.
        app.update(now + Duration::from_secs(5));
        assert_eq!(app.player.frame(), 0);

        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 0, track.y), now);
        assert!(!app.player.is_dragging());
        assert!(app.player.timer_armed());
    }

    #[test]
    fn release_over_help_resumes_playback() {
        let now = Instant::now();
        let mut app = ready_app(now);
        let track = app.layout().slider_track();

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), track.x, track.y), now);
        app.show_help = true;
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), track.x, track.y), now);
        assert!(!app.player.is_dragging());
        assert!(app.player.timer_armed());

        app.show_help = false;
        app.update(now + Duration::from_secs(1));
        assert_eq!(app.player.frame(), 1);
    }

    #[test]
    fn plain_motion_ends_a_drag_released_outside_the_window() {
        let now = Instant::now();
        let mut app = ready_app(now);
        let track = app.layout().slider_track();

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), track.x, track.y), now);
        assert!(app.player.is_dragging());
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 0, 0), now);
        assert!(!app.player.is_dragging());

        app.update(now + Duration::from_secs(1));
        assert_eq!(app.player.frame(), 1);
        app.update(now + Duration::from_secs(2));
        assert_eq!(app.player.frame(), 2);
    }

    #[test]
    fn releasing_after_pause_keeps_playback_stopped() {
        let now = Instant::now();
        let mut app = ready_app(now);
        app.player.pause();
        let track = app.layout().slider_track();

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), track.x, track.y), now);
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), track.x, track.y), now);
        assert!(!app.player.is_playing());
        assert!(!app.player.timer_armed());
    }

    #[test]
    fn hovering_a_marker_sets_the_probe() -> Result<(), Box<dyn std::error::Error>> {
        let now = Instant::now();
        let mut app = ready_app(now);
        let layout = app.layout();
        let berlin = app
            .atlas()
            .map(|atlas| atlas.data.locations[1].projected)
            .ok_or("atlas is loaded")?;
        let (column, row) = layout
            .map_cell_of(berlin, &app.viewport)
            .ok_or("berlin is in view")?;

        handle_mouse(&mut app, mouse(MouseEventKind::Moved, column, row), now);
        assert_eq!(app.probe_location(), Some(1));

        let outside = layout.title;
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, outside.x, outside.y), now);
        assert_eq!(app.hover, None);
        Ok(())
    }

    #[test]
    fn hovering_the_slider_tracks_the_column() {
        let now = Instant::now();
        let mut app = ready_app(now);
        let track = app.layout().slider_track();
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, track.x + 4, track.y), now);
        assert_eq!(app.slider_hover, Some(4));
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 0, 0), now);
        assert_eq!(app.slider_hover, None);
    }

    #[test]
    fn wheel_zooms_only_over_the_map() {
        let now = Instant::now();
        let mut app = ready_app(now);
        let inner = app.layout().map_inner();
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollUp, inner.x + 5, inner.y + 5), now);
        assert!(app.viewport.zoom > 1.0);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollDown, inner.x + 5, inner.y + 5), now);
        assert!((app.viewport.zoom - 1.0).abs() < 1e-9);

        let slider = app.layout().slider;
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollUp, slider.x, slider.y), now);
        assert!((app.viewport.zoom - 1.0).abs() < 1e-9);
    }
}
