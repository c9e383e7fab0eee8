use super::stance_color;
use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use stance_atlas::markers::PlacedMarker;
use stance_atlas::projection::{graticule, sphere_outline};
use stance_atlas::{Atlas, Stance};

const SPHERE_STEPS: usize = 90;
const GRATICULE_STEP: f64 = 30.0;
const GRATICULE_SAMPLES: usize = 36;
/// Legend inset from the bottom-left corner, as a share of the view.
const LEGEND_INSET: f64 = 0.03;

pub fn render_map(app: &App, atlas: &Atlas, f: &mut Frame<'_>, area: Rect) {
    let zoom = if (app.viewport.zoom - 1.0).abs() < f64::EPSILON {
        String::new()
    } else {
        format!(" {:.1}x ", app.viewport.zoom)
    };
    let block = Block::default()
        .title(" Tweets by location ")
        .title_bottom(zoom)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let (from, progress) = app.transition_state(app.last_frame);
    let markers = atlas.markers(app.player.frame(), from.as_deref(), progress);
    let probed = app.probe_location();
    let x_bounds = app.viewport.x_bounds();
    let y_bounds = app.viewport.y_bounds();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            draw_basemap(ctx, atlas);
            ctx.layer();
            draw_markers(ctx, &markers, probed);
            ctx.layer();
            draw_legend(ctx, atlas, x_bounds, y_bounds);
        });

    f.render_widget(canvas, area);
}

fn draw_polyline(ctx: &mut Context<'_>, points: &[(f64, f64)], color: Color) {
    for pair in points.windows(2) {
        ctx.draw(&CanvasLine::new(pair[0].0, pair[0].1, pair[1].0, pair[1].1, color));
    }
}

fn draw_basemap(ctx: &mut Context<'_>, atlas: &Atlas) {
    match &atlas.world {
        Some(world) => {
            for line in &world.lines {
                draw_polyline(ctx, line, Color::Gray);
            }
        }
        None => {
            for line in graticule(GRATICULE_STEP, GRATICULE_SAMPLES) {
                draw_polyline(ctx, &line, Color::DarkGray);
            }
        }
    }
    draw_polyline(ctx, &sphere_outline(SPHERE_STEPS), Color::DarkGray);
}

fn draw_markers(ctx: &mut Context<'_>, markers: &[PlacedMarker], probed: Option<usize>) {
    let favor = stance_color(Stance::Favor);
    let against = stance_color(Stance::Against);

    for marker in markers {
        if marker.radii.favor > 0.0 {
            ctx.draw(&Circle {
                x: marker.x,
                y: marker.y,
                radius: marker.radii.favor,
                color: favor,
            });
        }
        if marker.radii.against > 0.0 {
            ctx.draw(&Circle {
                x: marker.x,
                y: marker.y,
                radius: marker.radii.against,
                color: against,
            });
        }
    }

    if let Some(marker) = probed.and_then(|location| markers.iter().find(|m| m.location == location)) {
        ctx.draw(&Circle {
            x: marker.x,
            y: marker.y,
            radius: marker.radii.largest().max(f64::EPSILON),
            color: Color::White,
        });
    }
}

/// Nested circles sharing a baseline, labelled at their tops.
fn draw_legend(ctx: &mut Context<'_>, atlas: &Atlas, x_bounds: [f64; 2], y_bounds: [f64; 2]) {
    let legend = atlas.legend();
    let Some(largest) = legend.first().map(|entry| entry.radius) else {
        return;
    };

    let x0 = (x_bounds[1] - x_bounds[0]).mul_add(LEGEND_INSET, x_bounds[0]);
    let base = (y_bounds[1] - y_bounds[0]).mul_add(LEGEND_INSET, y_bounds[0]);
    let center_x = x0 + largest;
    let label_x = largest.mul_add(2.0, x0) + (x_bounds[1] - x_bounds[0]) * 0.01;

    for entry in &legend {
        ctx.draw(&Circle {
            x: center_x,
            y: base + entry.radius,
            radius: entry.radius,
            color: Color::Gray,
        });
        ctx.print(
            label_x,
            entry.radius.mul_add(2.0, base),
            Span::styled(entry.label.clone(), Style::default().fg(Color::Gray)),
        );
    }
    ctx.print(
        x0,
        largest.mul_add(2.0, base) + (y_bounds[1] - y_bounds[0]) * 0.06,
        Span::styled("# tweets", Style::default().fg(Color::White)),
    );
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::ready_app;
    use crate::ui::ui;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    #[test]
    fn map_draws_title_and_legend() -> Result<(), Box<dyn std::error::Error>> {
        let app = ready_app(Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|f| ui(&app, f))?;

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(text.contains("Tweets by location"));
        assert!(text.contains("# tweets"));
        Ok(())
    }
}
