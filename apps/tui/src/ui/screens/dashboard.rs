use crate::app::App;
use crate::ui::layout::DashboardLayout;
use crate::ui::widgets::charts::render_timeline;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::probe::render_probe;
use crate::ui::widgets::slider::SliderWidget;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use stance_atlas::{Atlas, PlayMode};

pub fn render_dashboard(app: &App, atlas: &Atlas, f: &mut Frame<'_>) {
    let layout = DashboardLayout::new(f.area());

    render_title_section(app, atlas, f, layout.title);
    render_map(app, atlas, f, layout.map);
    render_timeline(atlas, app.player.frame(), f, layout.chart);
    render_slider(app, atlas, f, &layout);
    render_shortcuts(f, layout.shortcuts);
    render_probe_popup(app, atlas, f, &layout);
}

fn render_title_section(app: &App, atlas: &Atlas, f: &mut Frame<'_>, area: Rect) {
    let title_block = Block::default()
        .title("== Stance Atlas ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(title_block, area);

    let title_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area.inner(Margin::new(1, 1)));

    let (mode_label, mode_color) = match app.player.mode() {
        PlayMode::Playing => ("▶ Playing", Color::Green),
        PlayMode::Paused => ("⏸ Paused", Color::Yellow),
    };
    let frame = app.player.frame();
    let position = if app.player.frame_count() == 0 {
        "No frames".to_string()
    } else {
        format!("Frame {}/{}", frame + 1, app.player.frame_count())
    };
    let date = atlas
        .data
        .date(frame)
        .map(|date| date.format("%a %b %d %Y").to_string())
        .unwrap_or_default();

    let state_line = TextLine::from(vec![
        Span::styled(
            mode_label,
            Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(position, Style::default().fg(Color::White)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            date,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(state_line), title_chunks[0]);

    if !app.status_message.is_empty() {
        let status = Paragraph::new(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Right);
        f.render_widget(status, title_chunks[1]);
    }
}

fn render_slider(app: &App, atlas: &Atlas, f: &mut Frame<'_>, layout: &DashboardLayout) {
    let slider = SliderWidget {
        track: layout.slider_track(),
        scale: layout.slider_scale(app.player.frame_count()),
        frame: app.player.frame(),
        dates: &atlas.data.dates,
        hover: app.slider_hover,
        dragging: app.player.is_dragging(),
    };
    f.render_widget(slider, layout.slider);
}

fn render_probe_popup(app: &App, atlas: &Atlas, f: &mut Frame<'_>, layout: &DashboardLayout) {
    let Some(probe) = app.probe() else {
        return;
    };
    let bounds = layout.map_inner();
    let anchor = app.hover.map_or_else(
        || {
            atlas
                .data
                .locations
                .get(probe.location)
                .and_then(|location| layout.map_cell_of(location.projected, &app.viewport))
                .unwrap_or((bounds.x, bounds.y))
        },
        |hover| (hover.column, hover.row),
    );
    render_probe(f, &probe, anchor, bounds);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = |label: &'static str| {
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };
    let text = |label: &'static str| Span::styled(label, Style::default().fg(Color::Gray));

    let shortcuts = TextLine::from(vec![
        key("Space"),
        text(": Play/Pause | "),
        key("←/→"),
        text(": Step | "),
        key("Tab"),
        text(": Next place | "),
        key("+/-"),
        text(": Zoom | "),
        key("?"),
        text(": Help | "),
        key("q"),
        text(": Quit"),
    ]);
    f.render_widget(
        Paragraph::new(shortcuts).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::app::test_support::ready_app;
    use crate::app::Hover;
    use crate::ui::ui;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn draw(app: &crate::app::App) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(120, 40))?;
        terminal.draw(|f| ui(app, f))?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect())
    }

    #[test]
    fn title_shows_state_frame_and_date() -> Result<(), Box<dyn std::error::Error>> {
        let now = Instant::now();
        let mut app = ready_app(now);
        let text = draw(&app)?;
        assert!(text.contains("Playing"));
        assert!(text.contains("Frame 1/3"));
        assert!(text.contains("Wed Jan 01 2020"));

        app.toggle_playback(now);
        app.player.seek(2, now);
        let text = draw(&app)?;
        assert!(text.contains("Paused"));
        assert!(text.contains("Frame 3/3"));
        Ok(())
    }

    #[test]
    fn probe_popup_follows_frame() -> Result<(), Box<dyn std::error::Error>> {
        let now = Instant::now();
        let mut app = ready_app(now);
        app.hover = Some(Hover {
            location: 1,
            column: 20,
            row: 8,
        });
        let text = draw(&app)?;
        assert!(text.contains("Berlin, Germany"));
        assert!(text.contains("20 favor 10 against"));
        assert!(text.contains("Top hashtags: #tag"));

        app.player.seek(1, now);
        let text = draw(&app)?;
        assert!(text.contains("40 favor 20 against"));
        Ok(())
    }
}
