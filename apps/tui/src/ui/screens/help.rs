use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const SHORTCUTS: [(&str, &str); 11] = [
    ("Space", "Play or pause the animation"),
    ("Left / Right", "Step one frame back or forward"),
    ("Home / End", "Jump to the first or last frame"),
    ("Mouse on slider", "Click to jump, drag to scrub"),
    ("Mouse on map", "Hover a marker to probe it"),
    ("Tab / Shift-Tab", "Probe the next or previous location"),
    ("+ / - / wheel", "Zoom the map"),
    ("w / a / s / d", "Pan the map"),
    ("0", "Reset the map view"),
    ("? / F1", "Toggle this help"),
    ("Esc / q", "Close overlays / quit"),
];

pub fn render_help_popup(f: &mut Frame<'_>) {
    let popup_area = centered_rect(70, 70, f.area().inner(Margin::new(2, 1)));
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Text::from(TextLine::from(vec![Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(Color::Gray),
    )])))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let mut lines = vec![
        TextLine::from(vec![Span::styled(
            "Stance Atlas",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from(
            "Circles show how many tweets in favor (blue) and against (red) came from each place on the selected date.",
        ),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Keyboard & Mouse:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
    ];

    lines.extend(SHORTCUTS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(
                format!("  {key}"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" - {action}")),
        ])
    }));

    lines
}
