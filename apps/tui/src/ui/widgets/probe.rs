use super::popup::{anchored_rect, ClearWidget};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use stance_atlas::probe::ProbeContent;

/// Tooltip for one location, placed beside `anchor` within `bounds`.
pub fn render_probe(f: &mut Frame<'_>, probe: &ProbeContent, anchor: (u16, u16), bounds: Rect) {
    let lines = probe.lines();
    let widest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let width = u16::try_from(widest + 4).unwrap_or(u16::MAX);
    let area = anchored_rect(anchor.0, anchor.1, width, 6, bounds);

    let [title, counts, hashtags, date] = lines;
    let text = Text::from(vec![
        TextLine::from(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(counts, Style::default().fg(Color::Yellow))),
        TextLine::from(Span::styled(hashtags, Style::default().fg(Color::Gray))),
        TextLine::from(Span::styled(date, Style::default().fg(Color::Gray))),
    ]);

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(ClearWidget, area);
    f.render_widget(paragraph, area);
}
