use crate::app::App;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Margin};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_loading(app: &App, f: &mut Frame<'_>) {
    let area = centered_rect(60, 20, f.area());
    let block = Block::default()
        .title("== Stance Atlas ==")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(ClearWidget, area);
    f.render_widget(block, area);

    let throbber = Throbber::default()
        .label(format!("Loading data from {}", app.config.data_source))
        .style(Style::default().fg(Color::Gray))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, area.inner(Margin::new(2, 2)), &mut state);
}

pub fn render_failed(message: &str, f: &mut Frame<'_>) {
    let area = centered_rect(70, 30, f.area());
    let block = Block::default()
        .title(" Could not load data ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Text::from(vec![
        TextLine::from(Span::styled(message, Style::default().fg(Color::Red))),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Check STANCE_DATA or --data, then press q to quit",
            Style::default().fg(Color::Gray),
        )),
    ]);

    f.render_widget(ClearWidget, area);
    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use stance_atlas::config::AppConfig;
    use std::time::Instant;

    fn text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn loading_screen_names_the_source() -> Result<(), Box<dyn std::error::Error>> {
        let app = App::new(AppConfig::default(), Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|f| render_loading(&app, f))?;
        assert!(text(&terminal).contains("Loading data from"));
        Ok(())
    }

    #[test]
    fn failure_is_shown_instead_of_the_dashboard() -> Result<(), Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|f| render_failed("data.json: not found", f))?;
        let text = text(&terminal);
        assert!(text.contains("Could not load data"));
        assert!(text.contains("data.json: not found"));
        Ok(())
    }
}
