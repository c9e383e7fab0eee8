use super::stance_color;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;
use stance_atlas::atlas::Segments;
use stance_atlas::scale::format_tick;
use stance_atlas::{Atlas, Stance};

const Y_TICKS: usize = 4;

pub fn render_timeline(atlas: &Atlas, frame: usize, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Tweets over time ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if atlas.data.timeline.is_empty() {
        let paragraph = Paragraph::new("No timeline available")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let series: Vec<(Stance, Segments)> = Stance::ALL
        .iter()
        .map(|&stance| (stance, atlas.series(stance)))
        .collect();
    let y_ticks = atlas.chart_y_ticks(Y_TICKS);
    let y_max = y_ticks.last().copied().unwrap_or(1.0);
    let guide = atlas.guide_x(frame).map(|x| [(x, 0.0), (x, y_max)]);

    let mut datasets = Vec::new();
    for (stance, segments) in &series {
        for (index, segment) in segments.iter().enumerate() {
            let dataset = Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(stance_color(*stance)))
                .data(segment);
            // One legend entry per stance, however many gaps split the line.
            datasets.push(if index == 0 {
                dataset.name(stance.legend_label())
            } else {
                dataset
            });
        }
    }
    if let Some(guide) = &guide {
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Gray))
                .data(guide),
        );
    }

    let x_bounds = atlas.chart_x_bounds();
    let x_labels = atlas.data.date_extent().map_or_else(Vec::new, |(first, last)| {
        let middle = first + (last - first) / 2;
        [first, middle, last]
            .iter()
            .map(|date| Span::raw(date.format("%-d %b %Y").to_string()))
            .collect()
    });
    let y_step = match y_ticks[..] {
        [first, second, ..] => second - first,
        _ => y_max,
    };
    let y_labels: Vec<Span<'_>> = y_ticks
        .iter()
        .map(|value| Span::raw(format_tick(*value, y_step)))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Percentage(100)))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
