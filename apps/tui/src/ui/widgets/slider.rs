use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use stance_atlas::slider::{axis_ticks, day_month, SliderScale};

const HANDLE: &str = "●";
const FILLED: &str = "━";
const EMPTY: &str = "─";

/// Date scrubber: a probe row above the track and day-month labels below.
pub struct SliderWidget<'a> {
    pub track: Rect,
    pub scale: SliderScale,
    pub frame: usize,
    pub dates: &'a [DateTime<Utc>],
    pub hover: Option<u16>,
    pub dragging: bool,
}

impl Widget for SliderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let track = self.track.intersection(area);
        if track.is_empty() {
            return;
        }

        let handle = self.scale.column_of(self.frame).min(track.width - 1);
        for offset in 0..track.width {
            let (symbol, style) = if offset < handle {
                (FILLED, Style::default().fg(Color::Cyan))
            } else {
                (EMPTY, Style::default().fg(Color::DarkGray))
            };
            buf.set_string(track.x + offset, track.y, symbol, style);
        }

        let handle_style = if self.dragging {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        buf.set_string(track.x + handle, track.y, HANDLE, handle_style);

        if track.y + 1 < area.bottom() {
            render_axis(&self, track, area, buf);
        }
        if track.y > area.y {
            render_probe(&self, track, area, buf);
        }
    }
}

fn render_axis(slider: &SliderWidget<'_>, track: Rect, area: Rect, buf: &mut Buffer) {
    let row = track.y + 1;
    let mut next_free = area.x;
    for tick in axis_ticks(&slider.scale, slider.dates) {
        let x = label_x(track.x + tick.column, &tick.label, area);
        if x < next_free {
            continue;
        }
        buf.set_string(x, row, &tick.label, Style::default().fg(Color::Gray));
        next_free = x + label_width(&tick.label) + 1;
    }
}

/// The date under the pointer, centred above it.
fn render_probe(slider: &SliderWidget<'_>, track: Rect, area: Rect, buf: &mut Buffer) {
    let Some(offset) = slider.hover else {
        return;
    };
    let frame = slider.scale.frame_at(offset);
    let Some(&date) = slider.dates.get(frame) else {
        return;
    };
    let label = day_month(date);
    let x = label_x(track.x + offset.min(track.width - 1), &label, area);
    buf.set_string(
        x,
        track.y - 1,
        &label,
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    );
}

fn label_width(label: &str) -> u16 {
    u16::try_from(label.chars().count()).unwrap_or(u16::MAX)
}

/// Left edge of a label centred on `column`, kept inside `area`.
fn label_x(column: u16, label: &str, area: Rect) -> u16 {
    let width = label_width(label);
    column
        .saturating_sub(width / 2)
        .max(area.x)
        .min(area.right().saturating_sub(width))
}
