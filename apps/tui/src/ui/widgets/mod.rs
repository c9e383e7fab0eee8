pub mod charts;
pub mod map;
pub mod popup;
pub mod probe;
pub mod slider;

use ratatui::style::Color;
use stance_atlas::Stance;

pub fn stance_color(stance: Stance) -> Color {
    let (r, g, b) = stance.rgb();
    Color::Rgb(r, g, b)
}
