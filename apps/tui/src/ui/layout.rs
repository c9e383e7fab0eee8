use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use stance_atlas::projection::MapViewport;
use stance_atlas::slider::SliderScale;

/// Horizontal padding either side of the slider track.
pub const SLIDER_MARGIN: u16 = 4;

/// Screen regions of the dashboard. Rendering and mouse hit testing both
/// derive their rectangles from here so they never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub title: Rect,
    pub map: Rect,
    pub chart: Rect,
    pub slider: Rect,
    pub shortcuts: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title and playback state
                Constraint::Min(10),    // Map
                Constraint::Length(11), // Timeline chart
                Constraint::Length(3),  // Slider
                Constraint::Length(1),  // Shortcuts hint
            ])
            .split(area);

        Self {
            title: chunks[0],
            map: chunks[1],
            chart: chunks[2],
            slider: chunks[3],
            shortcuts: chunks[4],
        }
    }

    /// Drawable canvas inside the map border.
    pub fn map_inner(&self) -> Rect {
        self.map.inner(Margin::new(1, 1))
    }

    /// The single row the slider handle moves along.
    pub fn slider_track(&self) -> Rect {
        Rect {
            x: self.slider.x + SLIDER_MARGIN.min(self.slider.width / 2),
            y: self.slider.y + 1.min(self.slider.height.saturating_sub(1)),
            width: self.slider.width.saturating_sub(SLIDER_MARGIN * 2),
            height: 1.min(self.slider.height),
        }
    }

    pub fn slider_scale(&self, frame_count: usize) -> SliderScale {
        SliderScale::new(frame_count, self.slider_track().width)
    }

    pub fn in_slider(&self, column: u16, row: u16) -> bool {
        contains(self.slider, column, row)
    }

    /// Offset along the track, clamped to its ends.
    pub fn track_offset(&self, column: u16) -> u16 {
        let track = self.slider_track();
        column
            .saturating_sub(track.x)
            .min(track.width.saturating_sub(1))
    }

    /// Offset along the track if `column` lies on it.
    pub fn track_offset_strict(&self, column: u16) -> Option<u16> {
        let track = self.slider_track();
        (column >= track.x && column < track.x + track.width).then(|| column - track.x)
    }

    /// Projected coordinates under a terminal cell of the map canvas.
    pub fn map_point_at(&self, column: u16, row: u16, viewport: &MapViewport) -> Option<(f64, f64)> {
        let inner = self.map_inner();
        if !contains(inner, column, row) {
            return None;
        }
        let fx = (f64::from(column - inner.x) + 0.5) / f64::from(inner.width);
        let fy = (f64::from(row - inner.y) + 0.5) / f64::from(inner.height);
        Some(viewport.unproject_fraction(fx, fy))
    }

    /// Terminal cell showing projected `point`, if it is in view.
    pub fn map_cell_of(&self, point: (f64, f64), viewport: &MapViewport) -> Option<(u16, u16)> {
        let inner = self.map_inner();
        let [x0, x1] = viewport.x_bounds();
        let [y0, y1] = viewport.y_bounds();
        let fx = (point.0 - x0) / (x1 - x0);
        let fy = (y1 - point.1) / (y1 - y0);
        if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cell = (
            inner.x + (fx * f64::from(inner.width)) as u16,
            inner.y + (fy * f64::from(inner.height)) as u16,
        );
        Some(cell)
    }
}

pub const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DashboardLayout {
        DashboardLayout::new(Rect::new(0, 0, 100, 40))
    }

    #[test]
    fn regions_stack_without_overlap() {
        let layout = layout();
        assert_eq!(layout.title.y, 0);
        assert_eq!(layout.map.y, layout.title.bottom());
        assert_eq!(layout.chart.y, layout.map.bottom());
        assert_eq!(layout.slider.y, layout.chart.bottom());
        assert_eq!(layout.shortcuts.bottom(), 40);
    }

    #[test]
    fn track_offsets_clamp_to_track() {
        let layout = layout();
        let track = layout.slider_track();
        assert_eq!(track.width, 100 - SLIDER_MARGIN * 2);
        assert_eq!(layout.track_offset(0), 0);
        assert_eq!(layout.track_offset(99), track.width - 1);
        assert_eq!(layout.track_offset_strict(0), None);
        assert_eq!(layout.track_offset_strict(track.x + 3), Some(3));
    }

    #[test]
    fn map_cells_round_trip_through_projection() -> Result<(), Box<dyn std::error::Error>> {
        let layout = layout();
        let viewport = MapViewport::default();
        let inner = layout.map_inner();
        let (column, row) = (inner.x + 10, inner.y + 5);
        let point = layout
            .map_point_at(column, row, &viewport)
            .ok_or("cell inside the map")?;
        assert_eq!(layout.map_cell_of(point, &viewport), Some((column, row)));
        assert_eq!(layout.map_point_at(0, 0, &viewport), None);
        Ok(())
    }
}
