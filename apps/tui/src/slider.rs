//! Mapping between frames and slider columns, plus the axis under the track.

use chrono::{DateTime, Utc};

/// Width in cells reserved for one axis label such as "28 Feb".
const LABEL_WIDTH: usize = 8;

/// Maps frame indices onto a track `width` cells wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderScale {
    frame_count: usize,
    width: u16,
}

impl SliderScale {
    pub const fn new(frame_count: usize, width: u16) -> Self {
        Self { frame_count, width }
    }

    /// Column offset of the handle for `frame`, from 0 to `width - 1`.
    pub fn column_of(&self, frame: usize) -> u16 {
        if self.frame_count <= 1 || self.width <= 1 {
            return 0;
        }
        let frame = frame.min(self.frame_count - 1);
        let span = f64::from(self.width - 1);
        let fraction = frame as f64 / (self.frame_count - 1) as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let column = (fraction * span).round() as u16;
        column
    }

    /// Nearest frame to a column offset; offsets past the track clamp.
    pub fn frame_at(&self, column: u16) -> usize {
        if self.frame_count <= 1 || self.width <= 1 {
            return 0;
        }
        let column = column.min(self.width - 1);
        let fraction = f64::from(column) / f64::from(self.width - 1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let frame = (fraction * (self.frame_count - 1) as f64).round() as usize;
        frame.min(self.frame_count - 1)
    }

    pub const fn width(&self) -> u16 {
        self.width
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisTick {
    pub frame: usize,
    pub column: u16,
    pub label: String,
}

/// Short day-month label used on the axis and in the slider probe.
pub fn day_month(date: DateTime<Utc>) -> String {
    date.format("%-d %b").to_string()
}

/// Evenly spaced labelled ticks that fit the track, always including the
/// first and the last frame.
pub fn axis_ticks(scale: &SliderScale, dates: &[DateTime<Utc>]) -> Vec<AxisTick> {
    let count = dates.len();
    if count == 0 {
        return Vec::new();
    }

    let max_labels = (usize::from(scale.width()) / LABEL_WIDTH).max(2);
    let step = count.div_ceil(max_labels).max(1);

    let mut frames: Vec<usize> = (0..count).step_by(step).collect();
    if let Some(&last) = frames.last() {
        if last != count - 1 {
            // Drop a tick that would collide with the final label.
            if count - 1 - last < step / 2 + 1 && frames.len() > 1 {
                frames.pop();
            }
            frames.push(count - 1);
        }
    }

    frames
        .into_iter()
        .map(|frame| AxisTick {
            frame,
            column: scale.column_of(frame),
            label: day_month(dates[frame]),
        })
        .collect()
}
