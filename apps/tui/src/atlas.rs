//! The loaded dataset together with everything derived from it once: the
//! fitted marker scale, chart series and summary figures.

use crate::config::AppConfig;
use crate::data::{LoadedData, WorldOutline};
use crate::domain::{Stance, TweetData};
use crate::markers::{frame_markers, PlacedMarker};
use crate::probe::ProbeContent;
use crate::projection::world_width;
use crate::scale::{format_significant, ticks, SqrtScale};
use serde::Serialize;

/// Width in pixels of the map the marker radii are specified against.
pub const REFERENCE_MAP_WIDTH: f64 = 960.0;
const LEGEND_TICKS: usize = 5;

#[derive(Debug, Clone)]
pub struct Atlas {
    pub data: TweetData,
    pub world: Option<WorldOutline>,
    pub size_scale: SqrtScale,
    /// Projected units per map pixel, including the terminal enlargement.
    unit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub value: f64,
    pub label: String,
    /// Radius in projected units.
    pub radius: f64,
}

/// Contiguous runs of defined values; missing points break the line.
pub type Segments = Vec<Vec<(f64, f64)>>;

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub frames: usize,
    pub locations: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub size_domain_max: f64,
    pub peak_frame: Option<usize>,
    pub peak_total: f64,
}

impl Atlas {
    pub fn new(loaded: LoadedData, config: &AppConfig) -> Self {
        let size_scale = SqrtScale::fitted(
            &loaded.tweets.max_counts(),
            config.size_quantile,
            config.max_marker_radius,
        );
        tracing::debug!(
            domain_max = size_scale.domain_max(),
            quantile = config.size_quantile,
            "fitted marker scale"
        );
        Self {
            data: loaded.tweets,
            world: loaded.world,
            size_scale,
            unit: world_width() / REFERENCE_MAP_WIDTH * config.marker_scale,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.data.frame_count()
    }

    /// Markers in projected units, tweened from `from` by `progress`.
    pub fn markers(
        &self,
        frame: usize,
        from: Option<&[(usize, f64)]>,
        progress: f64,
    ) -> Vec<PlacedMarker> {
        let mut markers = frame_markers(&self.data, &self.size_scale, frame, from, progress);
        for marker in &mut markers {
            marker.radii.favor *= self.unit;
            marker.radii.against *= self.unit;
        }
        markers
    }

    pub fn probe(&self, location: usize, frame: usize) -> Option<ProbeContent> {
        ProbeContent::build(&self.data, location, frame)
    }

    /// Size legend: non-zero ticks, largest first.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.size_scale
            .ticks(LEGEND_TICKS)
            .into_iter()
            .filter(|value| *value != 0.0)
            .rev()
            .map(|value| LegendEntry {
                value,
                label: format_significant(value),
                radius: self.size_scale.apply(value) * self.unit,
            })
            .collect()
    }

    /// Chart series for one stance, x in epoch seconds.
    pub fn series(&self, stance: Stance) -> Segments {
        let mut segments: Segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.data.timeline {
            match point.value(stance).filter(|value| value.is_finite()) {
                Some(value) => current.push((epoch_seconds(point.date), value)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Chart x extent from the frame dates, in epoch seconds.
    pub fn chart_x_bounds(&self) -> [f64; 2] {
        self.data.date_extent().map_or([0.0, 1.0], |(first, last)| {
            let (first, last) = (epoch_seconds(first), epoch_seconds(last));
            if last > first {
                [first, last]
            } else {
                [first - 1.0, first + 1.0]
            }
        })
    }

    pub fn chart_y_max(&self) -> f64 {
        let max = self.data.max_timeline_total();
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    /// Evenly spaced nice ticks from zero, the last one covering the largest
    /// timeline total. The last tick doubles as the y axis bound.
    pub fn chart_y_ticks(&self, count: usize) -> Vec<f64> {
        let max = self.chart_y_max();
        let mut values = ticks(0.0, max, count);
        let extra = match values[..] {
            [.., previous, last] if last < max => Some(last + (last - previous)),
            [_, _, ..] => None,
            _ => return vec![0.0, max],
        };
        values.extend(extra);
        values
    }

    /// x position of the guide for `frame`.
    pub fn guide_x(&self, frame: usize) -> Option<f64> {
        self.data.date(frame).map(epoch_seconds)
    }

    pub fn summary(&self) -> Summary {
        let date = |frame: Option<usize>| {
            frame
                .and_then(|frame| self.data.date(frame))
                .map(|date| date.format("%Y-%m-%d").to_string())
        };
        let totals = self
            .data
            .observations
            .iter()
            .map(|row| row.iter().map(crate::domain::Observation::total).sum::<f64>());
        let peak = totals
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1));

        let frames = self.data.frame_count();
        Summary {
            frames,
            locations: self.data.location_count(),
            first_date: date((frames > 0).then_some(0)),
            last_date: date(frames.checked_sub(1)),
            size_domain_max: self.size_scale.domain_max(),
            peak_frame: peak.map(|(frame, _)| frame),
            peak_total: peak.map_or(0.0, |(_, total)| total),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
pub fn epoch_seconds(date: chrono::DateTime<chrono::Utc>) -> f64 {
    date.timestamp() as f64
}
