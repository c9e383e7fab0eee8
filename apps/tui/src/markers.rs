//! Marker radii for one location at one frame.

use crate::domain::{Observation, TweetData};
use crate::scale::SqrtScale;

/// Radii of the two concentric circles drawn for a location.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkerRadii {
    pub favor: f64,
    pub against: f64,
}

impl MarkerRadii {
    /// The favor circle uses the square-root scale directly. The against
    /// circle is drawn relative to it, `size(favor) * against / favor`, so the
    /// two circles stay comparable within a location.
    pub fn of(observation: &Observation, scale: &SqrtScale) -> Self {
        let favor = scale.apply(observation.favor);
        let against = if observation.favor > 0.0 && observation.against > 0.0 {
            favor * observation.against / observation.favor
        } else {
            0.0
        };
        Self { favor, against }
    }

    /// Radii of a weighted mix of frames; `None` when no frame has a row
    /// for `location`.
    pub fn blended(
        data: &TweetData,
        blend: &[(usize, f64)],
        location: usize,
        scale: &SqrtScale,
    ) -> Option<Self> {
        blend
            .iter()
            .filter_map(|&(frame, weight)| {
                let radii = Self::of(data.observation(frame, location)?, scale);
                Some((radii, weight))
            })
            .fold(None, |sum: Option<Self>, (radii, weight)| {
                let sum = sum.unwrap_or_default();
                Some(Self {
                    favor: radii.favor.mul_add(weight, sum.favor),
                    against: radii.against.mul_add(weight, sum.against),
                })
            })
    }

    pub fn lerp(self, target: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            favor: (target.favor - self.favor).mul_add(t, self.favor),
            against: (target.against - self.against).mul_add(t, self.against),
        }
    }

    pub fn largest(self) -> f64 {
        self.favor.max(self.against)
    }
}

/// One location's marker ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMarker {
    pub location: usize,
    pub x: f64,
    pub y: f64,
    pub radii: MarkerRadii,
}

/// Markers for `frame`, tweened from the `from` blend by `progress`, ordered
/// largest first so smaller circles are painted on top.
pub fn frame_markers(
    data: &TweetData,
    scale: &SqrtScale,
    frame: usize,
    from: Option<&[(usize, f64)]>,
    progress: f64,
) -> Vec<PlacedMarker> {
    let mut markers: Vec<PlacedMarker> = data
        .locations
        .iter()
        .enumerate()
        .filter_map(|(index, location)| {
            let target = MarkerRadii::of(data.observation(frame, index)?, scale);
            let radii = from
                .and_then(|blend| MarkerRadii::blended(data, blend, index, scale))
                .map_or(target, |start| start.lerp(target, progress));
            Some(PlacedMarker {
                location: index,
                x: location.projected.0,
                y: location.projected.1,
                radii,
            })
        })
        .collect();

    markers.sort_by(|a, b| b.radii.largest().total_cmp(&a.radii.largest()));
    markers
}

/// The marker under `point`, preferring the smallest (top-most) one.
/// `tolerance` widens tiny markers so they stay hoverable.
pub fn hit_test(markers: &[PlacedMarker], point: (f64, f64), tolerance: f64) -> Option<usize> {
    markers
        .iter()
        .filter(|marker| marker.radii.largest() > 0.0)
        .filter(|marker| {
            let distance = (marker.x - point.0).hypot(marker.y - point.1);
            distance <= marker.radii.largest().max(tolerance)
        })
        .min_by(|a, b| a.radii.largest().total_cmp(&b.radii.largest()))
        .map(|marker| marker.location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    fn observation(favor: f64, against: f64) -> Observation {
        Observation {
            favor,
            against,
            hashtags: Vec::new(),
        }
    }

    fn location(x: f64, y: f64) -> Location {
        Location {
            lon: 0.0,
            lat: 0.0,
            place: "p".to_string(),
            country: "c".to_string(),
            projected: (x, y),
        }
    }

    #[test]
    fn zero_counts_draw_nothing() {
        let scale = SqrtScale::new(100.0, 15.0);
        let radii = MarkerRadii::of(&observation(0.0, 40.0), &scale);
        assert!(radii.favor.abs() < f64::EPSILON);
        assert!(radii.against.abs() < f64::EPSILON);
    }

    #[test]
    fn against_circle_is_proportional_to_favor() {
        let scale = SqrtScale::new(100.0, 10.0);
        let radii = MarkerRadii::of(&observation(100.0, 50.0), &scale);
        assert!((radii.favor - 10.0).abs() < 1e-9);
        assert!((radii.against - 5.0).abs() < 1e-9);
    }

    #[test]
    fn radii_grow_with_counts() {
        let scale = SqrtScale::new(500.0, 15.0);
        let mut previous = MarkerRadii::default();
        for count in 0..200 {
            let count = f64::from(count);
            let radii = MarkerRadii::of(&observation(count, count / 2.0), &scale);
            assert!(radii.favor >= previous.favor);
            assert!(radii.against >= previous.against);
            assert!(radii.against >= 0.0);
            previous = radii;
        }
    }

    #[test]
    fn lerp_runs_from_start_to_target() {
        let start = MarkerRadii {
            favor: 2.0,
            against: 0.0,
        };
        let end = MarkerRadii {
            favor: 4.0,
            against: 2.0,
        };
        assert_eq!(start.lerp(end, 0.0), start);
        assert_eq!(start.lerp(end, 1.0), end);
        assert_eq!(
            start.lerp(end, 0.5),
            MarkerRadii {
                favor: 3.0,
                against: 1.0
            }
        );
    }

    #[test]
    fn tween_starts_from_blended_radii() {
        let data = TweetData {
            locations: vec![location(0.0, 0.0)],
            observations: vec![
                vec![observation(0.0, 0.0)],
                vec![observation(100.0, 50.0)],
                vec![observation(25.0, 0.0)],
            ],
            ..TweetData::default()
        };
        let scale = SqrtScale::new(100.0, 10.0);

        // Halfway from frame 0 to frame 1 the favor circle is at 5.
        let halfway: &[(usize, f64)] = &[(0, 0.5), (1, 0.5)];
        let shown = MarkerRadii::blended(&data, halfway, 0, &scale);
        assert_eq!(
            shown,
            Some(MarkerRadii {
                favor: 5.0,
                against: 2.5
            })
        );

        let markers = frame_markers(&data, &scale, 2, Some(halfway), 0.0);
        assert!((markers[0].radii.favor - 5.0).abs() < 1e-9);
        let markers = frame_markers(&data, &scale, 2, Some(halfway), 1.0);
        assert!((markers[0].radii.favor - 5.0).abs() < 1e-9);
        assert!(markers[0].radii.against.abs() < 1e-9);

        assert_eq!(MarkerRadii::blended(&data, &[(9, 1.0)], 0, &scale), None);
    }

    #[test]
    fn markers_are_sorted_and_hit_smallest() {
        let data = TweetData {
            locations: vec![location(0.0, 0.0), location(0.1, 0.0)],
            observations: vec![vec![observation(100.0, 0.0), observation(4.0, 0.0)]],
            ..TweetData::default()
        };
        let scale = SqrtScale::new(100.0, 1.0);
        let markers = frame_markers(&data, &scale, 0, None, 1.0);
        assert_eq!(markers[0].location, 0);
        assert_eq!(markers[1].location, 1);

        assert_eq!(hit_test(&markers, (0.1, 0.0), 0.01), Some(1));
        assert_eq!(hit_test(&markers, (-0.5, 0.0), 0.01), Some(0));
        assert_eq!(hit_test(&markers, (5.0, 5.0), 0.01), None);
    }
}
