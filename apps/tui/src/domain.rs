use chrono::{DateTime, Utc};

/// The two stance classes every observation is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Favor,
    Against,
}

impl Stance {
    pub const ALL: [Self; 2] = [Self::Favor, Self::Against];

    /// Position of this stance in `[favor, against]` pairs.
    pub const fn index(self) -> usize {
        match self {
            Self::Favor => 0,
            Self::Against => 1,
        }
    }

    pub const fn legend_label(self) -> &'static str {
        match self {
            Self::Favor => "# tweets (favor)",
            Self::Against => "# tweets (against)",
        }
    }

    /// Hex colour shared by the map markers and the chart lines.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Favor => (0x3d, 0x9b, 0xd2),
            Self::Against => (0xbb, 0x30, 0x1f),
        }
    }
}

/// A place tweets were geolocated to. `projected` is filled in once at load.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
    pub place: String,
    pub country: String,
    pub projected: (f64, f64),
}

impl Location {
    pub fn title(&self) -> String {
        format!("{}, {}", self.place, self.country)
    }
}

/// Counts for one (frame, location) pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub favor: f64,
    pub against: f64,
    /// Hashtag frequencies in document order.
    pub hashtags: Vec<(String, u64)>,
}

impl Observation {
    pub fn max_count(&self) -> f64 {
        self.favor.max(self.against)
    }

    pub fn total(&self) -> f64 {
        self.favor + self.against
    }
}

/// Aggregate counts for one date on the line chart. Missing values stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub date: DateTime<Utc>,
    pub favor: Option<f64>,
    pub against: Option<f64>,
}

impl TimelinePoint {
    pub const fn value(&self, stance: Stance) -> Option<f64> {
        match stance {
            Stance::Favor => self.favor,
            Stance::Against => self.against,
        }
    }

    /// Sum of the stances present; `None` only when both are missing.
    pub fn total(&self) -> Option<f64> {
        match (self.favor, self.against) {
            (None, None) => None,
            (favor, against) => Some(favor.unwrap_or(0.0) + against.unwrap_or(0.0)),
        }
    }
}

/// Everything the dashboard renders, indexed by frame and location.
#[derive(Debug, Clone, Default)]
pub struct TweetData {
    pub locations: Vec<Location>,
    pub dates: Vec<DateTime<Utc>>,
    /// `observations[frame][location]`
    pub observations: Vec<Vec<Observation>>,
    pub timeline: Vec<TimelinePoint>,
}

impl TweetData {
    pub fn frame_count(&self) -> usize {
        self.dates.len()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn observation(&self, frame: usize, location: usize) -> Option<&Observation> {
        self.observations.get(frame)?.get(location)
    }

    pub fn date(&self, frame: usize) -> Option<DateTime<Utc>> {
        self.dates.get(frame).copied()
    }

    /// Every per-(frame, location) maximum count, the population the marker
    /// size scale is fitted to.
    pub fn max_counts(&self) -> Vec<f64> {
        self.observations
            .iter()
            .flatten()
            .map(Observation::max_count)
            .collect()
    }

    pub fn max_timeline_total(&self) -> f64 {
        self.timeline
            .iter()
            .filter_map(TimelinePoint::total)
            .fold(0.0, f64::max)
    }

    pub fn date_extent(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.dates.iter().min()?;
        let last = self.dates.iter().max()?;
        Some((*first, *last))
    }

    /// Locations ranked by total count at `frame`, largest first.
    pub fn ranked_locations(&self, frame: usize) -> Vec<usize> {
        let Some(row) = self.observations.get(frame) else {
            return Vec::new();
        };
        let mut indices: Vec<usize> = (0..row.len()).collect();
        indices.sort_by(|a, b| row[*b].total().total_cmp(&row[*a].total()));
        indices
    }
}
