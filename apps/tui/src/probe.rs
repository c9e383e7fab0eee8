//! Tooltip ("probe") content for one location at one frame.

use crate::domain::TweetData;
use crate::scale::format_count;
use serde::Serialize;

pub const TOP_HASHTAGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeContent {
    pub location: usize,
    pub frame: usize,
    pub title: String,
    pub favor: f64,
    pub against: f64,
    /// First hashtags in document order, not ranked by frequency.
    pub hashtags: Vec<String>,
    pub date: String,
}

impl ProbeContent {
    /// `None` when either index is out of range.
    pub fn build(data: &TweetData, location: usize, frame: usize) -> Option<Self> {
        let place = data.locations.get(location)?;
        let observation = data.observation(frame, location)?;
        let date = data
            .date(frame)
            .map(|date| date.format("%a %b %d %Y").to_string())
            .unwrap_or_default();

        Some(Self {
            location,
            frame,
            title: place.title(),
            favor: observation.favor,
            against: observation.against,
            hashtags: observation
                .hashtags
                .iter()
                .take(TOP_HASHTAGS)
                .map(|(tag, _)| tag.clone())
                .collect(),
            date,
        })
    }

    pub fn counts_line(&self) -> String {
        format!(
            "{} favor {} against",
            format_count(self.favor),
            format_count(self.against)
        )
    }

    pub fn hashtags_line(&self) -> String {
        format!("Top hashtags: {}", self.hashtags.join(", "))
    }

    pub fn lines(&self) -> [String; 4] {
        [
            self.title.clone(),
            self.counts_line(),
            self.hashtags_line(),
            self.date.clone(),
        ]
    }
}
