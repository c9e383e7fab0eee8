use super::dates::parse_date;
use super::raw::{counts_of, hashtags_of, text_of, RawHashtags, RawTimelinePoint, RawTweets};
use super::{DataError, WorldOutline};
use crate::domain::{Location, Observation, Stance, TimelinePoint, TweetData};
use crate::projection::natural_earth1;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;

pub const WORLD_DOCUMENT: &str = "50m.json";
pub const TWEETS_DOCUMENT: &str = "data.json";
pub const HASHTAGS_DOCUMENT: &str = "hashtags.json";
pub const TIMELINE_DOCUMENT: &str = "timeline2.json";

/// Where the four documents live: a local directory or a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Directory(PathBuf),
    Remote(String),
}

impl DataSource {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Remote(value.trim_end_matches('/').to_string())
        } else {
            Self::Directory(PathBuf::from(value))
        }
    }

    async fn read(&self, document: &str) -> Result<Vec<u8>, DataError> {
        match self {
            Self::Directory(dir) => {
                let path = dir.join(document);
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| DataError::Io { path, source })
            }
            Self::Remote(base) => {
                let url = format!("{base}/{document}");
                let http_error = |source| DataError::Http {
                    url: url.clone(),
                    source,
                };
                let response = reqwest::get(&url)
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(http_error)?;
                let bytes = response.bytes().await.map_err(http_error)?;
                Ok(bytes.to_vec())
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, document: &str) -> Result<T, DataError> {
        let bytes = self.read(document).await?;
        serde_json::from_slice(&bytes).map_err(|source| DataError::Json {
            document: document.to_string(),
            source,
        })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(dir) => write!(f, "{}", dir.display()),
            Self::Remote(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub tweets: TweetData,
    /// `None` when the topology is unavailable; the map then draws a
    /// graticule instead of countries.
    pub world: Option<WorldOutline>,
}

/// Fetches all four documents concurrently and reshapes them.
pub async fn load(source: &DataSource) -> Result<LoadedData, DataError> {
    tracing::info!(%source, "loading data documents");

    let (world, tweets, hashtags, timeline) = tokio::join!(
        source.read(WORLD_DOCUMENT),
        source.read_json::<RawTweets>(TWEETS_DOCUMENT),
        source.read_json::<RawHashtags>(HASHTAGS_DOCUMENT),
        source.read_json::<Vec<RawTimelinePoint>>(TIMELINE_DOCUMENT),
    );

    let world = match world.and_then(|bytes| WorldOutline::from_slice(&bytes)) {
        Ok(outline) => {
            tracing::debug!(segments = outline.segment_count(), "decoded world outline");
            Some(outline)
        }
        Err(e) => {
            tracing::warn!("world outline unavailable, drawing graticule: {e}");
            None
        }
    };

    let hashtags = match hashtags {
        Ok(hashtags) => hashtags,
        Err(e) if e.is_not_found() => {
            tracing::warn!("no hashtag document: {e}");
            RawHashtags::default()
        }
        Err(e) => return Err(e),
    };

    let tweets = assemble(tweets?, &hashtags, timeline?)?;
    tracing::info!(
        frames = tweets.frame_count(),
        locations = tweets.location_count(),
        timeline = tweets.timeline.len(),
        "data loaded"
    );

    Ok(LoadedData { tweets, world })
}

/// Reshapes the raw documents into the indexed model and checks that every
/// observation row lines up with the locations and dates.
pub(crate) fn assemble(
    tweets: RawTweets,
    hashtags: &RawHashtags,
    timeline: Vec<RawTimelinePoint>,
) -> Result<TweetData, DataError> {
    let locations: Vec<Location> = tweets
        .columns
        .iter()
        .map(|raw| Location {
            lon: raw.0,
            lat: raw.1,
            place: text_of(&raw.2),
            country: text_of(&raw.3),
            projected: natural_earth1(raw.0, raw.1),
        })
        .collect();

    // The first row of a split frame holds the stance classes, not a date.
    let dates = tweets
        .index
        .iter()
        .skip(1)
        .map(parse_date)
        .collect::<Result<Vec<_>, _>>()?;

    let rows = tweets.data.get(1..).unwrap_or_default();
    if rows.len() != dates.len() {
        return Err(DataError::Shape(format!(
            "{} observation rows for {} dates",
            rows.len(),
            dates.len()
        )));
    }

    let observations = rows
        .iter()
        .enumerate()
        .map(|(frame, row)| {
            if row.len() != locations.len() {
                return Err(DataError::Shape(format!(
                    "frame {frame} has {} entries for {} locations",
                    row.len(),
                    locations.len()
                )));
            }
            let tags = hashtags.data.get(frame);
            Ok(row
                .iter()
                .enumerate()
                .map(|(location, cell)| {
                    let (favor, against) = counts_of(cell);
                    Observation {
                        favor,
                        against,
                        hashtags: hashtags_of(tags.and_then(|row| row.get(location))),
                    }
                })
                .collect())
        })
        .collect::<Result<Vec<Vec<Observation>>, DataError>>()?;

    let timeline = timeline
        .into_iter()
        .map(|point| {
            Ok(TimelinePoint {
                date: parse_date(&point.created_at)?,
                favor: point.value.get(Stance::Favor.index()).copied().flatten(),
                against: point.value.get(Stance::Against.index()).copied().flatten(),
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(TweetData {
        locations,
        dates,
        observations,
        timeline,
    })
}
