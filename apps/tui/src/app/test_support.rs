use crate::app::App;
use chrono::{TimeZone, Utc};
use ratatui::layout::Rect;
use stance_atlas::config::AppConfig;
use stance_atlas::data::LoadedData;
use stance_atlas::domain::{Location, Observation, TweetData};
use stance_atlas::projection::natural_earth1;
use std::time::Instant;

/// Two locations over three daily frames.
pub fn loaded() -> LoadedData {
    let date = |day| {
        Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0)
            .single()
            .unwrap_or_default()
    };
    let obs = |favor: f64| Observation {
        favor,
        against: favor / 2.0,
        hashtags: vec![("#tag".to_string(), 1)],
    };
    let location = |lon: f64, lat: f64, place: &str, country: &str| Location {
        lon,
        lat,
        place: place.to_string(),
        country: country.to_string(),
        projected: natural_earth1(lon, lat),
    };
    LoadedData {
        tweets: TweetData {
            locations: vec![
                location(0.0, 0.0, "Null Island", "Atlantic"),
                location(13.4, 52.5, "Berlin", "Germany"),
            ],
            dates: vec![date(1), date(2), date(3)],
            observations: vec![
                vec![obs(10.0), obs(20.0)],
                vec![obs(30.0), obs(40.0)],
                vec![obs(50.0), obs(60.0)],
            ],
            timeline: Vec::new(),
        },
        world: None,
    }
}

/// A loaded app laid out on a 120×40 screen.
pub fn ready_app(now: Instant) -> App {
    let mut app = App::new(AppConfig::default(), now);
    app.on_loaded(Ok(loaded()), now);
    app.screen_area = Rect::new(0, 0, 120, 40);
    app
}
