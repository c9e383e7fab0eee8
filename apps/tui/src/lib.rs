// Export our modules for use in the binary and tests
pub mod atlas;
pub mod config;
pub mod data;
pub mod domain;
pub mod markers;
pub mod player;
pub mod probe;
pub mod projection;
pub mod scale;
pub mod slider;

pub use atlas::Atlas;
pub use domain::{Location, Observation, Stance, TimelinePoint, TweetData};
pub use player::{PlayMode, Player};
