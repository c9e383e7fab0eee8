//! Loading and reshaping the four JSON documents behind the dashboard.

pub mod dates;
pub mod error;
pub mod loader;
mod raw;
pub mod topology;

pub use error::DataError;
pub use loader::{load, DataSource, LoadedData};
pub use topology::WorldOutline;
