mod settings;

pub use settings::{init_app_config, AppConfig, DEFAULT_DATA_SOURCE};
