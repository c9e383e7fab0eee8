use crate::data::DataSource;
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATA_SOURCE: &str = "./data";
const DEFAULT_FRAME_LENGTH_MS: u64 = 1_000;
const DEFAULT_MAX_MARKER_RADIUS: f64 = 15.0;
const DEFAULT_MARKER_SCALE: f64 = 3.0;
const DEFAULT_SIZE_QUANTILE: f64 = 0.9995;

/// Runtime settings, resolved from `.env`, the environment and CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_source: DataSource,
    pub frame_length: Duration,
    pub autoplay: bool,
    /// Largest marker radius in map pixels, measured on a 960 pixel wide map.
    pub max_marker_radius: f64,
    /// Terminal cells are coarse, so markers are enlarged by this factor.
    pub marker_scale: f64,
    pub size_quantile: f64,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::parse(DEFAULT_DATA_SOURCE),
            frame_length: Duration::from_millis(DEFAULT_FRAME_LENGTH_MS),
            autoplay: true,
            max_marker_radius: DEFAULT_MAX_MARKER_RADIUS,
            marker_scale: DEFAULT_MARKER_SCALE,
            size_quantile: DEFAULT_SIZE_QUANTILE,
            log_file: None,
            debug: false,
        }
    }
}

/// Initializes the application configuration
pub fn init_app_config() -> Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    /// Builds a config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let data_source = lookup("STANCE_DATA")
            .filter(|value| !value.trim().is_empty())
            .map_or(defaults.data_source, |value| DataSource::parse(&value));

        let frame_ms: u64 = parse_var(&lookup, "FRAME_LENGTH_MS")?.unwrap_or(DEFAULT_FRAME_LENGTH_MS);
        if frame_ms == 0 {
            return Err(eyre!("FRAME_LENGTH_MS must be greater than zero"));
        }

        let autoplay = lookup("AUTOPLAY").map_or(defaults.autoplay, |value| is_truthy(&value));

        let max_marker_radius =
            parse_var(&lookup, "MAX_MARKER_RADIUS")?.unwrap_or(defaults.max_marker_radius);
        let marker_scale = parse_var(&lookup, "MARKER_SCALE")?.unwrap_or(defaults.marker_scale);
        if max_marker_radius <= 0.0 || marker_scale <= 0.0 {
            return Err(eyre!("Marker radius and scale must be positive"));
        }

        let size_quantile: f64 =
            parse_var(&lookup, "SIZE_QUANTILE")?.unwrap_or(defaults.size_quantile);
        if !(0.0..=1.0).contains(&size_quantile) {
            return Err(eyre!("SIZE_QUANTILE must be between 0 and 1, got {size_quantile}"));
        }

        let log_file = lookup("LOG_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let debug = lookup("DEBUG").is_some_and(|value| is_truthy(&value));

        Ok(Self {
            data_source,
            frame_length: Duration::from_millis(frame_ms),
            autoplay,
            max_marker_radius,
            marker_scale,
            size_quantile,
            log_file,
            debug,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| eyre!("Invalid {key} value {value:?}: {e}"))
        })
        .transpose()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() -> Result<()> {
        let config = config_from(&[])?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.frame_length, Duration::from_millis(1_000));
        assert!(config.autoplay);
        Ok(())
    }

    #[test]
    fn variables_override_defaults() -> Result<()> {
        let config = config_from(&[
            ("STANCE_DATA", "https://example.org/data"),
            ("FRAME_LENGTH_MS", "250"),
            ("AUTOPLAY", "false"),
            ("SIZE_QUANTILE", "0.5"),
            ("DEBUG", "1"),
        ])?;
        assert_eq!(
            config.data_source,
            DataSource::Remote("https://example.org/data".to_string())
        );
        assert_eq!(config.frame_length, Duration::from_millis(250));
        assert!(!config.autoplay);
        assert!((config.size_quantile - 0.5).abs() < f64::EPSILON);
        assert!(config.debug);
        Ok(())
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(config_from(&[("FRAME_LENGTH_MS", "soon")]).is_err());
        assert!(config_from(&[("FRAME_LENGTH_MS", "0")]).is_err());
        assert!(config_from(&[("SIZE_QUANTILE", "2")]).is_err());
        assert!(config_from(&[("MARKER_SCALE", "-1")]).is_err());
    }
}
