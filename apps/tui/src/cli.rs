use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "stance-atlas",
    version,
    about = "World map, timeline and scrubber for tweet stance data"
)]
pub struct CliArgs {
    /// Directory or base URL holding 50m.json, data.json, hashtags.json and timeline2.json
    #[arg(long, value_name = "PATH|URL")]
    pub data: Option<String>,

    /// Milliseconds each frame stays on screen while playing
    #[arg(long = "frame-ms", value_name = "MS")]
    pub frame_ms: Option<u64>,

    /// Start with the animation paused
    #[arg(long)]
    pub paused: bool,

    /// Print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Frame to describe in headless mode
    #[arg(long, value_name = "INDEX", default_value_t = 0)]
    pub frame: usize,

    /// Number of locations listed in headless mode
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top: usize,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Write logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(data) = &self.data {
            std::env::set_var("STANCE_DATA", data);
        }
        if let Some(ms) = self.frame_ms {
            std::env::set_var("FRAME_LENGTH_MS", ms.to_string());
        }
        if self.paused {
            std::env::set_var("AUTOPLAY", "false");
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
