mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use stance_atlas::config::{init_app_config, AppConfig};
use stance_atlas::data::load;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILE: &str = "stance-atlas.log";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Check if we're running in a terminal
    let headless = args.headless || !is_terminal();
    init_tracing(&config, headless)?;

    if headless {
        let options = event::HeadlessOptions {
            json: args.json,
            frame: args.frame,
            top: args.top,
        };
        return event::run_headless(&config, options).await;
    }

    // Load in the background so the throbber can spin meanwhile
    let (sender, receiver) = oneshot::channel();
    let source = config.data_source.clone();
    tokio::spawn(async move {
        if sender.send(load(&source).await).is_err() {
            tracing::debug!("ui exited before data finished loading");
        }
    });

    let mut app = App::new(config, Instant::now());

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app, receiver);
    terminal::cleanup(true, true);

    result
}

/// Logs go to stderr in headless mode. The TUI owns the screen, so
/// interactive runs only log when a file is configured or debug is on.
fn init_tracing(config: &AppConfig, headless: bool) -> Result<()> {
    let level = if config.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let path = match (&config.log_file, config.debug) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(DEFAULT_LOG_FILE),
        (None, false) => return Ok(()),
    };
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    tracing::info!(path = %path.display(), "logging to file");
    Ok(())
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
