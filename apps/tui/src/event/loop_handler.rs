use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use stance_atlas::atlas::Summary;
use stance_atlas::config::AppConfig;
use stance_atlas::data::{load, DataError, LoadedData};
use stance_atlas::probe::ProbeContent;
use stance_atlas::Atlas;
use std::io::Stdout;
use std::time::{Duration, Instant};
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::app::{handle_key, handle_mouse, App, LoadState};
use crate::ui;

pub type LoadReceiver = oneshot::Receiver<Result<LoadedData, DataError>>;

/// What headless mode prints.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessOptions {
    pub json: bool,
    pub frame: usize,
    pub top: usize,
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(config: &AppConfig, options: HeadlessOptions) -> Result<()> {
    let loaded = load(&config.data_source).await?;
    let atlas = Atlas::new(loaded, config);
    let report = build_headless_report(&atlas, config, options)?;

    if options.json {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{json}");
    } else {
        render_headless_stats(&report);
    }

    Ok(())
}

fn build_headless_report(
    atlas: &Atlas,
    config: &AppConfig,
    options: HeadlessOptions,
) -> Result<HeadlessReport> {
    let frames = atlas.frame_count();
    if frames > 0 && options.frame >= frames {
        return Err(eyre!(
            "Frame {} is out of range, the data has {frames} frames",
            options.frame
        ));
    }

    let locations = atlas
        .data
        .ranked_locations(options.frame)
        .into_iter()
        .take(options.top)
        .filter_map(|location| atlas.probe(location, options.frame))
        .collect();

    Ok(HeadlessReport {
        source: config.data_source.to_string(),
        summary: atlas.summary(),
        frame: options.frame,
        date: atlas
            .data
            .date(options.frame)
            .map(|date| date.format("%a %b %d %Y").to_string()),
        locations,
    })
}

fn render_headless_stats(report: &HeadlessReport) {
    let summary = &report.summary;

    println!("\nStance Atlas");
    println!("============");
    println!("Source: {}", report.source);
    match (&summary.first_date, &summary.last_date) {
        (Some(first), Some(last)) => {
            println!("Frames: {} ({first} to {last})", summary.frames);
        }
        _ => println!("Frames: {}", summary.frames),
    }
    println!("Locations: {}", summary.locations);
    println!(
        "Marker scale domain: 0 to {}",
        stance_atlas::scale::format_count(summary.size_domain_max)
    );
    if let Some(peak) = summary.peak_frame {
        println!(
            "Peak frame: {} ({} tweets)",
            peak + 1,
            stance_atlas::scale::format_count(summary.peak_total)
        );
    }

    let Some(date) = &report.date else {
        return;
    };
    println!(
        "\nTop locations on {date} (frame {}/{}):",
        report.frame + 1,
        summary.frames
    );
    for probe in &report.locations {
        println!(
            "- {} | {} | {}",
            probe.title,
            probe.counts_line(),
            probe.hashtags_line()
        );
    }
}

#[derive(serde::Serialize)]
struct HeadlessReport {
    source: String,
    summary: Summary,
    frame: usize,
    date: Option<String>,
    locations: Vec<ProbeContent>,
}

/// Run the main application event loop
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    loaded: LoadReceiver,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 33;

    let mut pending = Some(loaded);

    loop {
        if let Some(receiver) = pending.as_mut() {
            match receiver.try_recv() {
                Ok(result) => {
                    app.on_loaded(result, Instant::now());
                    pending = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    tracing::error!("data loader stopped without a result");
                    app.load = LoadState::Failed("Data loader stopped unexpectedly".to_string());
                    pending = None;
                }
            }
        }

        app.update(Instant::now());

        let size = terminal.size()?;
        app.screen_area = Rect::new(0, 0, size.width, size.height);

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_key(app, key, Instant::now());
                }
                Ok(Event::Mouse(mouse)) => handle_mouse(app, mouse, Instant::now()),
                Ok(Event::Resize(width, height)) => {
                    tracing::debug!(width, height, "terminal resized");
                    app.hover = None;
                    app.slider_hover = None;
                }
                Ok(Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {}
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::loaded;

    fn atlas() -> Atlas {
        Atlas::new(loaded(), &AppConfig::default())
    }

    #[test]
    fn report_ranks_locations_for_the_frame() -> Result<()> {
        let options = HeadlessOptions {
            json: true,
            frame: 2,
            top: 1,
        };
        let report = build_headless_report(&atlas(), &AppConfig::default(), options)?;
        assert_eq!(report.locations.len(), 1);
        assert_eq!(report.locations[0].title, "Berlin, Germany");
        assert_eq!(report.locations[0].counts_line(), "60 favor 30 against");
        assert_eq!(report.date.as_deref(), Some("Fri Jan 03 2020"));

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["summary"]["frames"], 3);
        assert_eq!(json["locations"][0]["hashtags"][0], "#tag");
        Ok(())
    }

    #[test]
    fn out_of_range_frame_is_an_error() {
        let options = HeadlessOptions {
            json: false,
            frame: 7,
            top: 5,
        };
        assert!(build_headless_report(&atlas(), &AppConfig::default(), options).is_err());
    }
}
