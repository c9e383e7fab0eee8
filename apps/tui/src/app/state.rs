use crate::ui::layout::DashboardLayout;
use ratatui::layout::Rect;
use stance_atlas::config::AppConfig;
use stance_atlas::data::{DataError, LoadedData};
use stance_atlas::player::FrameBlend;
use stance_atlas::probe::ProbeContent;
use stance_atlas::projection::MapViewport;
use stance_atlas::{Atlas, Player};
use std::time::Instant;
use throbber_widgets_tui::ThrobberState;

#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Box<Atlas>),
    Failed(String),
}

/// Where the probe popup is anchored and which location it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hover {
    pub location: usize,
    pub column: u16,
    pub row: u16,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub config: AppConfig,
    pub load: LoadState,
    pub player: Player,
    pub viewport: MapViewport,
    /// Location under the mouse pointer.
    pub hover: Option<Hover>,
    /// Location chosen from the keyboard; the mouse takes precedence.
    pub selected_location: Option<usize>,
    /// Column offset along the slider track under the pointer.
    pub slider_hover: Option<u16>,
    pub show_help: bool,
    pub status_message: String,
    pub screen_area: Rect,
    pub throbber: ThrobberState,
    pub last_frame: Instant,
}

impl App {
    pub fn new(config: AppConfig, now: Instant) -> Self {
        let player = Player::new(0, config.frame_length, config.autoplay, now);
        Self {
            running: true,
            config,
            load: LoadState::Loading,
            player,
            viewport: MapViewport::default(),
            hover: None,
            selected_location: None,
            slider_hover: None,
            show_help: false,
            status_message: String::new(),
            screen_area: Rect::default(),
            throbber: ThrobberState::default(),
            last_frame: now,
        }
    }

    pub fn atlas(&self) -> Option<&Atlas> {
        match &self.load {
            LoadState::Ready(atlas) => Some(&**atlas),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    pub fn layout(&self) -> DashboardLayout {
        DashboardLayout::new(self.screen_area)
    }

    pub fn on_loaded(&mut self, result: Result<LoadedData, DataError>, now: Instant) {
        match result {
            Ok(loaded) => {
                let atlas = Atlas::new(loaded, &self.config);
                self.player = Player::new(
                    atlas.frame_count(),
                    self.config.frame_length,
                    self.config.autoplay,
                    now,
                );
                self.status_message = if atlas.world.is_some() {
                    String::new()
                } else {
                    "No world outline found; drawing graticule only".to_string()
                };
                self.load = LoadState::Ready(Box::new(atlas));
            }
            Err(e) => {
                tracing::error!("data load failed: {e}");
                self.load = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn update(&mut self, now: Instant) {
        self.last_frame = now;
        match self.load {
            LoadState::Loading => self.throbber.calc_next(),
            LoadState::Ready(_) => {
                self.player.tick(now);
            }
            LoadState::Failed(_) => {}
        }
    }

    pub fn toggle_playback(&mut self, now: Instant) {
        let mode = self.player.toggle(now);
        tracing::debug!(mode = mode.label(), "playback toggled");
    }

    /// The location the probe should describe, if any.
    pub fn probe_location(&self) -> Option<usize> {
        self.hover
            .map(|hover| hover.location)
            .or(self.selected_location)
    }

    /// Probe content for the probed location at the current frame.
    pub fn probe(&self) -> Option<ProbeContent> {
        let atlas = self.atlas()?;
        atlas.probe(self.probe_location()?, self.player.frame())
    }

    /// Tween source and progress for the markers at `now`.
    pub fn transition_state(&self, now: Instant) -> (Option<FrameBlend>, f64) {
        let progress = self.player.transition_progress(now);
        let from = self
            .player
            .transition()
            .filter(|_| progress < 1.0)
            .map(|transition| transition.from.clone());
        (from, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::loaded;
    use std::time::Duration;

    #[test]
    fn loading_resets_player_to_dataset_length() {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), now);
        assert!(app.atlas().is_none());

        app.on_loaded(Ok(loaded()), now);
        assert!(app.atlas().is_some());
        assert_eq!(app.player.frame_count(), 3);
        assert!(app.player.is_playing());

        app.update(now + Duration::from_millis(1_000));
        assert_eq!(app.player.frame(), 1);
    }

    #[test]
    fn failed_load_is_reported() {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), now);
        app.on_loaded(Err(DataError::Shape("broken".to_string())), now);
        assert!(matches!(app.load, LoadState::Failed(ref message) if message.contains("broken")));
    }

    #[test]
    fn probe_follows_current_frame() -> Result<(), Box<dyn std::error::Error>> {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), now);
        app.on_loaded(Ok(loaded()), now);
        app.selected_location = Some(1);

        let probe = app.probe().ok_or("selected location has content")?;
        assert_eq!(probe.counts_line(), "20 favor 10 against");

        app.player.seek(2, now);
        let probe = app.probe().ok_or("selection survives a seek")?;
        assert_eq!(probe.counts_line(), "60 favor 30 against");
        assert_eq!(probe.frame, 2);
        Ok(())
    }

    #[test]
    fn mouse_hover_takes_precedence_over_selection() {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), now);
        app.on_loaded(Ok(loaded()), now);
        app.selected_location = Some(1);
        app.hover = Some(Hover {
            location: 0,
            column: 3,
            row: 4,
        });
        assert_eq!(app.probe_location(), Some(0));
    }
}
