// UI module for stance-atlas
// Handles all UI rendering functions

pub mod layout;
pub mod screens;
pub mod widgets;

use crate::app::{App, LoadState};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match &app.load {
        LoadState::Loading => screens::loading::render_loading(app, f),
        LoadState::Failed(message) => screens::loading::render_failed(message, f),
        LoadState::Ready(atlas) => screens::dashboard::render_dashboard(app, atlas, f),
    }

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}
