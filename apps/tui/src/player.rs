//! The frame clock shared by the map, the chart and the slider.
//!
//! All playback state lives on [`Player`]; renderers only ever read
//! [`Player::frame`] and [`Player::transition`]. Time is passed in explicitly so
//! the clock can be driven deterministically.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Playing,
    Paused,
}

impl PlayMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

/// Weighted mix of frames, weights summing to 1. Marker radii are linear in
/// the weights, so a blend describes what is on screen mid-tween.
pub type FrameBlend = Vec<(usize, f64)>;

/// Weights below this are dropped when blends are folded together.
const MIN_BLEND_WEIGHT: f64 = 1e-6;

/// A radius tween from `from` towards the player's current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: FrameBlend,
    pub started: Instant,
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct Player {
    frame: usize,
    frame_count: usize,
    frame_length: Duration,
    mode: PlayMode,
    dragging: bool,
    next_tick: Option<Instant>,
    generation: u64,
    transition: Option<Transition>,
}

impl Player {
    pub fn new(frame_count: usize, frame_length: Duration, autoplay: bool, now: Instant) -> Self {
        let mode = if autoplay {
            PlayMode::Playing
        } else {
            PlayMode::Paused
        };
        Self {
            frame: 0,
            frame_count,
            frame_length,
            mode,
            dragging: false,
            next_tick: autoplay.then(|| now + frame_length),
            generation: 0,
            transition: None,
        }
    }

    pub const fn frame(&self) -> usize {
        self.frame
    }

    pub const fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub const fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlayMode::Playing
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Bumped on every frame change; a transition from an older generation is
    /// never interpolated.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the interval timer is currently armed.
    pub const fn timer_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn play(&mut self, now: Instant) {
        self.mode = PlayMode::Playing;
        if !self.dragging {
            self.next_tick = Some(now + self.frame_length);
        }
    }

    pub fn pause(&mut self) {
        self.mode = PlayMode::Paused;
        self.next_tick = None;
    }

    /// Returns the new mode.
    pub fn toggle(&mut self, now: Instant) -> PlayMode {
        match self.mode {
            PlayMode::Playing => self.pause(),
            PlayMode::Paused => self.play(now),
        }
        self.mode
    }

    /// Advances at most one frame when the timer deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.frame_count == 0 || self.dragging || !self.is_playing() {
            return false;
        }

        match self.next_tick {
            Some(deadline) if now >= deadline => {
                let next = (self.frame + 1) % self.frame_count;
                self.set_frame(next, now, true);
                self.next_tick = Some(now + self.frame_length);
                true
            }
            Some(_) => false,
            None => {
                self.next_tick = Some(now + self.frame_length);
                false
            }
        }
    }

    /// Jumps to `frame` (clamped) and restarts the timer when playing.
    pub fn seek(&mut self, frame: usize, now: Instant) -> bool {
        if self.frame_count == 0 {
            return false;
        }
        let target = frame.min(self.frame_count - 1);
        let changed = target != self.frame;
        if changed {
            self.set_frame(target, now, !self.dragging);
        }
        if self.is_playing() && !self.dragging {
            self.next_tick = Some(now + self.frame_length);
        }
        changed
    }

    pub fn step_forward(&mut self, now: Instant) -> bool {
        if self.frame_count == 0 {
            return false;
        }
        self.seek((self.frame + 1) % self.frame_count, now)
    }

    pub fn step_back(&mut self, now: Instant) -> bool {
        if self.frame_count == 0 {
            return false;
        }
        let previous = if self.frame == 0 {
            self.frame_count - 1
        } else {
            self.frame - 1
        };
        self.seek(previous, now)
    }

    /// Suspends the timer while the slider handle is held.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.next_tick = None;
    }

    /// Moves to `frame` without tweening.
    pub fn drag_to(&mut self, frame: usize, now: Instant) -> bool {
        if !self.dragging {
            self.begin_drag();
        }
        self.seek(frame, now)
    }

    /// Releases the handle; the timer resumes if the player is in play mode.
    pub fn end_drag(&mut self, now: Instant) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if self.is_playing() {
            self.next_tick = Some(now + self.frame_length);
        }
    }

    /// The live transition, if it belongs to the current generation.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition
            .as_ref()
            .filter(|transition| transition.generation == self.generation)
    }

    /// Linear 0..=1 progress of the current transition; 1 when there is none.
    pub fn transition_progress(&self, now: Instant) -> f64 {
        let Some(transition) = self.transition() else {
            return 1.0;
        };
        if self.frame_length.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(transition.started);
        (elapsed.as_secs_f64() / self.frame_length.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// What the markers show at `now`: the current frame, or the mix an
    /// unfinished tween has reached.
    pub fn displayed_blend(&self, now: Instant) -> FrameBlend {
        let progress = self.transition_progress(now);
        match self.transition() {
            Some(transition) if progress < 1.0 => {
                fold_blend(&transition.from, self.frame, progress)
            }
            _ => vec![(self.frame, 1.0)],
        }
    }

    fn set_frame(&mut self, frame: usize, now: Instant, tween: bool) {
        let previous = self.frame;
        let from = tween.then(|| self.displayed_blend(now));
        self.frame = frame;
        self.generation += 1;
        self.transition = from.map(|from| Transition {
            from,
            started: now,
            generation: self.generation,
        });
        tracing::trace!(from = previous, to = frame, generation = self.generation, "frame changed");
    }
}

/// `blend` moved `progress` of the way towards `frame`.
fn fold_blend(blend: &[(usize, f64)], frame: usize, progress: f64) -> FrameBlend {
    let mut folded: FrameBlend = blend
        .iter()
        .map(|&(source, weight)| (source, weight * (1.0 - progress)))
        .collect();
    match folded.iter_mut().find(|(source, _)| *source == frame) {
        Some((_, weight)) => *weight += progress,
        None => folded.push((frame, progress)),
    }
    folded.retain(|&(_, weight)| weight > MIN_BLEND_WEIGHT);
    folded
}
