//! Frame-driven playback
//!
//! The controller owns the `Idle -> Playing -> Paused` state machine and
//! the reveal arithmetic. It never sleeps: the coordinator feeds it the
//! current time through [`tick`] and the controller fires only when its
//! deadline has elapsed, which lets tests drive it with a virtual clock.
//!
//! [`tick`]: PlaybackController::tick

use ledgerlens_types::config::PlaybackConfig;
use ledgerlens_types::engine_state::PlaybackState;
use std::time::Duration;
use tracing::debug;

/// One fired playback frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackFrame {
    /// 1-based frame number within the run.
    pub frame: u64,
    /// Transactions revealed as of this frame.
    pub visible: usize,
    /// Set on the final frame, after which the controller is idle again.
    pub completed: bool,
}

/// Reveal state machine for the timeline view.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    config: PlaybackConfig,
    state: PlaybackState,
    speed: u32,
    frame: u64,
    total: usize,
    next_tick_at: Option<Duration>,
}

impl PlaybackController {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            speed: config.default_speed,
            config,
            state: PlaybackState::Idle,
            frame: 0,
            total: 0,
            next_tick_at: None,
        }
    }

    /// Point the controller at a freshly loaded data set. Resets any run.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.reset();
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Transactions per frame: speed divided down, never below one.
    pub fn step(&self) -> usize {
        ((self.speed / self.config.step_divisor) as usize).max(1)
    }

    /// Time between frames: faster speeds shrink the delay down to the floor.
    pub fn frame_delay(&self) -> Duration {
        let ms = self
            .config
            .base_delay_ms
            .saturating_sub(u64::from(self.speed))
            .max(self.config.min_delay_ms);
        Duration::from_millis(ms)
    }

    /// Map a host-facing multiplier (1.0 = normal) onto the internal speed.
    pub fn set_speed(&mut self, external: f64) {
        let mapped = (external * 10.0).round();
        let floor = f64::from(self.config.min_internal_speed);
        self.speed = mapped.max(floor) as u32;
        debug!(external, internal = self.speed, "playback speed set");
    }

    pub fn internal_speed(&self) -> u32 {
        self.speed
    }

    /// The reveal frontier to draw with. Outside a run (idle, or paused
    /// before the first frame ever fired) the whole data set shows; during
    /// a run it is the frame arithmetic.
    pub fn visible(&self) -> usize {
        if self.frame == 0 {
            return self.total;
        }
        (self.frame as usize)
            .saturating_mul(self.step())
            .min(self.total)
    }

    /// Start or resume. No-op while already playing or with nothing to play.
    pub fn play(&mut self, now: Duration) {
        if self.state == PlaybackState::Playing || self.total == 0 {
            return;
        }
        if self.state == PlaybackState::Idle {
            self.frame = 0;
        }
        self.state = PlaybackState::Playing;
        // first frame fires on the next tick
        self.next_tick_at = Some(now);
        debug!(frame = self.frame, total = self.total, "playback started");
    }

    /// Suspend and drop the pending deadline. No-op unless playing.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.state = PlaybackState::Paused;
        self.next_tick_at = None;
        debug!(frame = self.frame, "playback paused");
    }

    /// Back to idle, frame zero, no pending deadline.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.frame = 0;
        self.next_tick_at = None;
    }

    /// Fire the next frame if its deadline has elapsed.
    ///
    /// The final frame reports `completed` and leaves the controller idle
    /// at frame zero, ready for a replay.
    pub fn tick(&mut self, now: Duration) -> Option<PlaybackFrame> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        let due = self.next_tick_at?;
        if now < due {
            return None;
        }

        self.frame += 1;
        let visible = (self.frame as usize)
            .saturating_mul(self.step())
            .min(self.total);

        if visible >= self.total {
            let frame = self.frame;
            self.reset();
            debug!(frame, "playback completed");
            return Some(PlaybackFrame {
                frame,
                visible,
                completed: true,
            });
        }

        self.next_tick_at = Some(now + self.frame_delay());
        Some(PlaybackFrame {
            frame: self.frame,
            visible,
            completed: false,
        })
    }
}
