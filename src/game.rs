//! Session ownership and restart handling
//!
//! `Game` keeps the pristine world and tuning so a restart can replace the
//! running session wholesale. Restarts happen between ticks and only once the
//! current session has ended.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::audio::{CueSink, dispatch_cues};
use crate::clock::FrameClock;
use crate::replay::Replay;
use crate::sim::{GamePhase, Session, SessionError, TickInput, World, tick};
use crate::snapshot::RenderSnapshot;
use crate::tuning::Tuning;

/// Per-frame input at the game level: simulation controls plus session
/// management requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    #[serde(flatten)]
    pub tick: TickInput,
    /// Request a new session (honored only once the current one has ended)
    #[serde(default)]
    pub restart: bool,
}

impl From<TickInput> for FrameInput {
    fn from(tick: TickInput) -> Self {
        Self {
            tick,
            restart: false,
        }
    }
}

pub struct Game {
    world: World,
    tuning: Tuning,
    session: Session,
    best_score: u64,
    sessions_started: u32,
    recording: Option<Replay>,
    clock: FrameClock,
}

impl Game {
    pub fn new(world: World, tuning: Tuning) -> Result<Self, SessionError> {
        let session = Session::new(world.clone(), tuning.clone())?;
        Ok(Self {
            world,
            tuning,
            session,
            best_score: 0,
            sessions_started: 1,
            recording: None,
            clock: FrameClock::new(),
        })
    }

    /// Built-in level with default tuning
    pub fn standard() -> Result<Self, SessionError> {
        Self::new(World::standard()?, Tuning::default())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Highest score seen in any session, including the current one
    pub fn best_score(&self) -> u64 {
        self.best_score.max(self.session.player.score)
    }

    pub fn sessions_started(&self) -> u32 {
        self.sessions_started
    }

    /// Run one frame. A restart request on a finished session replaces it
    /// instead of ticking. Only ticked frames are recorded.
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        if input.restart && self.restart() {
            return;
        }
        if let Some(recording) = self.recording.as_mut() {
            recording.push(input.tick, dt);
        }
        tick(&mut self.session, &input.tick, dt);
    }

    /// Run one frame timed by the wall clock. The first call after
    /// construction or `reset_clock` integrates nothing.
    pub fn update_at(&mut self, input: &FrameInput, now: Instant) {
        let dt = self.clock.delta(now);
        self.update(input, dt);
    }

    /// Forget the previous frame time, e.g. after the host was paused
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// Discard a finished session and start a fresh one. Returns false (and
    /// does nothing) while the session is still being played.
    pub fn restart(&mut self) -> bool {
        if !self.session.phase.is_terminal() {
            return false;
        }
        self.best_score = self.best_score();
        self.session = Session::build(self.world.clone(), self.tuning.clone());
        self.sessions_started += 1;
        log::info!(
            "Restarted (session {}, best score {})",
            self.sessions_started,
            self.best_score
        );
        true
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.session)
    }

    /// Hand queued cues to an audio backend
    pub fn play_cues(&mut self, sink: &mut dyn CueSink) -> usize {
        dispatch_cues(&mut self.session, sink)
    }

    /// Start recording every frame passed to `update`
    pub fn start_recording(&mut self) {
        self.recording = Some(Replay::new());
    }

    /// Stop recording and return what was captured
    pub fn take_recording(&mut self) -> Option<Replay> {
        self.recording.take()
    }
}
