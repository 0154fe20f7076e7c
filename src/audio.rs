//! Audio cue boundary
//!
//! The simulation only queues [`SoundCue`]s. A backend implements [`CueSink`];
//! playback failures are logged and dropped here so they can never reach the
//! simulation.

use crate::sim::{Session, SoundCue};

/// Playback failure reported by a sink
#[derive(Debug, Clone, PartialEq)]
pub enum CueError {
    /// The backend has no sound loaded for this cue
    Missing(SoundCue),
    /// The backend is not available (no device, not initialized)
    Unavailable(String),
}

impl std::fmt::Display for CueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueError::Missing(cue) => write!(f, "No sound for cue '{}'", cue.name()),
            CueError::Unavailable(msg) => write!(f, "Audio unavailable: {}", msg),
        }
    }
}

impl std::error::Error for CueError {}

/// Something that can play cues
pub trait CueSink {
    fn play(&mut self, cue: SoundCue) -> Result<(), CueError>;
}

/// Drain the session's cue queue into `sink`. Returns how many cues played
/// successfully; failures are logged and skipped.
pub fn dispatch_cues(session: &mut Session, sink: &mut dyn CueSink) -> usize {
    let mut played = 0;
    for cue in session.drain_cues() {
        match sink.play(cue) {
            Ok(()) => played += 1,
            Err(e) => log::warn!("Dropping cue '{}': {}", cue.name(), e),
        }
    }
    played
}

/// Sink that logs each cue (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: u64,
}

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue) -> Result<(), CueError> {
        self.played += 1;
        log::debug!("cue: {}", cue.name());
        Ok(())
    }
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl CueSink for NullSink {
    fn play(&mut self, _cue: SoundCue) -> Result<(), CueError> {
        Ok(())
    }
}
