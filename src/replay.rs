//! Input recordings in JSON Lines
//!
//! ```text
//! {"version":1}
//! {"l":false,"r":true,"jp":false,"dt":0.016666668}
//! {"r":true,"jp":true,"dt":0.016666668}
//! ```
//!
//! The header line is optional on read, as are input fields that are false.
//! Blank lines are skipped.

use serde::{Deserialize, Serialize};

use crate::sim::{Session, SessionError, TickInput, World, tick};
use crate::tuning::Tuning;

/// Current replay format version
pub const REPLAY_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// A line could not be parsed (1-based line number)
    Parse { line: usize, message: String },
    UnsupportedVersion(u32),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Parse { line, message } => {
                write!(f, "Replay parse error on line {}: {}", line, message)
            }
            ReplayError::UnsupportedVersion(v) => write!(f, "Unsupported replay version {}", v),
        }
    }
}

impl std::error::Error for ReplayError {}

/// One recorded tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    #[serde(flatten)]
    pub input: TickInput,
    pub dt: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Header {
    version: u32,
}

/// A recorded input stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Replay {
    pub frames: Vec<ReplayFrame>,
}

impl Replay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, input: TickInput, dt: f32) {
        self.frames.push(ReplayFrame { input, dt });
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string(&Header {
            version: REPLAY_VERSION,
        })?;
        out.push('\n');
        for frame in &self.frames {
            out.push_str(&serde_json::to_string(frame)?);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn from_jsonl(text: &str) -> Result<Self, ReplayError> {
        let mut replay = Replay::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(line).map_err(|e| ReplayError::Parse {
                    line: index + 1,
                    message: e.to_string(),
                })?;

            if value.get("version").is_some() {
                let header: Header =
                    serde_json::from_value(value).map_err(|e| ReplayError::Parse {
                        line: index + 1,
                        message: e.to_string(),
                    })?;
                if header.version != REPLAY_VERSION {
                    return Err(ReplayError::UnsupportedVersion(header.version));
                }
                continue;
            }

            let frame: ReplayFrame =
                serde_json::from_value(value).map_err(|e| ReplayError::Parse {
                    line: index + 1,
                    message: e.to_string(),
                })?;
            replay.frames.push(frame);
        }

        Ok(replay)
    }

    /// Play every frame into `session`
    pub fn apply(&self, session: &mut Session) {
        for frame in &self.frames {
            tick(session, &frame.input, frame.dt);
        }
    }

    /// Build a fresh session and play the whole recording into it
    pub fn run(&self, world: World, tuning: Tuning) -> Result<Session, SessionError> {
        let mut session = Session::new(world, tuning)?;
        self.apply(&mut session);
        log::info!("Replayed {} frames", self.frames.len());
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn sample() -> Replay {
        let mut replay = Replay::new();
        for i in 0..240 {
            replay.push(
                TickInput {
                    move_right: true,
                    jump_pressed: i % 50 == 10,
                    ..Default::default()
                },
                DT,
            );
        }
        replay
    }

    #[test]
    fn test_jsonl_layout() {
        let mut replay = Replay::new();
        replay.push(
            TickInput {
                move_right: true,
                ..Default::default()
            },
            0.5,
        );
        let text = replay.to_jsonl().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], r#"{"version":1}"#);
        assert_eq!(
            lines[1],
            r#"{"l":false,"r":true,"jp":false,"dt":0.5}"#
        );
    }

    #[test]
    fn test_reads_without_header_and_defaults() {
        let text = "\n{\"r\":true,\"dt\":0.02}\n\n{\"jp\":true,\"dt\":0.01}\n";
        let replay = Replay::from_jsonl(text).unwrap();
        assert_eq!(replay.len(), 2);
        assert!(replay.frames[0].input.move_right);
        assert!(!replay.frames[0].input.move_left);
        assert!(replay.frames[1].input.jump_pressed);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let err = Replay::from_jsonl("{\"version\":7}\n").unwrap_err();
        assert_eq!(err, ReplayError::UnsupportedVersion(7));
    }

    #[test]
    fn test_reports_bad_line() {
        let err = Replay::from_jsonl("{\"version\":1}\n{\"r\":true}\nnot json\n").unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_replay_is_deterministic() {
        let replay = sample();
        let text = replay.to_jsonl().unwrap();
        let reloaded = Replay::from_jsonl(&text).unwrap();

        let a = replay.run(World::standard().unwrap(), Tuning::default()).unwrap();
        let b = reloaded
            .run(World::standard().unwrap(), Tuning::default())
            .unwrap();
        assert_eq!(a.time_ticks, 240);
        assert_eq!(a.state_hash().unwrap(), b.state_hash().unwrap());
    }
}
