//! Jumpman - a side-scrolling platformer runtime
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, combat, game state)
//! - `tuning`: Data-driven physics balance
//! - `snapshot`: Read-only projection handed to an external renderer
//! - `audio`: Cue boundary toward an external audio backend
//! - `clock`: Wall-clock frame delta source
//! - `replay`: JSON Lines input recordings
//! - `autopilot`: Seeded demo input
//! - `game`: Session ownership and restart handling

pub mod audio;
pub mod autopilot;
pub mod clock;
pub mod game;
pub mod replay;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use game::{FrameInput, Game};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest time step a single tick may integrate (prevents tunneling)
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 960.0;
    pub const SCREEN_HEIGHT: f32 = 540.0;

    /// Anything whose top edge drops past this line has left the world
    pub const FALL_LIMIT_Y: f32 = SCREEN_HEIGHT + 400.0;

    /// Starting lives for a fresh session
    pub const START_LIVES: u32 = 3;
    /// Every Nth coin awards an extra life
    pub const COINS_PER_LIFE: u32 = 10;

    /// Score awards
    pub const COIN_SCORE: u64 = 200;
    pub const POWERUP_SCORE: u64 = 1000;
    /// Awarded instead of the effect when already powered up
    pub const POWERUP_REPEAT_SCORE: u64 = 250;
    pub const STOMP_SCORE: u64 = 100;
    pub const GOAL_SCORE: u64 = 500;

    /// Entity sizes
    pub const PLAYER_WIDTH: f32 = 22.0;
    pub const PLAYER_HEIGHT: f32 = 28.0;
    pub const ENEMY_WIDTH: f32 = 24.0;
    pub const ENEMY_HEIGHT: f32 = 20.0;
    pub const COIN_SIZE: f32 = 18.0;
    pub const POWERUP_SIZE: f32 = 22.0;

    /// Horizontal speed above which the player counts as walking for animation
    pub const MOVING_SPEED: f32 = 60.0;
}

/// Clamp a frame delta into `[0, MAX_DT]`. Non-finite deltas become zero.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, consts::MAX_DT)
    } else {
        0.0
    }
}
