//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time steps are supplied by the caller and clamped
//! - Stable iteration order (solids and enemies in construction order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod combat;
pub mod enemy;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use combat::ContactOutcome;
pub use physics::Steer;
pub use rect::Rect;
pub use state::{EnemyState, GamePhase, Mover, PlayerState, Session, SessionError, SoundCue};
pub use tick::{TickInput, tick};
pub use world::{LevelError, LevelLayout, World};
