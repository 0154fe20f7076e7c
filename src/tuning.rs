//! Physics and combat tuning
//!
//! Immutable once a session is built. Loadable from JSON so balance can be
//! changed without recompiling; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Error produced when tuning data is unusable
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// A field is non-finite or outside its allowed range
    Invalid(&'static str),
    /// The JSON document could not be parsed
    Parse(String),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::Invalid(field) => write!(f, "Invalid tuning value: {}", field),
            TuningError::Parse(msg) => write!(f, "Tuning parse error: {}", msg),
        }
    }
}

impl std::error::Error for TuningError {}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e.to_string())
    }
}

/// Movement and combat constants shared by the player and enemy integrators.
///
/// Speeds are in pixels per second, accelerations in pixels per second².
/// Positive y points down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Horizontal acceleration while a direction is held
    pub accel: f32,
    /// Horizontal deceleration toward zero with no input
    pub friction: f32,
    pub max_speed: f32,
    pub jump_speed: f32,
    /// Upward speed given to the player after a stomp
    pub stomp_bounce: f32,
    pub enemy_speed: f32,
    /// How far below an enemy's top edge the player's previous bottom edge may be
    /// and still count as a stomp
    pub stomp_tolerance: f32,
    /// Invincibility granted when a power-up absorbs a hit (seconds)
    pub hurt_invincibility_s: f32,
    /// Knockback horizontal speed as a fraction of `max_speed`
    pub knockback_speed_factor: f32,
    /// Knockback vertical impulse as a fraction of `jump_speed`
    pub knockback_jump_factor: f32,
    /// Gap left between the player and the enemy after knockback
    pub knockback_gap: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2400.0,
            terminal_velocity: 2200.0,
            accel: 5200.0,
            friction: 6400.0,
            max_speed: 520.0,
            jump_speed: 920.0,
            stomp_bounce: 720.0,
            enemy_speed: 140.0,
            stomp_tolerance: 6.0,
            hurt_invincibility_s: 1.25,
            knockback_speed_factor: 0.9,
            knockback_jump_factor: 0.55,
            knockback_gap: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make the integrators misbehave
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("terminal_velocity", self.terminal_velocity),
            ("accel", self.accel),
            ("friction", self.friction),
            ("max_speed", self.max_speed),
            ("jump_speed", self.jump_speed),
            ("stomp_bounce", self.stomp_bounce),
            ("enemy_speed", self.enemy_speed),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid(name));
            }
        }

        let non_negative = [
            ("stomp_tolerance", self.stomp_tolerance),
            ("hurt_invincibility_s", self.hurt_invincibility_s),
            ("knockback_speed_factor", self.knockback_speed_factor),
            ("knockback_jump_factor", self.knockback_jump_factor),
            ("knockback_gap", self.knockback_gap),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid(name));
            }
        }

        Ok(())
    }
}
