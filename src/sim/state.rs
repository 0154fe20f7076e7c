//! Session state and entity types
//!
//! Everything a running play-through owns lives in [`Session`]. It is
//! serializable so a state hash can be taken for determinism checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::world::{LevelError, World};
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player reached the goal
    Win,
    /// Player ran out of lives
    GameOver,
}

impl GamePhase {
    /// No further simulation happens in a terminal phase
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Discrete audio cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Jump,
    Coin,
    Stomp,
    Hurt,
    PowerUp,
    PowerDown,
    Win,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Coin => "coin",
            SoundCue::Stomp => "stomp",
            SoundCue::Hurt => "hurt",
            SoundCue::PowerUp => "powerup",
            SoundCue::PowerDown => "powerdown",
            SoundCue::Win => "win",
        }
    }
}

/// Position, size and velocity shared by everything the resolver moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mover {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Mover {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub mover: Mover,
    /// -1 facing left, 1 facing right
    pub facing: i8,
    pub powered_up: bool,
    /// Remaining invincibility (seconds, never negative)
    pub invincible_s: f32,
    pub score: u64,
    pub coins: u32,
    pub lives: u32,
}

impl PlayerState {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            mover: Mover::new(spawn, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            facing: 1,
            powered_up: false,
            invincible_s: 0.0,
            score: 0,
            coins: 0,
            lives: START_LIVES,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_s > 0.0
    }

    /// Put the player back at the spawn point. Score, coins and lives persist.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.mover.pos = spawn;
        self.mover.vel = Vec2::ZERO;
        self.mover.on_ground = false;
        self.powered_up = false;
        self.invincible_s = 0.0;
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyState {
    pub mover: Mover,
    /// Patrol direction, -1.0 or 1.0
    pub dir: f32,
    pub alive: bool,
}

impl EnemyState {
    pub fn new(pos: Vec2, enemy_speed: f32) -> Self {
        let mut mover = Mover::new(pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT));
        mover.vel.x = -enemy_speed;
        Self {
            mover,
            dir: -1.0,
            alive: true,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }
}

/// Failure to start a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Level(LevelError),
    Tuning(TuningError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Level(e) => write!(f, "Level error: {}", e),
            SessionError::Tuning(e) => write!(f, "Tuning error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Level(e) => Some(e),
            SessionError::Tuning(e) => Some(e),
        }
    }
}

impl From<LevelError> for SessionError {
    fn from(e: LevelError) -> Self {
        SessionError::Level(e)
    }
}

impl From<TuningError> for SessionError {
    fn from(e: TuningError) -> Self {
        SessionError::Tuning(e)
    }
}

/// One complete play-through (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub world: World,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: PlayerState,
    /// Enemies in spawn order; defeated ones stay with `alive == false`
    pub enemies: Vec<EnemyState>,
    /// Coins not yet collected (order not significant)
    pub coins: Vec<Rect>,
    /// Power-ups not yet collected (order not significant)
    pub powerups: Vec<Rect>,
    /// Horizontal scroll offset
    pub camera_x: f32,
    /// Number of tick calls processed
    pub time_ticks: u64,
    /// Cues emitted since the last drain
    #[serde(skip)]
    cues: Vec<SoundCue>,
}

impl Session {
    /// Start a fresh session on `world`
    pub fn new(world: World, tuning: Tuning) -> Result<Self, SessionError> {
        tuning.validate()?;
        Ok(Self::build(world, tuning))
    }

    /// Build from a world and tuning that are already known to be valid
    pub(crate) fn build(world: World, tuning: Tuning) -> Self {
        let player = PlayerState::new(world.spawn());
        let enemies = world
            .enemy_spawns()
            .iter()
            .map(|&pos| EnemyState::new(pos, tuning.enemy_speed))
            .collect();

        let mut session = Self {
            coins: world.coins().to_vec(),
            powerups: world.powerups().to_vec(),
            world,
            tuning,
            phase: GamePhase::Playing,
            player,
            enemies,
            camera_x: 0.0,
            time_ticks: 0,
            cues: Vec::new(),
        };
        session.update_camera();

        log::info!(
            "New session: {} solids, {} coins, {} enemies",
            session.world.solids().len(),
            session.coins.len(),
            session.enemies.len()
        );
        session
    }

    /// Fresh session on the built-in level with default tuning
    pub fn standard() -> Result<Self, SessionError> {
        Self::new(World::standard()?, Tuning::default())
    }

    pub(crate) fn push_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Cues emitted since the last call, oldest first
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    /// Number of enemies still alive
    pub fn enemies_alive(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    /// Recompute the scroll offset from the player's position
    pub fn update_camera(&mut self) {
        self.camera_x = super::camera::scroll_for(&self.player.rect(), self.world.width());
    }

    /// Remove one life. Ends the session at zero, otherwise respawns the player.
    pub(crate) fn lose_life(&mut self) {
        self.player.lives = self.player.lives.saturating_sub(1);
        if self.player.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over (score {})", self.player.score);
            return;
        }
        log::debug!("Life lost, {} remaining", self.player.lives);
        self.player.respawn(self.world.spawn());
    }

    /// 64-bit FNV-1a digest of the serialized session. Equal input streams
    /// on equal worlds produce equal hashes.
    pub fn state_hash(&self) -> Result<u64, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        Ok(fnv1a_64(&bytes))
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |h, &b| {
        (h ^ b as u64).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::standard().unwrap();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.score, 0);
        assert_eq!(session.player.coins, 0);
        assert_eq!(session.player.lives, START_LIVES);
        assert_eq!(session.player.mover.pos, session.world.spawn());
        assert_eq!(session.coins.len(), 12);
        assert_eq!(session.enemies_alive(), 4);
        assert!(session.enemies.iter().all(|e| e.dir == -1.0));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        let err = Session::new(World::standard().unwrap(), tuning).unwrap_err();
        assert_eq!(err, SessionError::Tuning(TuningError::Invalid("gravity")));
    }

    #[test]
    fn test_lose_life_respawns_then_ends() {
        let mut session = Session::standard().unwrap();
        session.player.lives = 2;
        session.player.score = 300;
        session.player.powered_up = true;
        session.player.mover.pos = Vec2::new(900.0, 100.0);
        session.player.mover.vel = Vec2::new(200.0, -50.0);

        session.lose_life();
        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.player.lives, 1);
        assert_eq!(session.player.score, 300);
        assert!(!session.player.powered_up);
        assert_eq!(session.player.mover.pos, session.world.spawn());
        assert_eq!(session.player.mover.vel, Vec2::ZERO);

        session.player.mover.pos = Vec2::new(900.0, 100.0);
        session.lose_life();
        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(session.player.lives, 0);
        // No respawn once the session is over
        assert_eq!(session.player.mover.pos, Vec2::new(900.0, 100.0));
    }

    #[test]
    fn test_drain_cues_empties_queue() {
        let mut session = Session::standard().unwrap();
        session.push_cue(SoundCue::Jump);
        session.push_cue(SoundCue::Coin);
        assert_eq!(session.drain_cues(), vec![SoundCue::Jump, SoundCue::Coin]);
        assert!(session.drain_cues().is_empty());
    }

    #[test]
    fn test_state_hash_tracks_changes() {
        let a = Session::standard().unwrap();
        let mut b = Session::standard().unwrap();
        assert_eq!(a.state_hash().unwrap(), b.state_hash().unwrap());
        b.player.score += 1;
        assert_ne!(a.state_hash().unwrap(), b.state_hash().unwrap());
    }

    #[test]
    fn test_cue_names() {
        assert_eq!(SoundCue::PowerDown.name(), "powerdown");
        assert_eq!(SoundCue::Win.name(), "win");
    }
}
