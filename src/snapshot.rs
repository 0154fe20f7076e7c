//! Read-only render projection
//!
//! A renderer receives a `RenderSnapshot` each frame and owns every drawing
//! decision (sprites, animation frames, blinking). It never touches the
//! session itself.

use serde::Serialize;

use crate::consts::MOVING_SPEED;
use crate::sim::{GamePhase, Rect, Session};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: i8,
    pub powered_up: bool,
    pub invincible: bool,
    pub on_ground: bool,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyView {
    pub rect: Rect,
    pub dir: f32,
    pub alive: bool,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub camera_x: f32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub coins: Vec<Rect>,
    pub powerups: Vec<Rect>,
    pub goal: Rect,
    pub solids: Vec<Rect>,
    pub score: u64,
    pub coins_collected: u32,
    pub lives: u32,
    pub state: GamePhase,
}

impl RenderSnapshot {
    pub fn capture(session: &Session) -> Self {
        let player = &session.player;
        Self {
            camera_x: session.camera_x,
            player: PlayerView {
                rect: player.rect(),
                facing: player.facing,
                powered_up: player.powered_up,
                invincible: player.is_invincible(),
                on_ground: player.mover.on_ground,
                moving: player.mover.vel.x.abs() > MOVING_SPEED,
            },
            enemies: session
                .enemies
                .iter()
                .map(|e| EnemyView {
                    rect: e.rect(),
                    dir: e.dir,
                    alive: e.alive,
                })
                .collect(),
            coins: session.coins.clone(),
            powerups: session.powerups.clone(),
            goal: session.world.goal(),
            solids: session.world.solids().to_vec(),
            score: player.score,
            coins_collected: player.coins,
            lives: player.lives,
            state: session.phase,
        }
    }

    /// Status line text, e.g. `Score 200   Coins 1   Lives 3   POWER`
    pub fn hud_line(&self) -> String {
        let mut line = format!(
            "Score {}   Coins {}   Lives {}",
            self.score, self.coins_collected, self.lives
        );
        let mut status = Vec::new();
        if self.player.powered_up {
            status.push("POWER");
        }
        if self.player.invincible {
            status.push("INV");
        }
        if !status.is_empty() {
            line.push_str("   ");
            line.push_str(&status.join(" "));
        }
        line
    }

    /// Banner shown over a finished session
    pub fn banner(&self) -> Option<&'static str> {
        match self.state {
            GamePhase::Playing => None,
            GamePhase::Win => Some("YOU WIN! Press R to restart."),
            GamePhase::GameOver => Some("GAME OVER. Press R to restart."),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_fresh_session() {
        let session = Session::standard().unwrap();
        let snap = RenderSnapshot::capture(&session);
        assert_eq!(snap.enemies.len(), 4);
        assert_eq!(snap.coins.len(), 12);
        assert_eq!(snap.solids.len(), 10);
        assert_eq!(snap.lives, 3);
        assert_eq!(snap.state, GamePhase::Playing);
        assert!(!snap.player.moving);
        assert_eq!(snap.banner(), None);
    }

    #[test]
    fn test_hud_line_status_flags() {
        let mut session = Session::standard().unwrap();
        assert_eq!(
            RenderSnapshot::capture(&session).hud_line(),
            "Score 0   Coins 0   Lives 3"
        );
        session.player.powered_up = true;
        session.player.invincible_s = 1.0;
        assert_eq!(
            RenderSnapshot::capture(&session).hud_line(),
            "Score 0   Coins 0   Lives 3   POWER INV"
        );
    }

    #[test]
    fn test_moving_threshold() {
        let mut session = Session::standard().unwrap();
        session.player.mover.vel.x = -61.0;
        assert!(RenderSnapshot::capture(&session).player.moving);
        session.player.mover.vel.x = 60.0;
        assert!(!RenderSnapshot::capture(&session).player.moving);
    }

    #[test]
    fn test_json_contains_state() {
        let mut session = Session::standard().unwrap();
        session.phase = GamePhase::GameOver;
        let snap = RenderSnapshot::capture(&session);
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"state\":\"GameOver\""));
        assert_eq!(snap.banner(), Some("GAME OVER. Press R to restart."));
    }
}
