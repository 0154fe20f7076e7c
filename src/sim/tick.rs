//! Per-frame simulation tick
//!
//! Advances a session by one externally supplied time step. Order while
//! playing: invincibility timer, player movement, enemy contacts (and any
//! life loss), coins, power-ups, enemies, goal, fall-off check, camera.
//! Terminal phases only update the camera.

use serde::{Deserialize, Serialize};

use super::combat::{self, ContactOutcome};
use super::enemy;
use super::physics::{self, Steer};
use super::state::{GamePhase, Session, SoundCue};
use crate::clamp_dt;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    #[serde(default, rename = "l")]
    pub move_left: bool,
    #[serde(default, rename = "r")]
    pub move_right: bool,
    /// Edge-triggered: true only on the frame the button went down
    #[serde(default, rename = "jp")]
    pub jump_pressed: bool,
}

impl TickInput {
    pub fn steer(&self) -> Steer {
        Steer::from_buttons(self.move_left, self.move_right)
    }
}

/// Advance the session by `dt` seconds (clamped to `[0, MAX_DT]`)
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);
    session.time_ticks += 1;

    if session.phase.is_terminal() {
        session.update_camera();
        return;
    }

    let player = &mut session.player;
    player.invincible_s = (player.invincible_s - dt).max(0.0);

    let prev_rect = player.rect();
    let mut cues = Vec::new();

    physics::step_player(
        player,
        input.steer(),
        input.jump_pressed,
        &session.world,
        &session.tuning,
        dt,
        &mut cues,
    );

    let outcome = combat::resolve_enemy_contacts(
        player,
        &prev_rect,
        &mut session.enemies,
        session.world.width(),
        &session.tuning,
        &mut cues,
    );
    if outcome == ContactOutcome::LifeLost {
        session.lose_life();
    }

    // Game over freezes everything but the camera from here on
    if session.phase == GamePhase::Playing {
        let player = &mut session.player;
        combat::collect_coins(player, &mut session.coins, &mut cues);
        combat::collect_powerups(player, &mut session.powerups, &mut cues);
        enemy::step_enemies(
            &mut session.enemies,
            session.world.solids(),
            &session.tuning,
            dt,
        );
    }

    for cue in cues {
        session.push_cue(cue);
    }

    check_goal(session);
    check_fall_off_world(session);
    session.update_camera();
}

fn check_goal(session: &mut Session) {
    if session.phase != GamePhase::Playing {
        return;
    }
    if session.player.rect().intersects(&session.world.goal()) {
        session.phase = GamePhase::Win;
        session.player.score += GOAL_SCORE;
        session.push_cue(SoundCue::Win);
        log::info!("Goal reached (score {})", session.player.score);
    }
}

fn check_fall_off_world(session: &mut Session) {
    if session.phase != GamePhase::Playing {
        return;
    }
    if session.player.mover.pos.y > FALL_LIMIT_Y {
        log::debug!("Player fell out of the world");
        session.lose_life();
    }
}
