//! Enemy patrol behavior
//!
//! Enemies walk at a fixed speed, turn around on hitting a wall, and turn
//! around before stepping off a ledge.

use super::physics::{apply_gravity, is_supported, move_horizontal, move_vertical};
use super::rect::Rect;
use super::state::EnemyState;
use crate::consts::FALL_LIMIT_Y;
use crate::tuning::Tuning;

/// Gap between the leading edge and the ledge probe
const PROBE_REACH: f32 = 2.0;
const PROBE_WIDTH: f32 = 2.0;
/// Probe starts this far below the feet
const PROBE_DROP: f32 = 2.0;
const PROBE_DEPTH: f32 = 6.0;

/// Small rectangle just ahead of and below the leading foot
pub fn ledge_probe(rect: &Rect, dir: f32) -> Rect {
    let x = if dir > 0.0 {
        rect.right() + PROBE_REACH
    } else {
        rect.left() - PROBE_REACH
    };
    Rect::new(x, rect.bottom() + PROBE_DROP, PROBE_WIDTH, PROBE_DEPTH)
}

/// Advance one enemy by `dt`. Dead enemies are left untouched.
pub fn step_enemy(enemy: &mut EnemyState, solids: &[Rect], tuning: &Tuning, dt: f32) {
    if !enemy.alive {
        return;
    }

    apply_gravity(&mut enemy.mover, tuning, dt);
    enemy.mover.vel.x = tuning.enemy_speed * enemy.dir;

    let hit_wall = move_horizontal(&mut enemy.mover, solids, dt);
    let landed = move_vertical(&mut enemy.mover, solids, dt);
    // A zero-length step produces no overlap, so also accept a resting contact
    let grounded = landed
        || (enemy.mover.vel.y >= 0.0 && is_supported(&enemy.rect(), solids));
    enemy.mover.on_ground = grounded;

    if hit_wall {
        enemy.dir = -enemy.dir;
    }

    if grounded && !ledge_probe(&enemy.rect(), enemy.dir).intersects_any(solids) {
        enemy.dir = -enemy.dir;
    }

    if enemy.mover.pos.y > FALL_LIMIT_Y {
        enemy.alive = false;
        log::debug!("Enemy fell out of the world at x={:.0}", enemy.mover.pos.x);
    }
}

/// Advance every enemy in list order
pub fn step_enemies(enemies: &mut [EnemyState], solids: &[Rect], tuning: &Tuning, dt: f32) {
    for enemy in enemies.iter_mut() {
        step_enemy(enemy, solids, tuning, dt);
    }
}
