//! Pickups and player/enemy contact resolution

use super::rect::Rect;
use super::state::{EnemyState, PlayerState, SoundCue};
use crate::consts::*;
use crate::tuning::Tuning;

/// What an enemy contact did to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// No contact needed resolving
    None,
    /// An enemy was stomped
    Stomp,
    /// A power-up absorbed the hit
    PowerDown,
    /// Unprotected hit; the caller must take a life
    LifeLost,
}

/// Remove every rectangle in `items` that overlaps `target`, returning the count.
/// Order of the remaining items is not preserved.
fn take_overlapping(items: &mut Vec<Rect>, target: &Rect) -> usize {
    let mut taken = 0;
    let mut i = 0;
    while i < items.len() {
        if items[i].intersects(target) {
            items.swap_remove(i);
            taken += 1;
        } else {
            i += 1;
        }
    }
    taken
}

/// Collect overlapping coins. Every `COINS_PER_LIFE`th coin adds a life.
pub fn collect_coins(player: &mut PlayerState, coins: &mut Vec<Rect>, cues: &mut Vec<SoundCue>) {
    let taken = take_overlapping(coins, &player.rect());
    for _ in 0..taken {
        player.score += COIN_SCORE;
        player.coins += 1;
        cues.push(SoundCue::Coin);
        if player.coins % COINS_PER_LIFE == 0 {
            player.lives += 1;
            log::debug!("Extra life at {} coins", player.coins);
        }
    }
}

/// Collect overlapping power-ups. A second power-up while powered is only
/// worth bonus points.
pub fn collect_powerups(
    player: &mut PlayerState,
    powerups: &mut Vec<Rect>,
    cues: &mut Vec<SoundCue>,
) {
    let taken = take_overlapping(powerups, &player.rect());
    for _ in 0..taken {
        if player.powered_up {
            player.score += POWERUP_REPEAT_SCORE;
            cues.push(SoundCue::Coin);
        } else {
            player.powered_up = true;
            player.score += POWERUP_SCORE;
            cues.push(SoundCue::PowerUp);
            log::debug!("Powered up");
        }
    }
}

/// Resolve contact with the first alive enemy that touches the player.
///
/// `prev_player` is the player's rectangle before this tick's movement. A stomp
/// needs the player moving down and its previous bottom edge no lower than the
/// enemy's top edge plus `stomp_tolerance`. While invincible, non-stomp
/// contacts are ignored and the scan continues.
pub fn resolve_enemy_contacts(
    player: &mut PlayerState,
    prev_player: &Rect,
    enemies: &mut [EnemyState],
    world_width: f32,
    tuning: &Tuning,
    cues: &mut Vec<SoundCue>,
) -> ContactOutcome {
    let player_rect = player.rect();

    for (i, enemy) in enemies.iter_mut().enumerate() {
        if !enemy.alive {
            continue;
        }
        let enemy_rect = enemy.rect();
        if !player_rect.intersects(&enemy_rect) {
            continue;
        }

        let stomp = player.mover.vel.y > 0.0
            && prev_player.bottom() <= enemy_rect.top() + tuning.stomp_tolerance;

        if stomp {
            enemy.alive = false;
            player.mover.vel.y = -tuning.stomp_bounce;
            player.score += STOMP_SCORE;
            cues.push(SoundCue::Stomp);
            log::debug!("Stomped enemy {}", i);
            return ContactOutcome::Stomp;
        }

        if player.is_invincible() {
            continue;
        }

        if player.powered_up {
            power_down(player, &enemy_rect, world_width, tuning);
            cues.push(SoundCue::PowerDown);
            return ContactOutcome::PowerDown;
        }

        cues.push(SoundCue::Hurt);
        return ContactOutcome::LifeLost;
    }

    ContactOutcome::None
}

/// Drop the power-up, grant invincibility and knock the player clear of `enemy`
fn power_down(player: &mut PlayerState, enemy: &Rect, world_width: f32, tuning: &Tuning) {
    player.powered_up = false;
    player.invincible_s = tuning.hurt_invincibility_s;

    let rect = player.rect();
    let knock_dir = if rect.center_x() < enemy.center_x() {
        player.mover.pos.x = enemy.left() - rect.w - tuning.knockback_gap;
        -1.0
    } else {
        player.mover.pos.x = enemy.right() + tuning.knockback_gap;
        1.0
    };

    let mover = &mut player.mover;
    mover.vel.x = knock_dir * tuning.max_speed * tuning.knockback_speed_factor;
    mover.vel.y = -tuning.jump_speed * tuning.knockback_jump_factor;
    mover.on_ground = false;
    mover.pos.x = mover.pos.x.min(world_width - rect.w).max(0.0);

    log::debug!("Powered down, knocked {}", if knock_dir < 0.0 { "left" } else { "right" });
}
