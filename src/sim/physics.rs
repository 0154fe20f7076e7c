//! Axis-separated movement and solid collision resolution
//!
//! Movers are integrated one axis at a time: horizontal first, then vertical.
//! After each axis the mover's rectangle is pushed out of every overlapping
//! solid, walking the solids in the world's construction order. When several
//! solids overlap at once each applies its own correction in turn, so the
//! outcome depends on that order. Level geometry is tile-like, which keeps
//! this well behaved.

use super::rect::Rect;
use super::state::{Mover, PlayerState, SoundCue};
use super::world::World;
use crate::tuning::Tuning;

/// Horizontal input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    None,
}

impl Steer {
    /// Both or neither direction held means no steering
    pub fn from_buttons(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Steer::Left,
            (false, true) => Steer::Right,
            _ => Steer::None,
        }
    }
}

/// Accelerate toward the steering direction, or decay toward zero without
/// crossing it. The result is clamped to `±max_speed`.
pub fn steer_velocity(vx: f32, steer: Steer, tuning: &Tuning, dt: f32) -> f32 {
    let vx = match steer {
        Steer::Left => vx - tuning.accel * dt,
        Steer::Right => vx + tuning.accel * dt,
        Steer::None if vx > 0.0 => (vx - tuning.friction * dt).max(0.0),
        Steer::None if vx < 0.0 => (vx + tuning.friction * dt).min(0.0),
        Steer::None => vx,
    };
    vx.clamp(-tuning.max_speed, tuning.max_speed)
}

/// Add gravity to the vertical velocity, capped at terminal velocity
#[inline]
pub fn apply_gravity(mover: &mut Mover, tuning: &Tuning, dt: f32) {
    mover.vel.y = (mover.vel.y + tuning.gravity * dt).min(tuning.terminal_velocity);
}

/// Integrate x and push out of overlapping solids.
///
/// A rectangle whose center is right of the solid's center is pushed to the
/// solid's right edge, otherwise to its left edge. Returns true if any
/// correction happened, in which case horizontal velocity is zeroed.
pub fn move_horizontal(mover: &mut Mover, solids: &[Rect], dt: f32) -> bool {
    mover.pos.x += mover.vel.x * dt;
    let mut rect = mover.rect();
    let mut hit = false;

    for solid in solids {
        if !rect.intersects(solid) {
            continue;
        }
        if rect.center_x() > solid.center_x() {
            rect.set_left(solid.right());
        } else {
            rect.set_right(solid.left());
        }
        hit = true;
    }

    mover.pos.x = rect.x;
    if hit {
        mover.vel.x = 0.0;
    }
    hit
}

/// Integrate y and push out of overlapping solids.
///
/// Center below the solid's center pushes down to its bottom edge (head bump);
/// otherwise the mover lands on its top edge. Either way vertical velocity is
/// zeroed. `on_ground` is set to whether a landing correction happened, which
/// is also returned.
pub fn move_vertical(mover: &mut Mover, solids: &[Rect], dt: f32) -> bool {
    mover.pos.y += mover.vel.y * dt;
    let mut rect = mover.rect();
    let mut landed = false;

    for solid in solids {
        if !rect.intersects(solid) {
            continue;
        }
        if rect.center_y() > solid.center_y() {
            rect.set_top(solid.bottom());
        } else {
            rect.set_bottom(solid.top());
            landed = true;
        }
        mover.vel.y = 0.0;
    }

    mover.pos.y = rect.y;
    mover.on_ground = landed;
    landed
}

/// Thin strip just under the feet
#[inline]
pub fn feet_probe(rect: &Rect) -> Rect {
    Rect::new(rect.x, rect.bottom() + 1.0, rect.w, 2.0)
}

/// True if something solid is directly underneath `rect`
pub fn is_supported(rect: &Rect, solids: &[Rect]) -> bool {
    feet_probe(rect).intersects_any(solids)
}

/// Move the player for one tick: steering, jump, gravity, then per-axis
/// resolution against the world's solids and the world-bounds clamp.
pub fn step_player(
    player: &mut PlayerState,
    steer: Steer,
    jump_pressed: bool,
    world: &World,
    tuning: &Tuning,
    dt: f32,
    cues: &mut Vec<SoundCue>,
) {
    let prev = player.rect();
    let solids = world.solids();

    match steer {
        Steer::Left => player.facing = -1,
        Steer::Right => player.facing = 1,
        Steer::None => {}
    }

    let mover = &mut player.mover;
    mover.vel.x = steer_velocity(mover.vel.x, steer, tuning, dt);

    if jump_pressed && mover.on_ground {
        mover.vel.y = -tuning.jump_speed;
        mover.on_ground = false;
        cues.push(SoundCue::Jump);
    }

    apply_gravity(mover, tuning, dt);
    move_horizontal(mover, solids, dt);
    move_vertical(mover, solids, dt);

    // Resting on a surface without a corrective overlap this tick
    let rect = mover.rect();
    if rect.bottom() >= prev.bottom() && mover.vel.y >= 0.0 && is_supported(&rect, solids) {
        mover.on_ground = true;
        mover.vel.y = 0.0;
    }

    clamp_to_world(mover, world.width());
}

/// Keep the mover's x inside `[0, world_width - width]`
#[inline]
pub fn clamp_to_world(mover: &mut Mover, world_width: f32) {
    mover.pos.x = mover.pos.x.min(world_width - mover.size.x).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::LevelLayout;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn flat_world() -> World {
        World::new(LevelLayout {
            width: 2000.0,
            solids: vec![
                Rect::new(0.0, 400.0, 2000.0, 100.0),
                Rect::new(600.0, 300.0, 40.0, 100.0),
            ],
            coins: vec![],
            powerups: vec![],
            enemies: vec![],
            goal: Rect::new(1900.0, 300.0, 20.0, 100.0),
            spawn: Vec2::new(100.0, 372.0),
        })
        .unwrap()
    }

    #[test]
    fn test_steer_accelerates_and_clamps() {
        let tuning = Tuning::default();
        let vx = steer_velocity(0.0, Steer::Right, &tuning, DT);
        assert!((vx - tuning.accel * DT).abs() < 1e-4);

        let vx = steer_velocity(510.0, Steer::Right, &tuning, DT);
        assert_eq!(vx, tuning.max_speed);

        let vx = steer_velocity(-510.0, Steer::Left, &tuning, DT);
        assert_eq!(vx, -tuning.max_speed);
    }

    #[test]
    fn test_friction_stops_at_zero() {
        let tuning = Tuning::default();
        assert_eq!(steer_velocity(50.0, Steer::None, &tuning, DT), 0.0);
        assert_eq!(steer_velocity(-50.0, Steer::None, &tuning, DT), 0.0);
        let vx = steer_velocity(300.0, Steer::None, &tuning, DT);
        assert!(vx > 0.0 && vx < 300.0);
    }

    #[test]
    fn test_both_buttons_cancel() {
        assert_eq!(Steer::from_buttons(true, true), Steer::None);
        assert_eq!(Steer::from_buttons(true, false), Steer::Left);
        assert_eq!(Steer::from_buttons(false, true), Steer::Right);
    }

    #[test]
    fn test_wall_pushes_left_and_zeroes_vx() {
        let solids = [Rect::new(100.0, 0.0, 40.0, 100.0)];
        let mut mover = Mover::new(Vec2::new(70.0, 50.0), Vec2::new(22.0, 28.0));
        mover.vel.x = 600.0;
        let hit = move_horizontal(&mut mover, &solids, 0.02);
        assert!(hit);
        assert_eq!(mover.pos.x, 100.0 - 22.0);
        assert_eq!(mover.vel.x, 0.0);
    }

    #[test]
    fn test_wall_pushes_right_when_center_past_solid_center() {
        let solids = [Rect::new(100.0, 0.0, 40.0, 100.0)];
        let mut mover = Mover::new(Vec2::new(145.0, 50.0), Vec2::new(22.0, 28.0));
        mover.vel.x = -600.0;
        assert!(move_horizontal(&mut mover, &solids, 0.02));
        assert_eq!(mover.pos.x, 140.0);
    }

    #[test]
    fn test_landing_sets_ground() {
        let solids = [Rect::new(0.0, 400.0, 500.0, 100.0)];
        let mut mover = Mover::new(Vec2::new(50.0, 370.0), Vec2::new(22.0, 28.0));
        mover.vel.y = 600.0;
        assert!(move_vertical(&mut mover, &solids, 0.02));
        assert_eq!(mover.rect().bottom(), 400.0);
        assert_eq!(mover.vel.y, 0.0);
        assert!(mover.on_ground);
    }

    #[test]
    fn test_head_bump_does_not_ground() {
        let solids = [Rect::new(0.0, 100.0, 500.0, 28.0)];
        let mut mover = Mover::new(Vec2::new(50.0, 135.0), Vec2::new(22.0, 28.0));
        mover.vel.y = -600.0;
        assert!(!move_vertical(&mut mover, &solids, 0.02));
        assert_eq!(mover.pos.y, 128.0);
        assert_eq!(mover.vel.y, 0.0);
        assert!(!mover.on_ground);
    }

    #[test]
    fn test_gravity_capped_at_terminal() {
        let tuning = Tuning::default();
        let mut mover = Mover::new(Vec2::ZERO, Vec2::ONE);
        mover.vel.y = tuning.terminal_velocity - 1.0;
        apply_gravity(&mut mover, &tuning, DT);
        assert_eq!(mover.vel.y, tuning.terminal_velocity);
    }

    #[test]
    fn test_standing_player_stays_grounded() {
        let world = flat_world();
        let tuning = Tuning::default();
        let mut player = PlayerState::new(world.spawn());
        let mut cues = Vec::new();

        for _ in 0..10 {
            step_player(&mut player, Steer::None, false, &world, &tuning, DT, &mut cues);
        }
        assert!(player.mover.on_ground);
        assert_eq!(player.mover.vel.y, 0.0);
        assert_eq!(player.rect().bottom(), 400.0);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_jump_requires_ground() {
        let world = flat_world();
        let tuning = Tuning::default();
        let mut player = PlayerState::new(world.spawn());
        let mut cues = Vec::new();

        step_player(&mut player, Steer::None, false, &world, &tuning, DT, &mut cues);
        assert!(player.mover.on_ground);

        step_player(&mut player, Steer::None, true, &world, &tuning, DT, &mut cues);
        assert!(!player.mover.on_ground);
        assert!(player.mover.vel.y < 0.0);
        assert_eq!(cues, vec![SoundCue::Jump]);

        // Mid-air jump is ignored
        let vy = player.mover.vel.y;
        step_player(&mut player, Steer::None, true, &world, &tuning, DT, &mut cues);
        assert!(player.mover.vel.y > vy);
        assert_eq!(cues.len(), 1);
    }

    #[test]
    fn test_walking_into_wall_stops_player() {
        let world = flat_world();
        let tuning = Tuning::default();
        let mut player = PlayerState::new(Vec2::new(500.0, 372.0));
        let mut cues = Vec::new();

        for _ in 0..120 {
            step_player(&mut player, Steer::Right, false, &world, &tuning, DT, &mut cues);
        }
        assert_eq!(player.rect().right(), 600.0);
        assert_eq!(player.facing, 1);
    }

    #[test]
    fn test_clamped_to_world_left_edge() {
        let world = flat_world();
        let tuning = Tuning::default();
        let mut player = PlayerState::new(Vec2::new(5.0, 372.0));
        let mut cues = Vec::new();

        for _ in 0..30 {
            step_player(&mut player, Steer::Left, false, &world, &tuning, DT, &mut cues);
        }
        assert_eq!(player.mover.pos.x, 0.0);
        assert_eq!(player.facing, -1);
    }
}
