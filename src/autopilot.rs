//! Seeded demo input
//!
//! Drives a session without a human: runs right, hops over enemies it sees
//! coming, jumps at random, and now and then backs off for a moment. The same
//! seed always produces the same input stream for the same session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::game::FrameInput;
use crate::sim::{Session, TickInput};

/// Distance ahead at which an approaching enemy triggers a hop
const ENEMY_LOOKAHEAD: f32 = 90.0;
/// Chance per tick of a random jump
const RANDOM_JUMP_CHANCE: f64 = 0.04;
/// Chance per tick of starting to back off
const BACKOFF_CHANCE: f64 = 0.01;

pub struct Autopilot {
    rng: Pcg32,
    backoff_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            backoff_ticks: 0,
        }
    }

    /// Choose input for the next tick. Asks for a restart once the session ends.
    pub fn next_input(&mut self, session: &Session) -> FrameInput {
        if session.phase.is_terminal() {
            return FrameInput {
                restart: true,
                ..Default::default()
            };
        }

        if self.backoff_ticks == 0 && self.rng.random_bool(BACKOFF_CHANCE) {
            self.backoff_ticks = self.rng.random_range(5..30);
        }

        let backing_off = self.backoff_ticks > 0;
        self.backoff_ticks = self.backoff_ticks.saturating_sub(1);

        let player = session.player.rect();
        let enemy_ahead = session.enemies.iter().filter(|e| e.alive).any(|e| {
            let gap = e.rect().left() - player.right();
            gap > 0.0 && gap < ENEMY_LOOKAHEAD && (e.rect().top() - player.top()).abs() < 40.0
        });

        let random_jump = self.rng.random_bool(RANDOM_JUMP_CHANCE);

        TickInput {
            move_left: backing_off,
            move_right: !backing_off,
            jump_pressed: session.player.mover.on_ground && (enemy_ahead || random_jump),
        }
        .into()
    }
}
