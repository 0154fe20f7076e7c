//! Jumpman headless runner
//!
//! Drives the simulation with the seeded autopilot at a fixed frame rate,
//! restarting finished sessions, and logs how each session ended. Rendering
//! and audio backends plug in through `RenderSnapshot` and `CueSink`; this
//! binary uses the logging sink only. Set `RUST_LOG=debug` to see cues and
//! combat events, `JUMPMAN_SEED` to change the autopilot seed, and
//! `JUMPMAN_REALTIME=1` to pace frames and time them with the wall clock.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use jumpman::Game;
use jumpman::audio::LogSink;
use jumpman::autopilot::Autopilot;

/// Fixed frame step for the headless loop
const FRAME_DT: f32 = 1.0 / 60.0;
/// Two minutes of play
const MAX_FRAMES: u32 = 60 * 120;
const DEFAULT_SEED: u64 = 12345;

fn main() -> ExitCode {
    env_logger::init();

    let seed = std::env::var("JUMPMAN_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    let realtime = std::env::var("JUMPMAN_REALTIME").is_ok_and(|v| v == "1");
    log::info!(
        "Jumpman (headless) starting with seed {}{}",
        seed,
        if realtime { ", real-time pacing" } else { "" }
    );

    let mut game = match Game::standard() {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to build session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut pilot = Autopilot::new(seed);
    let mut sink = LogSink::default();
    let mut last_phase = game.phase();

    for _ in 0..MAX_FRAMES {
        let input = pilot.next_input(game.session());
        if realtime {
            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
            game.update_at(&input, Instant::now());
        } else {
            game.update(&input, FRAME_DT);
        }
        game.play_cues(&mut sink);

        let phase = game.phase();
        if phase != last_phase {
            let snapshot = game.snapshot();
            log::info!("{:?}: {}", phase, snapshot.hud_line());
            last_phase = phase;
        }
    }

    let snapshot = game.snapshot();
    match game.session().state_hash() {
        Ok(hash) => log::info!("Final state hash {:016x}", hash),
        Err(e) => log::warn!("Could not hash final state: {}", e),
    }
    log::info!(
        "Done: {} session(s), best score {}, {} cues, last frame: {}",
        game.sessions_started(),
        game.best_score(),
        sink.played,
        snapshot.hud_line()
    );

    ExitCode::SUCCESS
}
