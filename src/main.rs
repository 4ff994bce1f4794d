//! Block Crash headless runner
//!
//! Plays a game with a simple autopilot and logs what happens. Usage:
//!
//! ```text
//! block-crash [EASY|NORMAL|HARD] [seed] [settings.json]
//! ```

use std::path::Path;

use block_crash::Settings;
use block_crash::consts::STEPS_PER_SECOND;
use block_crash::sim::{Arena, Difficulty, GameEvent, GamePhase, GameState, TickInput, tick};

/// Give up after ten simulated minutes
const MAX_TICKS: u64 = 10 * 60 * STEPS_PER_SECOND;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let difficulty = args
        .first()
        .and_then(|s| Difficulty::from_str(s))
        .unwrap_or(Difficulty::Easy);
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let settings = args
        .get(2)
        .map(|p| Settings::load(Path::new(p)))
        .unwrap_or_default();

    log::info!("Block Crash starting: {} seed={}", difficulty.as_str(), seed);
    let mut state = GameState::new(Arena::default(), difficulty, settings.resolution, seed);

    let mut ticks = 0u64;
    let mut levels_cleared = 0u32;
    while state.phase != GamePhase::GameOver && ticks < MAX_TICKS {
        let input = autopilot(&state);
        tick(&mut state, &input, &settings);
        ticks += 1;

        for event in &state.events {
            match event {
                GameEvent::LevelCleared => levels_cleared += 1,
                GameEvent::BallLost { lives_left } => {
                    log::info!("Ball lost at tick {}, {} lives left", ticks, lives_left)
                }
                GameEvent::ItemCollected(kind) => log::info!("Picked up {:?}", kind),
                _ => {}
            }
        }
    }

    log::info!(
        "Finished after {} ticks: phase={:?} level={} score={} cleared={}",
        ticks,
        state.phase,
        state.difficulty.as_str(),
        state.score.get(),
        levels_cleared
    );
}

/// Keep the paddle on the wall the ball is heading toward, under the ball
fn autopilot(state: &GameState) -> TickInput {
    let pointer = state.ball.as_ref().map(|ball| {
        let arena = state.arena;
        if ball.vel.y.abs() >= ball.vel.x.abs() {
            let y = if ball.vel.y > 0.0 { arena.height } else { 0.0 };
            (ball.pos.x, y)
        } else {
            let x = if ball.vel.x > 0.0 { arena.width } else { 0.0 };
            (x, ball.pos.y)
        }
    });
    TickInput {
        pointer,
        ..Default::default()
    }
}
