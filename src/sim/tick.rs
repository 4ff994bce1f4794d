//! Per-frame simulation step
//!
//! Order within a step is fixed: wall test, obstacle resolution, integration,
//! then items, then scoring, then win/loss checks.

use rand::Rng;

use super::collision::{ObstacleId, Obstacles};
use super::item::{Item, ItemEffect, ItemKind, ItemMode};
use super::state::{GameEvent, GamePhase, GameState};
use crate::Settings;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in arena coordinates
    pub pointer: Option<(f64, f64)>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one step.
///
/// `state.events` holds only what happened during this call, so the
/// `LevelStarted` pushed by `GameState::new` must be read before the first
/// tick. The resolution policy follows `settings.resolution` on every call.
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) {
    state.events.clear();
    state.collisions.policy = settings.resolution;

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::LevelCleared { remaining } => {
            if remaining <= 1 {
                let next = state.difficulty.next();
                state.start_level(next);
            } else {
                state.phase = GamePhase::LevelCleared {
                    remaining: remaining - 1,
                };
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Resize expiry first, so an expired buff never lasts into this step
    state.paddle.expire_resize(state.time_ticks);
    if let Some((x, y)) = input.pointer {
        state.paddle.track_pointer(x, y);
    }

    step_ball(state);
    if state.phase == GamePhase::GameOver {
        return;
    }

    step_items(state, settings);
    if state.phase == GamePhase::GameOver {
        return;
    }

    credit_bricks(state, settings);

    if state.is_cleared() {
        log::info!(
            "Level {} cleared with {} points",
            state.difficulty.as_str(),
            state.score.get()
        );
        state.ball = None;
        state.items.clear();
        state.phase = GamePhase::LevelCleared {
            remaining: settings.breather_ticks,
        };
        state.events.push(GameEvent::LevelCleared);
    }
}

/// Wall test, obstacle resolution, integration; then life loss if the ball died
fn step_ball(state: &mut GameState) {
    let Some(ball) = state.ball.as_mut() else {
        return;
    };

    let mut obstacles = Obstacles::new(&mut state.paddle, &mut state.bricks);
    let hits = ball.step(&state.arena, &state.collisions, &mut obstacles);
    let alive = ball.alive;

    for id in hits {
        match id {
            ObstacleId::Paddle => state.events.push(GameEvent::PaddleHit),
            ObstacleId::Brick(index) => {
                state.events.push(GameEvent::BrickHit { index });
                if state.bricks[index].destroyed {
                    state.events.push(GameEvent::BrickDestroyed { index });
                }
            }
        }
    }

    if !alive {
        let survived = lose_life(state);
        state.events.push(GameEvent::BallLost {
            lives_left: state.lives.get(),
        });
        if survived {
            state.respawn_ball();
        }
    }
}

/// Take a life. Returns false (and ends the game) when none are left.
fn lose_life(state: &mut GameState) -> bool {
    state.lives.lose();
    if !state.lives.is_dead() {
        return true;
    }

    log::info!("Game over with {} points", state.score.get());
    state.ball = None;
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver);
    false
}

/// Move items, test them for collection, apply collected effects once
fn step_items(state: &mut GameState, settings: &Settings) {
    let mut collected: Vec<ItemKind> = Vec::new();

    for item in state.items.iter_mut() {
        item.update(settings.item_mode);
        let caught = match settings.item_mode {
            ItemMode::Falling => {
                let mut obstacles = Obstacles::new(&mut state.paddle, &mut state.bricks);
                state.collisions.handle_item(item, &mut obstacles)
            }
            ItemMode::Static => match &state.ball {
                Some(ball) if item.hits_ball(ball) => item.collect(),
                _ => false,
            },
        };
        if caught {
            collected.push(item.kind);
        }
    }

    let floor = state.arena.height;
    state.items.retain(|i| !i.collected && !i.fell_out(floor));

    for kind in collected {
        state.events.push(GameEvent::ItemCollected(kind));
        apply_effect(state, kind, settings);
        if state.phase == GamePhase::GameOver {
            return;
        }
    }
}

/// Look up and apply the effect for a collected item
fn apply_effect(state: &mut GameState, kind: ItemKind, settings: &Settings) {
    let Some(effect) = settings.effect_for(kind) else {
        log::warn!("No effect configured for {:?}", kind);
        return;
    };

    match effect {
        ItemEffect::GainLife => state.lives.gain(),
        ItemEffect::LoseLife => {
            lose_life(state);
        }
        ItemEffect::BallSpeed(factor) => {
            if let Some(ball) = state.ball.as_mut() {
                ball.adjust_speed(factor);
            }
        }
        ItemEffect::PaddleScale(multiplier) => {
            if !(multiplier.is_finite() && multiplier > 0.0) {
                log::warn!("Ignoring paddle scale {} for {:?}", multiplier, kind);
                return;
            }
            let expires_at = state.time_ticks + settings.resize_duration_ticks;
            state.paddle.resize(multiplier, expires_at);
        }
    }
}

/// Credit newly destroyed bricks once, rolling for an item drop on each
fn credit_bricks(state: &mut GameState, settings: &Settings) {
    let can_drop = state.difficulty.drops_items() && !settings.drop_pool.is_empty();

    for index in 0..state.bricks.len() {
        let brick = &mut state.bricks[index];
        if !brick.destroyed || brick.counted {
            continue;
        }
        brick.counted = true;
        let center = brick.rect.center();
        state.score.add_brick();

        if can_drop && state.rng().random::<f64>() < settings.drop_chance {
            let pick = state.rng().random_range(0..settings.drop_pool.len());
            let kind = settings.drop_pool[pick];
            state.items.push(Item::centered_at(center, kind));
            state.events.push(GameEvent::ItemDropped(kind));
        }
    }
}
