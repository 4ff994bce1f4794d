//! Game state and the per-difficulty tables
//!
//! One `GameState` owns everything the step function touches. Consumers
//! (rendering, audio, HUD) read it and drain `events`; they never mutate it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::Brick;
use super::collision::{CollisionManager, ObstacleId, ResolutionPolicy};
use super::geom::Arena;
use super::item::{Item, ItemKind};
use super::layout::generate_bricks;
use super::paddle::Paddle;

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "EASY" => Some(Difficulty::Easy),
            "NORMAL" => Some(Difficulty::Normal),
            "HARD" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Brick grid (rows, cols)
    pub fn grid(&self) -> (usize, usize) {
        (5, 8)
    }

    /// Hits each destructible brick takes
    pub fn brick_hits(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn points_per_brick(&self) -> u64 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Normal => 20,
            Difficulty::Hard => 30,
        }
    }

    pub fn starting_lives(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => 4,
            Difficulty::Hard => 3,
        }
    }

    /// Whether the layout places indestructible obstacles
    pub fn has_obstacles(&self) -> bool {
        *self == Difficulty::Hard
    }

    /// Whether destroyed bricks may drop items
    pub fn drops_items(&self) -> bool {
        *self != Difficulty::Easy
    }

    /// Level that follows a clear (wraps back to EASY)
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Level won; next level starts when `remaining` reaches zero
    LevelCleared { remaining: u32 },
    /// Out of lives
    GameOver,
}

/// Things that happened during a tick, for audio/render consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted(Difficulty),
    PaddleHit,
    BrickHit { index: usize },
    BrickDestroyed { index: usize },
    ItemDropped(ItemKind),
    ItemCollected(ItemKind),
    BallLost { lives_left: u32 },
    LevelCleared,
    GameOver,
}

/// Remaining lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lives {
    current: u32,
    max: u32,
}

impl Lives {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn get(&self) -> u32 {
        self.current
    }

    pub fn lose(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Capped at the starting count
    pub fn gain(&mut self) {
        self.current = (self.current + 1).min(self.max);
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }
}

/// Points earned this level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    points: u64,
    per_brick: u64,
}

impl Score {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            points: 0,
            per_brick: difficulty.points_per_brick(),
        }
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.points
    }

    pub fn add_brick(&mut self) {
        self.points += self.per_brick;
    }
}

/// Complete game state, owned by the loop driver
#[derive(Debug, Clone)]
pub struct GameState {
    pub arena: Arena,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The one paddle for the whole session
    pub paddle: Paddle,
    /// Layout order; destroyed bricks stay in place
    pub bricks: Vec<Brick>,
    pub items: Vec<Item>,
    /// `None` after the last life is gone
    pub ball: Option<Ball>,
    pub collisions: CollisionManager,
    pub lives: Lives,
    pub score: Score,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
}

impl GameState {
    /// New session starting at `difficulty`.
    ///
    /// `events` holds the opening `LevelStarted` until the first tick clears it.
    pub fn new(arena: Arena, difficulty: Difficulty, policy: ResolutionPolicy, seed: u64) -> Self {
        let mut state = Self {
            arena,
            difficulty,
            phase: GamePhase::Playing,
            time_ticks: 0,
            paddle: Paddle::new(arena),
            bricks: Vec::new(),
            items: Vec::new(),
            ball: None,
            collisions: CollisionManager::new(policy),
            lives: Lives::new(difficulty.starting_lives()),
            score: Score::new(difficulty),
            events: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.start_level(difficulty);
        state
    }

    /// Rebuild the level in one go: bricks, registry, ball, lives, score, items.
    ///
    /// Takes `&mut self`, so no tick can observe a half-reset level.
    pub fn start_level(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.bricks = generate_bricks(difficulty, self.arena.width);

        self.collisions.reset();
        self.collisions.add(ObstacleId::Paddle);
        for i in 0..self.bricks.len() {
            self.collisions.add(ObstacleId::Brick(i));
        }

        self.items.clear();
        self.paddle.reset_scale();
        self.ball = Some(Ball::spawn(&self.arena));
        self.lives = Lives::new(difficulty.starting_lives());
        self.score = Score::new(difficulty);
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted(difficulty));

        log::info!(
            "Level {} started: {} bricks, {} lives",
            difficulty.as_str(),
            self.bricks.len(),
            self.lives.get()
        );
    }

    /// Replace a lost ball with a fresh one at the spawn point
    pub fn respawn_ball(&mut self) {
        self.ball = Some(Ball::spawn(&self.arena));
    }

    /// Bricks that still block the level from clearing
    pub fn bricks_left(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.counts_for_clear() && !b.destroyed)
            .count()
    }

    pub fn is_cleared(&self) -> bool {
        !self.bricks.is_empty() && self.bricks_left() == 0
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
