//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per frame, no swept collision
//! - Seeded RNG only (item drops)
//! - Stable iteration order (registration order for obstacles, layout order for bricks)
//! - No rendering or platform dependencies

pub mod ball;
pub mod brick;
pub mod collision;
pub mod geom;
pub mod item;
pub mod layout;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use brick::{Brick, Durability};
pub use collision::{
    Collidable, CollisionManager, ImpactSide, ObstacleId, Obstacles, ResolutionPolicy,
    detect_impact_side,
};
pub use geom::{Arena, Rect, circles_overlap, point_in_rect, rect_overlaps_circle, rects_overlap};
pub use item::{EffectEntry, Item, ItemEffect, ItemKind, ItemMode};
pub use layout::generate_bricks;
pub use paddle::{Facing, Paddle};
pub use state::{Difficulty, GameEvent, GamePhase, GameState, Lives, Score};
pub use tick::{TickInput, tick};
