//! Block Crash - a breakout arena with a paddle that hops between walls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, bricks, items, game state)
//! - `settings`: Data-driven tuning (resolution policy, item table, timers)

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Physics steps per second (one step per rendered frame)
    pub const STEPS_PER_SECOND: u64 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f64 = 800.0;
    pub const ARENA_HEIGHT: f64 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f64 = 40.0;
    /// Spawn point is offset below the arena center
    pub const BALL_SPAWN_OFFSET_Y: f64 = 150.0;
    pub const BALL_START_VEL: (f64, f64) = (2.0, -2.0);
    /// Maximum paddle deflection from the outward normal (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f64 = std::f64::consts::FRAC_PI_3;

    /// Paddle defaults: long axis lies along the wall, short axis points inward
    pub const PADDLE_LONG: f64 = 150.0;
    pub const PADDLE_SHORT: f64 = 60.0;
    /// Gap between the paddle and the wall it occupies
    pub const PADDLE_MARGIN: f64 = 10.0;
    pub const PADDLE_ENLARGE: f64 = 1.5;
    pub const PADDLE_SHRINK: f64 = 0.7;
    /// Floor for compounded shrinks
    pub const PADDLE_MIN_SCALE: f64 = 0.1;

    /// Item defaults
    pub const ITEM_SIZE: f64 = 80.0;
    /// Downward drift per step for falling items
    pub const ITEM_FALL_SPEED: f64 = 2.0;
    pub const SPEED_BUFF: f64 = 1.2;
    pub const SPEED_DEBUFF: f64 = 0.8;

    /// Brick grid defaults
    pub const BRICK_SIZE: f64 = 80.0;
    pub const BRICK_GAP: f64 = 5.0;
    pub const BRICK_OFFSET_TOP: f64 = 50.0;
}

/// Speed of a velocity vector
#[inline]
pub fn speed(vel: DVec2) -> f64 {
    vel.length()
}

/// Angle of a velocity measured from straight up (negative y), clockwise positive
#[inline]
pub fn angle_from_up(vel: DVec2) -> f64 {
    vel.x.atan2(-vel.y)
}
