//! The player's paddle, which sits against one of the four walls
//!
//! Pointer input picks the nearest wall and the position along it. The long
//! axis always lies along the occupied wall.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geom::{Arena, Rect};
use crate::consts::*;

/// The wall a paddle occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Top,
    Bottom,
    Left,
    Right,
}

impl Facing {
    /// Tie-break order for equidistant walls (first wins)
    pub const PRIORITY: [Facing; 4] = [Facing::Top, Facing::Bottom, Facing::Left, Facing::Right];

    /// True for walls whose long axis is horizontal
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Facing::Top | Facing::Bottom)
    }

    /// Wall nearest to a pointer position
    pub fn nearest(arena: &Arena, x: f64, y: f64) -> Facing {
        let distance = |facing: Facing| match facing {
            Facing::Top => y,
            Facing::Bottom => arena.height - y,
            Facing::Left => x,
            Facing::Right => arena.width - x,
        };

        let mut best = Facing::PRIORITY[0];
        let mut best_dist = distance(best);
        for facing in Facing::PRIORITY.into_iter().skip(1) {
            let d = distance(facing);
            if d < best_dist {
                best = facing;
                best_dist = d;
            }
        }
        best
    }
}

/// The paddle. One per game, owned by the game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub facing: Facing,
    /// Multiplier on the long axis
    pub scale: f64,
    /// Tick at which a temporary resize reverts to scale 1.0
    pub resize_expires_at: Option<u64>,
    arena: Arena,
}

impl Paddle {
    /// Paddle on the bottom wall, centered
    pub fn new(arena: Arena) -> Self {
        let mut paddle = Self {
            x: 0.0,
            y: 0.0,
            width: PADDLE_LONG,
            height: PADDLE_SHORT,
            facing: Facing::Bottom,
            scale: 1.0,
            resize_expires_at: None,
            arena,
        };
        let c = arena.center();
        paddle.set_position(Facing::Bottom, c.x, c.y);
        paddle
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn long_axis(&self) -> f64 {
        (PADDLE_LONG * self.scale).min(self.wall_length())
    }

    fn wall_length(&self) -> f64 {
        if self.facing.is_horizontal() {
            self.arena.width
        } else {
            self.arena.height
        }
    }

    /// Map a pointer position onto the nearest wall
    pub fn track_pointer(&mut self, x: f64, y: f64) {
        let facing = Facing::nearest(&self.arena, x, y);
        self.set_position(facing, x, y);
    }

    /// Put the paddle on `facing`, centered on the pointer along that wall,
    /// then clamp into the arena.
    pub fn set_position(&mut self, facing: Facing, pointer_x: f64, pointer_y: f64) {
        if facing != self.facing {
            log::debug!("paddle moved from {:?} to {:?}", self.facing, facing);
        }
        self.facing = facing;
        let long = self.long_axis();

        match facing {
            Facing::Top => {
                self.width = long;
                self.height = PADDLE_SHORT;
                self.y = PADDLE_MARGIN;
                self.x = pointer_x - self.width / 2.0;
            }
            Facing::Bottom => {
                self.width = long;
                self.height = PADDLE_SHORT;
                self.y = self.arena.height - self.height - PADDLE_MARGIN;
                self.x = pointer_x - self.width / 2.0;
            }
            Facing::Left => {
                self.width = PADDLE_SHORT;
                self.height = long;
                self.x = PADDLE_MARGIN;
                self.y = pointer_y - self.height / 2.0;
            }
            Facing::Right => {
                self.width = PADDLE_SHORT;
                self.height = long;
                self.x = self.arena.width - self.width - PADDLE_MARGIN;
                self.y = pointer_y - self.height / 2.0;
            }
        }
        self.clamp();
    }

    fn clamp(&mut self) {
        self.x = self.x.clamp(0.0, (self.arena.width - self.width).max(0.0));
        self.y = self.y.clamp(0.0, (self.arena.height - self.height).max(0.0));
    }

    /// Re-lay the paddle on its current wall around its current center
    fn relayout(&mut self) {
        let c = self.rect().center();
        self.set_position(self.facing, c.x, c.y);
    }

    /// Scale the long axis and revert to 1.0 at `expires_at`.
    ///
    /// Compounded shrinks bottom out at `PADDLE_MIN_SCALE`.
    pub fn resize(&mut self, multiplier: f64, expires_at: u64) {
        assert!(
            multiplier.is_finite() && multiplier > 0.0,
            "paddle scale must be positive and finite, got {multiplier}"
        );
        self.scale = (self.scale * multiplier).max(PADDLE_MIN_SCALE);
        self.resize_expires_at = Some(expires_at);
        log::debug!("paddle scale now {:.2} until tick {}", self.scale, expires_at);
        self.relayout();
    }

    pub fn enlarge(&mut self, expires_at: u64) {
        self.resize(PADDLE_ENLARGE, expires_at);
    }

    pub fn shrink(&mut self, expires_at: u64) {
        self.resize(PADDLE_SHRINK, expires_at);
    }

    /// Revert an expired resize. Returns true if the paddle changed.
    pub fn expire_resize(&mut self, now: u64) -> bool {
        match self.resize_expires_at {
            Some(at) if now >= at => {
                self.reset_scale();
                true
            }
            _ => false,
        }
    }

    /// Back to default size with no pending expiry
    pub fn reset_scale(&mut self) {
        self.scale = 1.0;
        self.resize_expires_at = None;
        self.relayout();
    }

    /// Ball vs paddle, checking only the arena-interior face precisely.
    ///
    /// Side paddles only catch a ball moving toward their wall.
    pub fn hits_ball(&self, ball: &Ball) -> bool {
        let r = ball.radius();
        let p = ball.pos;
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let in_x = p.x >= x && p.x <= x + w;
        let in_y = p.y >= y && p.y <= y + h;

        match self.facing {
            Facing::Top => p.y - r <= y + h && p.y >= y && in_x,
            Facing::Bottom => p.y + r >= y && p.y <= y + h && in_x,
            Facing::Left => ball.vel.x < 0.0 && p.x - r <= x + w && p.x >= x && in_y,
            Facing::Right => ball.vel.x > 0.0 && p.x + r >= x && p.x <= x + w && in_y,
        }
    }

    /// Deflect the ball and push it just clear of the paddle face
    pub fn deflect(&self, ball: &mut Ball) {
        let r = ball.radius();
        match self.facing {
            Facing::Top | Facing::Bottom => {
                let offset_ratio = (((ball.pos.x - self.x) / self.width - 0.5) * 2.0).clamp(-1.0, 1.0);
                if self.facing == Facing::Top {
                    ball.bounce_with_angle(offset_ratio, 1.0);
                    ball.pos.y = self.y + self.height + r;
                } else {
                    ball.bounce_with_angle(offset_ratio, -1.0);
                    ball.pos.y = self.y - r;
                }
            }
            Facing::Left => {
                ball.vel.x = ball.vel.x.abs();
                ball.pos.x = self.x + self.width + r;
            }
            Facing::Right => {
                ball.vel.x = -ball.vel.x.abs();
                ball.pos.x = self.x - r;
            }
        }
    }

    /// Face center in world space (for rendering and AI)
    pub fn center(&self) -> DVec2 {
        self.rect().center()
    }
}
