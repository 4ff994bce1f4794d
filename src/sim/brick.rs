//! Bricks and their durability state machine

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::{ImpactSide, detect_impact_side};
use super::geom::{Rect, rect_overlaps_circle};

/// How many more hits a brick can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Durability {
    Hits(u32),
    /// Bounces the ball forever, never destroyed
    Indestructible,
}

/// A brick entity. Never removed from the level, only flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub durability: Durability,
    pub destroyed: bool,
    /// Set by the scorer once this brick's destruction has been credited
    pub counted: bool,
}

impl Brick {
    pub fn new(rect: Rect, hits: u32) -> Self {
        assert!(hits > 0, "a brick needs at least one hit");
        Self {
            rect,
            durability: Durability::Hits(hits),
            destroyed: false,
            counted: false,
        }
    }

    pub fn indestructible(rect: Rect) -> Self {
        Self {
            rect,
            durability: Durability::Indestructible,
            destroyed: false,
            counted: false,
        }
    }

    #[inline]
    pub fn is_indestructible(&self) -> bool {
        self.durability == Durability::Indestructible
    }

    /// Hits left, `None` for indestructible bricks
    pub fn hits_remaining(&self) -> Option<u32> {
        match self.durability {
            Durability::Hits(n) => Some(n),
            Durability::Indestructible => None,
        }
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        !self.is_indestructible()
    }

    pub fn hits_ball(&self, ball: &Ball) -> bool {
        !self.destroyed && rect_overlaps_circle(&self.rect, ball.pos, ball.radius())
    }

    /// Bounce the ball off the struck side and take one hit
    pub fn absorb_hit(&mut self, ball: &mut Ball) -> ImpactSide {
        let side = detect_impact_side(ball.pos, ball.radius(), &self.rect);
        if side.is_horizontal() {
            ball.bounce_x();
        } else {
            ball.bounce_y();
        }

        if let Durability::Hits(n) = self.durability {
            let left = n.saturating_sub(1);
            self.durability = Durability::Hits(left);
            if left == 0 {
                self.destroyed = true;
            }
        }
        side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn brick_rect() -> Rect {
        Rect::new(100.0, 100.0, 80.0, 80.0)
    }

    /// Ball overlapping the brick's left face, heading right
    fn ball_from_left() -> Ball {
        Ball::new(DVec2::new(95.0, 140.0), DVec2::new(2.0, 0.0), 10.0)
    }

    #[test]
    fn test_two_hit_brick() {
        let mut brick = Brick::new(brick_rect(), 2);

        let mut ball = ball_from_left();
        assert!(brick.hits_ball(&ball));
        brick.absorb_hit(&mut ball);
        assert!(!brick.destroyed);
        assert_eq!(brick.hits_remaining(), Some(1));

        let mut ball = ball_from_left();
        brick.absorb_hit(&mut ball);
        assert!(brick.destroyed);
        assert_eq!(brick.hits_remaining(), Some(0));
    }

    #[test]
    fn test_destroyed_brick_is_inert() {
        let mut brick = Brick::new(brick_rect(), 1);
        let mut ball = ball_from_left();
        brick.absorb_hit(&mut ball);
        assert!(brick.destroyed);
        assert!(!brick.hits_ball(&ball_from_left()));
    }

    #[test]
    fn test_indestructible_brick_bounces_forever() {
        let mut brick = Brick::indestructible(brick_rect());
        let mut ball = ball_from_left();
        for i in 0..100 {
            let before = ball.vel.x;
            assert!(brick.hits_ball(&ball));
            brick.absorb_hit(&mut ball);
            assert_eq!(ball.vel.x, -before, "hit {i} should bounce");
            assert!(!brick.destroyed);
        }
        assert_eq!(brick.hits_remaining(), None);
        assert!(!brick.counts_for_clear());
    }

    #[test]
    fn test_hit_from_above_bounces_y() {
        let mut brick = Brick::new(brick_rect(), 1);
        let mut ball = Ball::new(DVec2::new(140.0, 92.0), DVec2::new(1.0, 2.0), 10.0);
        let side = brick.absorb_hit(&mut ball);
        assert_eq!(side, ImpactSide::Top);
        assert_eq!(ball.vel, DVec2::new(1.0, -2.0));
    }
}
