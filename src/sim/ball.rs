//! The ball: the only moving collider in the simulation

use glam::DVec2;
use serde::Serialize;

use super::collision::{CollisionManager, ObstacleId, Obstacles};
use super::geom::Arena;
use crate::consts::*;

/// A ball entity. Serialize-only: `Ball::new` is the one way in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ball {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Fixed for the ball's lifetime
    radius: f64,
    pub alive: bool,
}

impl Ball {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        assert!(radius > 0.0, "ball radius must be positive, got {radius}");
        Self {
            pos,
            vel,
            radius,
            alive: true,
        }
    }

    /// Fresh ball at the spawn point with the default launch velocity
    pub fn spawn(arena: &Arena) -> Self {
        let pos = arena.center() + DVec2::new(0.0, BALL_SPAWN_OFFSET_Y);
        let vel = DVec2::new(BALL_START_VEL.0, BALL_START_VEL.1);
        Self::new(pos, vel, BALL_RADIUS)
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        crate::speed(self.vel)
    }

    /// Any wall touch kills the ball: every side can hold the paddle, so there
    /// is no outer wall to bounce off.
    pub fn check_wall_collision(&mut self, arena: &Arena) {
        if arena.circle_escapes(self.pos, self.radius) {
            log::debug!("ball left the arena at ({:.1}, {:.1})", self.pos.x, self.pos.y);
            self.alive = false;
        }
    }

    /// Hand the ball to the collision manager, which may change velocity and snap position
    pub fn resolve_obstacles(
        &mut self,
        manager: &CollisionManager,
        obstacles: &mut Obstacles<'_>,
    ) -> Vec<ObstacleId> {
        manager.handle(self, obstacles)
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// One physics step: wall test, then obstacle resolution, then integration.
    ///
    /// A ball that dies on the wall test is not resolved against obstacles, so a
    /// simultaneous wall and obstacle touch always kills it.
    pub fn step(
        &mut self,
        arena: &Arena,
        manager: &CollisionManager,
        obstacles: &mut Obstacles<'_>,
    ) -> Vec<ObstacleId> {
        if !self.alive {
            return Vec::new();
        }
        self.check_wall_collision(arena);
        if !self.alive {
            return Vec::new();
        }
        let hits = self.resolve_obstacles(manager, obstacles);
        self.integrate();
        hits
    }

    #[inline]
    pub fn bounce_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    #[inline]
    pub fn bounce_y(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Re-aim the ball off a paddle, keeping its speed.
    ///
    /// `offset_ratio` in [-1, 1] maps linearly onto [-60°, 60°] away from the
    /// paddle's outward normal. `vertical_sign` is -1 to send the ball up, +1 down.
    pub fn bounce_with_angle(&mut self, offset_ratio: f64, vertical_sign: f64) {
        let speed = self.speed();
        let angle = offset_ratio.clamp(-1.0, 1.0) * MAX_BOUNCE_ANGLE;
        self.vel.x = speed * angle.sin();
        self.vel.y = vertical_sign.signum() * (speed * angle.cos()).abs();
    }

    /// Multiply the velocity. Compounds on repeated application.
    pub fn adjust_speed(&mut self, factor: f64) {
        self.vel *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ball_at(x: f64, y: f64, dx: f64, dy: f64) -> Ball {
        Ball::new(DVec2::new(x, y), DVec2::new(dx, dy), 10.0)
    }

    #[test]
    fn test_spawn_defaults() {
        let arena = Arena::new(800.0, 800.0);
        let ball = Ball::spawn(&arena);
        assert_eq!(ball.pos, DVec2::new(400.0, 550.0));
        assert_eq!(ball.vel, DVec2::new(2.0, -2.0));
        assert_eq!(ball.radius(), BALL_RADIUS);
        assert!(ball.alive);
    }

    #[test]
    fn test_bounce_axes() {
        let mut ball = ball_at(50.0, 50.0, 3.0, -4.0);
        ball.bounce_x();
        assert_eq!(ball.vel, DVec2::new(-3.0, -4.0));
        ball.bounce_y();
        assert_eq!(ball.vel, DVec2::new(-3.0, 4.0));
    }

    #[test]
    fn test_bounce_with_angle_extremes() {
        let mut ball = ball_at(50.0, 50.0, 0.0, 5.0);
        ball.bounce_with_angle(1.0, -1.0);
        assert!((crate::angle_from_up(ball.vel) - 60f64.to_radians()).abs() < 1e-12);

        let mut ball = ball_at(50.0, 50.0, 0.0, 5.0);
        ball.bounce_with_angle(-1.0, -1.0);
        assert!((crate::angle_from_up(ball.vel) + 60f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_bounce_with_angle_center_goes_straight() {
        let mut ball = ball_at(50.0, 50.0, 3.0, 4.0);
        ball.bounce_with_angle(0.0, -1.0);
        assert!(ball.vel.x.abs() < 1e-12);
        assert!((ball.vel.y + 5.0).abs() < 1e-12);

        ball.bounce_with_angle(0.0, 1.0);
        assert!((ball.vel.y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_adjust_speed_compounds() {
        let mut ball = ball_at(50.0, 50.0, 2.0, -2.0);
        ball.adjust_speed(1.2);
        ball.adjust_speed(1.2);
        assert!((ball.vel.x - 2.88).abs() < 1e-12);
        assert!((ball.vel.y + 2.88).abs() < 1e-12);
    }

    #[test]
    fn test_wall_touch_kills() {
        let arena = Arena::new(100.0, 100.0);
        let mut ball = ball_at(10.0, 50.0, -1.0, 0.0);
        ball.check_wall_collision(&arena);
        assert!(ball.alive, "touching the wall is not crossing it");
        ball.integrate();
        ball.check_wall_collision(&arena);
        assert!(!ball.alive);
    }

    #[test]
    fn test_step_integrates_without_obstacles() {
        let arena = Arena::new(100.0, 100.0);
        let manager = CollisionManager::default();
        let mut paddle = crate::sim::Paddle::new(arena);
        let mut bricks: Vec<crate::sim::Brick> = Vec::new();
        let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);

        let mut ball = ball_at(50.0, 50.0, 1.5, -0.5);
        let hits = ball.step(&arena, &manager, &mut obstacles);
        assert!(hits.is_empty());
        assert_eq!(ball.pos, DVec2::new(51.5, 49.5));
    }

    #[test]
    fn test_wall_beats_obstacle_in_same_step() {
        use crate::sim::Collidable;

        let arena = Arena::new(800.0, 800.0);
        let mut manager = CollisionManager::default();
        manager.add(ObstacleId::Paddle);
        let mut paddle = crate::sim::Paddle::new(arena);
        let mut bricks: Vec<crate::sim::Brick> = Vec::new();
        let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);

        // Past the bottom wall and overlapping the bottom paddle
        let mut ball = Ball::new(DVec2::new(400.0, 770.0), DVec2::new(1.0, 3.0), 40.0);
        assert!(obstacles.get(ObstacleId::Paddle).unwrap().check_collision(&ball));
        let hits = ball.step(&arena, &manager, &mut obstacles);
        assert!(!ball.alive);
        assert!(hits.is_empty());
        assert_eq!(ball.vel, DVec2::new(1.0, 3.0));
        assert_eq!(ball.pos, DVec2::new(400.0, 770.0));
    }

    #[test]
    #[should_panic]
    fn test_non_positive_radius_rejected() {
        let _ = Ball::new(DVec2::ZERO, DVec2::ZERO, 0.0);
    }

    proptest! {
        #[test]
        fn prop_bounce_with_angle_preserves_speed(
            ratio in -1.0f64..=1.0,
            dx in -50.0f64..50.0,
            dy in -50.0f64..50.0,
            up in any::<bool>(),
        ) {
            let mut ball = ball_at(100.0, 100.0, dx, dy);
            let before = ball.speed();
            ball.bounce_with_angle(ratio, if up { -1.0 } else { 1.0 });
            prop_assert!((ball.speed() - before).abs() <= 1e-9);
        }

        #[test]
        fn prop_bounce_with_angle_stays_within_sixty_degrees(
            ratio in -1.0f64..=1.0,
            dx in 0.5f64..50.0,
            dy in 0.5f64..50.0,
        ) {
            let mut ball = ball_at(100.0, 100.0, dx, dy);
            ball.bounce_with_angle(ratio, -1.0);
            prop_assert!(ball.vel.y < 0.0);
            prop_assert!(crate::angle_from_up(ball.vel).abs() <= MAX_BOUNCE_ANGLE + 1e-12);
        }

        #[test]
        fn prop_free_ball_dies_exactly_when_crossing(
            x in 60.0f64..740.0,
            y in 60.0f64..740.0,
            dx in prop_oneof![-7.0f64..-0.1, 0.1f64..7.0],
            dy in prop_oneof![-7.0f64..-0.1, 0.1f64..7.0],
        ) {
            let arena = Arena::new(800.0, 800.0);
            let manager = CollisionManager::default();
            let mut paddle = crate::sim::Paddle::new(arena);
            let mut bricks: Vec<crate::sim::Brick> = Vec::new();
            let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);
            let mut ball = Ball::new(DVec2::new(x, y), DVec2::new(dx, dy), 40.0);

            for _ in 0..20_000 {
                let escaped = arena.circle_escapes(ball.pos, ball.radius());
                ball.step(&arena, &manager, &mut obstacles);
                prop_assert_eq!(ball.alive, !escaped);
                if !ball.alive {
                    break;
                }
            }
            prop_assert!(!ball.alive);
        }
    }
}
