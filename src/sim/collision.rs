//! Collision detection and response between the ball and the obstacles
//!
//! Obstacles (the paddle and every brick) share one capability set through the
//! [`Collidable`] trait. The [`CollisionManager`] keeps the registration order
//! and decides how many overlapping obstacles a single step resolves against.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::Brick;
use super::geom::{Rect, rects_overlap};
use super::item::Item;
use super::paddle::Paddle;

/// The side of a rectangle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl ImpactSide {
    /// Left/right impacts flip the horizontal velocity
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, ImpactSide::Left | ImpactSide::Right)
    }
}

/// Infer the struck side from the shallowest penetration.
///
/// Ties resolve Left, Right, Top, Bottom in that order. Discrete steps only:
/// a ball that tunnels deep into a brick may report the far side.
pub fn detect_impact_side(center: DVec2, radius: f64, rect: &Rect) -> ImpactSide {
    let depths = [
        (ImpactSide::Left, (center.x + radius) - rect.left()),
        (ImpactSide::Right, rect.right() - (center.x - radius)),
        (ImpactSide::Top, (center.y + radius) - rect.top()),
        (ImpactSide::Bottom, rect.bottom() - (center.y - radius)),
    ];

    let mut best = depths[0];
    for candidate in &depths[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Anything the ball can bounce off
pub trait Collidable {
    fn check_collision(&self, ball: &Ball) -> bool;

    fn on_collision(&mut self, ball: &mut Ball);

    /// Whether this obstacle can catch falling items
    fn check_item(&self, _item: &Item) -> bool {
        false
    }

    /// Catch an item. Returns true only on the first collection.
    fn on_item(&mut self, _item: &mut Item) -> bool {
        false
    }
}

impl Collidable for Paddle {
    fn check_collision(&self, ball: &Ball) -> bool {
        self.hits_ball(ball)
    }

    fn on_collision(&mut self, ball: &mut Ball) {
        self.deflect(ball);
    }

    fn check_item(&self, item: &Item) -> bool {
        !item.collected && rects_overlap(&self.rect(), &item.rect())
    }

    fn on_item(&mut self, item: &mut Item) -> bool {
        item.collect()
    }
}

impl Collidable for Brick {
    fn check_collision(&self, ball: &Ball) -> bool {
        self.hits_ball(ball)
    }

    fn on_collision(&mut self, ball: &mut Ball) {
        let side = self.absorb_hit(ball);
        log::debug!(
            "brick at ({:.0}, {:.0}) hit on {:?}, destroyed={}",
            self.rect.x,
            self.rect.y,
            side,
            self.destroyed
        );
    }
}

/// Handle to a registered obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleId {
    Paddle,
    /// Index into the level's brick list
    Brick(usize),
}

/// Mutable view of every obstacle, lent to the manager for one pass
pub struct Obstacles<'a> {
    pub paddle: &'a mut Paddle,
    pub bricks: &'a mut [Brick],
}

impl<'a> Obstacles<'a> {
    pub fn new(paddle: &'a mut Paddle, bricks: &'a mut [Brick]) -> Self {
        Self { paddle, bricks }
    }

    pub fn get(&self, id: ObstacleId) -> Option<&dyn Collidable> {
        match id {
            ObstacleId::Paddle => Some(&*self.paddle as &dyn Collidable),
            ObstacleId::Brick(i) => self.bricks.get(i).map(|b| b as &dyn Collidable),
        }
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut dyn Collidable> {
        match id {
            ObstacleId::Paddle => Some(&mut *self.paddle as &mut dyn Collidable),
            ObstacleId::Brick(i) => self.bricks.get_mut(i).map(|b| b as &mut dyn Collidable),
        }
    }
}

/// How many overlapping obstacles a ball resolves against per step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResolutionPolicy {
    /// Stop at the first registered obstacle that overlaps
    #[default]
    FirstMatch,
    /// Resolve every overlapping obstacle, in registration order
    AllMatch,
}

/// Registry of obstacles in registration order
#[derive(Debug, Clone, Default)]
pub struct CollisionManager {
    obstacles: Vec<ObstacleId>,
    pub policy: ResolutionPolicy,
}

impl CollisionManager {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            obstacles: Vec::new(),
            policy,
        }
    }

    /// Register an obstacle. The caller avoids duplicates.
    pub fn add(&mut self, id: ObstacleId) {
        self.obstacles.push(id);
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn registered(&self) -> &[ObstacleId] {
        &self.obstacles
    }

    /// Resolve the ball against the registry. Returns the obstacles it hit.
    pub fn handle(&self, ball: &mut Ball, obstacles: &mut Obstacles<'_>) -> Vec<ObstacleId> {
        let mut hits = Vec::new();
        for &id in &self.obstacles {
            let Some(obstacle) = obstacles.get_mut(id) else {
                continue;
            };
            if !obstacle.check_collision(ball) {
                continue;
            }
            obstacle.on_collision(ball);
            hits.push(id);
            if self.policy == ResolutionPolicy::FirstMatch {
                break;
            }
        }
        hits
    }

    /// Offer an item to every obstacle that can catch one.
    /// Returns true if the item was collected by this pass.
    pub fn handle_item(&self, item: &mut Item, obstacles: &mut Obstacles<'_>) -> bool {
        let mut collected = false;
        for &id in &self.obstacles {
            let Some(obstacle) = obstacles.get_mut(id) else {
                continue;
            };
            if obstacle.check_item(item) && obstacle.on_item(item) {
                collected = true;
            }
        }
        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Arena;
    use crate::sim::item::ItemKind;

    fn rect() -> Rect {
        Rect::new(100.0, 100.0, 80.0, 40.0)
    }

    #[test]
    fn test_detect_head_on_left() {
        // Moving right, vertically centered, just touching the left face
        let side = detect_impact_side(DVec2::new(92.0, 120.0), 10.0, &rect());
        assert_eq!(side, ImpactSide::Left);
    }

    #[test]
    fn test_detect_each_side() {
        let r = rect();
        assert_eq!(detect_impact_side(DVec2::new(188.0, 120.0), 10.0, &r), ImpactSide::Right);
        assert_eq!(detect_impact_side(DVec2::new(140.0, 92.0), 10.0, &r), ImpactSide::Top);
        assert_eq!(detect_impact_side(DVec2::new(140.0, 148.0), 10.0, &r), ImpactSide::Bottom);
    }

    #[test]
    fn test_detect_tie_prefers_left_then_top() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        // Corner hit with equal left and top depth
        assert_eq!(detect_impact_side(DVec2::new(-5.0, -5.0), 10.0, &r), ImpactSide::Left);
        // Equal right and bottom depth
        assert_eq!(detect_impact_side(DVec2::new(105.0, 105.0), 10.0, &r), ImpactSide::Right);
        // Equal top and bottom depth
        let flat = Rect::new(0.0, 0.0, 100.0, 10.0);
        assert_eq!(detect_impact_side(DVec2::new(50.0, 5.0), 10.0, &flat), ImpactSide::Top);
    }

    /// Two bricks side by side, both overlapped by one ball
    fn adjacent_bricks() -> (Vec<Brick>, Ball) {
        let bricks = vec![
            Brick::new(Rect::new(100.0, 100.0, 40.0, 40.0), 1),
            Brick::new(Rect::new(140.0, 100.0, 40.0, 40.0), 1),
        ];
        let ball = Ball::new(DVec2::new(140.0, 145.0), DVec2::new(0.0, -2.0), 10.0);
        (bricks, ball)
    }

    #[test]
    fn test_first_match_stops_at_first_hit() {
        let mut paddle = Paddle::new(Arena::new(800.0, 800.0));
        let (mut bricks, mut ball) = adjacent_bricks();
        let mut manager = CollisionManager::new(ResolutionPolicy::FirstMatch);
        manager.add(ObstacleId::Paddle);
        manager.add(ObstacleId::Brick(0));
        manager.add(ObstacleId::Brick(1));

        let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);
        let hits = manager.handle(&mut ball, &mut obstacles);
        assert_eq!(hits, vec![ObstacleId::Brick(0)]);
        assert!(bricks[0].destroyed);
        assert!(!bricks[1].destroyed);
        assert_eq!(ball.vel.y, 2.0);
    }

    #[test]
    fn test_all_match_resolves_every_overlap() {
        let mut paddle = Paddle::new(Arena::new(800.0, 800.0));
        let (mut bricks, mut ball) = adjacent_bricks();
        let mut manager = CollisionManager::new(ResolutionPolicy::AllMatch);
        manager.add(ObstacleId::Brick(0));
        manager.add(ObstacleId::Brick(1));

        let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);
        let hits = manager.handle(&mut ball, &mut obstacles);
        assert_eq!(hits, vec![ObstacleId::Brick(0), ObstacleId::Brick(1)]);
        assert!(bricks.iter().all(|b| b.destroyed));
        // Two bottom-side bounces cancel out
        assert_eq!(ball.vel.y, -2.0);
    }

    #[test]
    fn test_unregistered_obstacles_are_ignored() {
        let mut paddle = Paddle::new(Arena::new(800.0, 800.0));
        let (mut bricks, mut ball) = adjacent_bricks();
        let mut manager = CollisionManager::default();
        manager.add(ObstacleId::Brick(1));
        manager.add(ObstacleId::Brick(7));

        let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);
        let hits = manager.handle(&mut ball, &mut obstacles);
        assert_eq!(hits, vec![ObstacleId::Brick(1)]);
        assert!(!bricks[0].destroyed);

        manager.reset();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_handle_item_only_paddle_catches() {
        let mut paddle = Paddle::new(Arena::new(800.0, 800.0));
        let mut bricks = vec![Brick::new(Rect::new(0.0, 0.0, 800.0, 800.0), 1)];
        let mut manager = CollisionManager::default();
        manager.add(ObstacleId::Brick(0));
        manager.add(ObstacleId::Paddle);

        let mut item = Item::new(DVec2::new(paddle.x, paddle.y - 10.0), ItemKind::SpeedBuff);
        let mut obstacles = Obstacles::new(&mut paddle, &mut bricks);
        assert!(manager.handle_item(&mut item, &mut obstacles));
        assert!(item.collected);
        // Already collected: nothing more happens
        assert!(!manager.handle_item(&mut item, &mut obstacles));
    }
}
