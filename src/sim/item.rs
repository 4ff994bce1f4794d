//! Pickups dropped by destroyed bricks
//!
//! The core only moves items and tracks collection. What a pickup does is
//! looked up in the effect table from [`crate::Settings`].

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::geom::{Rect, circles_overlap};
use crate::consts::*;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    PaddleBuff,
    PaddleDebuff,
    SpeedBuff,
    SpeedDebuff,
    Heart,
    Skull,
}

/// Whether items fall toward the paddle or wait for the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemMode {
    #[default]
    Falling,
    Static,
}

/// What collecting an item does to the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    GainLife,
    LoseLife,
    /// Multiply ball velocity
    BallSpeed(f64),
    /// Multiply paddle long axis until the resize expires
    PaddleScale(f64),
}

/// One row of the effect table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectEntry {
    pub kind: ItemKind,
    pub effect: ItemEffect,
}

impl EffectEntry {
    /// The stock table
    pub fn defaults() -> Vec<EffectEntry> {
        vec![
            EffectEntry {
                kind: ItemKind::PaddleBuff,
                effect: ItemEffect::PaddleScale(PADDLE_ENLARGE),
            },
            EffectEntry {
                kind: ItemKind::PaddleDebuff,
                effect: ItemEffect::PaddleScale(PADDLE_SHRINK),
            },
            EffectEntry {
                kind: ItemKind::SpeedBuff,
                effect: ItemEffect::BallSpeed(SPEED_BUFF),
            },
            EffectEntry {
                kind: ItemKind::SpeedDebuff,
                effect: ItemEffect::BallSpeed(SPEED_DEBUFF),
            },
            EffectEntry {
                kind: ItemKind::Heart,
                effect: ItemEffect::GainLife,
            },
            EffectEntry {
                kind: ItemKind::Skull,
                effect: ItemEffect::LoseLife,
            },
        ]
    }

    /// First effect registered for `kind`
    pub fn lookup(table: &[EffectEntry], kind: ItemKind) -> Option<ItemEffect> {
        table.iter().find(|e| e.kind == kind).map(|e| e.effect)
    }
}

/// A pickup entity. `pos` is the top-left corner of its square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: DVec2,
    pub kind: ItemKind,
    pub collected: bool,
}

impl Item {
    pub fn new(pos: DVec2, kind: ItemKind) -> Self {
        Self {
            pos,
            kind,
            collected: false,
        }
    }

    /// Item centered on a point (where a brick broke)
    pub fn centered_at(center: DVec2, kind: ItemKind) -> Self {
        Self::new(center - DVec2::splat(ITEM_SIZE / 2.0), kind)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ITEM_SIZE, ITEM_SIZE)
    }

    /// Drift down one step. Collected and static items stay put.
    pub fn update(&mut self, mode: ItemMode) {
        if self.collected || mode == ItemMode::Static {
            return;
        }
        self.pos.y += ITEM_FALL_SPEED;
    }

    /// Item treated as a circle inscribed in its square
    pub fn hits_ball(&self, ball: &Ball) -> bool {
        !self.collected
            && circles_overlap(self.rect().center(), ITEM_SIZE / 2.0, ball.pos, ball.radius())
    }

    /// Mark collected. Returns true only the first time.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        log::debug!("collected {:?}", self.kind);
        true
    }

    /// True once the item has drifted fully below the arena floor
    pub fn fell_out(&self, arena_height: f64) -> bool {
        self.pos.y > arena_height
    }
}
