//! Gameplay tuning
//!
//! Everything here is data, not logic: which collision policy to run, how
//! items behave and what they do. Stored as JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::STEPS_PER_SECOND;
use crate::sim::{EffectEntry, ItemEffect, ItemKind, ItemMode, ResolutionPolicy};

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacle resolution policy per ball step, applied by `tick` on every call
    pub resolution: ResolutionPolicy,
    /// Falling items caught by the paddle, or static items touched by the ball
    pub item_mode: ItemMode,

    // === Item drops ===
    /// Chance that a credited brick drops an item (never on EASY)
    pub drop_chance: f64,
    /// Kinds a drop is chosen from, uniformly
    pub drop_pool: Vec<ItemKind>,
    /// Item kind to effect lookup table
    pub effects: Vec<EffectEntry>,

    // === Timers (in steps) ===
    /// How long a paddle resize lasts
    pub resize_duration_ticks: u64,
    /// Pause between a cleared level and the next one
    pub breather_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: ResolutionPolicy::FirstMatch,
            item_mode: ItemMode::Falling,

            drop_chance: 0.3,
            drop_pool: vec![
                ItemKind::PaddleBuff,
                ItemKind::PaddleDebuff,
                ItemKind::SpeedBuff,
                ItemKind::SpeedDebuff,
            ],
            effects: EffectEntry::defaults(),

            resize_duration_ticks: 5 * STEPS_PER_SECOND,
            breather_ticks: 3 * STEPS_PER_SECOND as u32,
        }
    }
}

impl Settings {
    /// Effect for an item kind, if the table has one
    pub fn effect_for(&self, kind: ItemKind) -> Option<ItemEffect> {
        EffectEntry::lookup(&self.effects, kind)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings file {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
