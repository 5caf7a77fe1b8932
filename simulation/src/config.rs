//! Contest configuration
//!
//! Everything the engine needs is fixed at construction (or reset) time.
//! Defaults reproduce the classic 1000x500 arena with seven shrinking rounds.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::components::{Arena, ZoneMode};
use crate::error::{ConfigError, Result};

/// Ordered zone radii, one per round. Rounds past the end reuse the last radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadiusSchedule(Vec<f64>);

impl RadiusSchedule {
    pub fn new(radii: Vec<f64>) -> Self {
        Self(radii)
    }

    pub fn radius_for(&self, round: u32) -> f64 {
        let last = self.0.len().saturating_sub(1);
        self.0
            .get((round as usize).min(last))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn radii(&self) -> &[f64] {
        &self.0
    }

    fn validate(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }
        if let Some((index, &value)) = self
            .0
            .iter()
            .enumerate()
            .find(|(_, r)| !r.is_finite() || **r < 0.0)
        {
            return Err(ConfigError::InvalidRadius { index, value });
        }
        Ok(())
    }
}

impl Default for RadiusSchedule {
    fn default() -> Self {
        Self(vec![240.0, 200.0, 160.0, 130.0, 110.0, 80.0, 60.0])
    }
}

/// How many agents a single round-attrition step may remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AttritionCap {
    /// At most `limit` per step.
    Fixed { limit: usize },
    /// At most `min(ceiling, max(1, alive / 2))` per step.
    Scaled { ceiling: usize },
}

impl AttritionCap {
    pub fn cap(&self, alive: usize) -> usize {
        match *self {
            AttritionCap::Fixed { limit } => limit,
            AttritionCap::Scaled { ceiling } => ceiling.min((alive / 2).max(1)),
        }
    }
}

impl Default for AttritionCap {
    fn default() -> Self {
        AttritionCap::Fixed { limit: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestConfig {
    pub arena_width: f64,
    pub arena_height: f64,
    pub population: usize,
    pub max_rounds: u32,
    /// Termination is not honoured before this round.
    pub min_rounds: u32,
    pub radius_schedule: RadiusSchedule,
    pub zone_mode: ZoneMode,
    pub outside_timeout_ms: u64,
    pub combat_enabled: bool,
    pub combat_radius: f64,
    pub attrition_cap: AttritionCap,
    /// Simulation time covered by one tick.
    pub tick_ms: u64,
    pub zone_jitter: f64,
    pub spawn_margin: f64,
    pub zone_margin: f64,
    pub movement_margin: f64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            arena_width: 1000.0,
            arena_height: 500.0,
            population: 30,
            max_rounds: 7,
            min_rounds: 0,
            radius_schedule: RadiusSchedule::default(),
            zone_mode: ZoneMode::Adaptive,
            outside_timeout_ms: 10_000,
            combat_enabled: true,
            combat_radius: 10.0,
            attrition_cap: AttritionCap::default(),
            tick_ms: 30,
            zone_jitter: 60.0,
            spawn_margin: 20.0,
            zone_margin: 60.0,
            movement_margin: 12.0,
            seed: None,
        }
    }
}

impl ContestConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ContestConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    pub fn outside_timeout(&self) -> Duration {
        Duration::from_millis(self.outside_timeout_ms)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn radius_for(&self, round: u32) -> f64 {
        self.radius_schedule.radius_for(round)
    }

    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.arena_width, self.arena_height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        let widest_margin = self
            .zone_margin
            .max(self.spawn_margin)
            .max(self.movement_margin);
        if widest_margin.is_nan() || widest_margin < 0.0 || widest_margin * 2.0 >= width.min(height) {
            return Err(ConfigError::MarginTooLarge {
                width,
                height,
                margin: widest_margin,
            });
        }
        self.radius_schedule.validate()?;
        if self.min_rounds > self.max_rounds {
            return Err(ConfigError::RoundBounds {
                min: self.min_rounds,
                max: self.max_rounds,
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::NonPositive("tick_ms"));
        }
        if self.outside_timeout_ms == 0 {
            return Err(ConfigError::NonPositive("outside_timeout_ms"));
        }
        for (field, value) in [("combat_radius", self.combat_radius), ("zone_jitter", self.zone_jitter)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        match self.attrition_cap {
            AttritionCap::Fixed { limit: 0 } => {
                return Err(ConfigError::NonPositive("attrition_cap.limit"))
            }
            AttritionCap::Scaled { ceiling: 0 } => {
                return Err(ConfigError::NonPositive("attrition_cap.ceiling"))
            }
            _ => {}
        }
        Ok(())
    }
}
