//! Entity model for the contest: agents, positions and the safe zone.
//!
//! These are plain values. All behaviour lives in `systems` and `world`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Identity
// ============================================================================

/// Stable agent identity. Doubles as the agent's index in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned playing field, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point into the arena shrunk by `margin` on every side.
    pub fn clamp_inset(&self, pos: Position, margin: f64) -> Position {
        Position::new(
            pos.x.clamp(margin, self.width - margin),
            pos.y.clamp(margin, self.height - margin),
        )
    }
}

// ============================================================================
// Agent
// ============================================================================

/// One contestant.
///
/// Agents are never removed from the population; elimination only clears
/// `alive`, and it never flips back within a contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: Position,
    pub kills: u32,
    /// Cosmetic attribute fixed at creation.
    pub distance: u32,
    /// In `[0, 1)`. Drives movement speed and zone-placement weight.
    pub activity: f64,
    pub alive: bool,
}

impl Agent {
    pub fn new(id: AgentId, position: Position, kills: u32, distance: u32, activity: f64) -> Self {
        Self {
            id,
            position,
            kills,
            distance,
            activity,
            alive: true,
        }
    }

    /// Winner ranking score.
    pub fn score(&self) -> f64 {
        self.kills as f64 * 2.0 + self.activity
    }

    /// Sampling weight used by adaptive zone placement.
    pub fn zone_weight(&self) -> f64 {
        1.0 + self.kills as f64 * 0.8 + self.activity * 2.0
    }

    pub fn speed(&self) -> f64 {
        0.4 + self.activity * 1.2
    }
}

// ============================================================================
// Zone
// ============================================================================

/// The safe area. Its radius is not stored: it comes from the round-indexed
/// radius schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub center: Position,
}

impl Zone {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            center: Position::new(x, y),
        }
    }

    pub fn contains(&self, pos: &Position, radius: f64) -> bool {
        self.center.distance_to(pos) <= radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneMode {
    /// Zone chases strong live agents via weighted sampling.
    #[default]
    Adaptive,
    /// Zone lands uniformly at random, ignoring agents.
    Random,
}

impl fmt::Display for ZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneMode::Adaptive => f.write_str("adaptive"),
            ZoneMode::Random => f.write_str("random"),
        }
    }
}

// ============================================================================
// Eliminations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationCause {
    /// Culled by the per-round random hazard.
    Attrition,
    /// Lost a close-range duel.
    Combat { by: AgentId },
    /// Stayed outside the zone for the full timeout.
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    pub agent: AgentId,
    pub cause: EliminationCause,
    pub round: u32,
    /// Simulation time at which the agent went down.
    pub at: Duration,
}
