//! Read-only snapshots for renderers, stats collectors and other consumers
//! that must not hold references into the live contest.

use serde::Serialize;

use crate::components::{AgentId, Position};
use crate::world::ContestWorld;

/// One agent as seen from outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub alive: bool,
    pub kills: u32,
    pub distance: u32,
    pub position: Position,
    pub activity: f64,
}

/// Whole-contest view at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestSnapshot {
    pub round: u32,
    pub max_rounds: u32,
    /// `None` until the contest has been reset at least once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_center: Option<Position>,
    pub radius: f64,
    pub tick: u64,
    pub elapsed_ms: u64,
    pub alive: usize,
    pub inside_zone: usize,
    pub winner: Option<AgentId>,
    pub finished: bool,
    pub agents: Vec<AgentSnapshot>,
}

impl ContestSnapshot {
    pub fn capture(world: &ContestWorld) -> Self {
        let agents = world
            .agents()
            .iter()
            .map(|a| AgentSnapshot {
                id: a.id,
                alive: a.alive,
                kills: a.kills,
                distance: a.distance,
                position: a.position,
                activity: a.activity,
            })
            .collect();

        Self {
            round: world.round(),
            max_rounds: world.max_rounds(),
            zone_center: world.zone().map(|z| z.center),
            radius: world.current_radius(),
            tick: world.tick_count(),
            elapsed_ms: world.elapsed().as_millis() as u64,
            alive: world.alive_count(),
            inside_zone: world.inside_zone_count(),
            winner: world.winner(),
            finished: world.is_finished(),
            agents,
        }
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentSnapshot> {
        self.agents.get(id.index())
    }
}
