//! Winner Resolution
//!
//! Picks a winner once the contest is being finalized. A lone survivor wins
//! outright; otherwise agents are ranked by `kills*2 + activity`.

use std::cmp::Ordering;

use crate::components::{Agent, AgentId, Zone};

/// Total order used to rank candidates: score, then kills, then activity,
/// then the lower identity.
pub fn rank(a: &Agent, b: &Agent) -> Ordering {
    a.score()
        .total_cmp(&b.score())
        .then_with(|| a.kills.cmp(&b.kills))
        .then_with(|| a.activity.total_cmp(&b.activity))
        .then_with(|| b.id.cmp(&a.id))
}

/// Highest-ranked agent among `candidates`.
pub fn best_candidate<'a, I>(candidates: I) -> Option<AgentId>
where
    I: IntoIterator<Item = &'a Agent>,
{
    candidates.into_iter().max_by(|a, b| rank(a, b)).map(|a| a.id)
}

/// Winner for the current population.
///
/// Falls back from live agents inside the zone, to all live agents, to the
/// whole population including the dead. `None` only for an empty population.
pub fn resolve_winner(agents: &[Agent], zone: Option<&Zone>, radius: f64) -> Option<AgentId> {
    let mut alive = agents.iter().filter(|a| a.alive);
    if let (Some(only), None) = (alive.next(), alive.next()) {
        return Some(only.id);
    }

    if let Some(zone) = zone {
        let inside = agents
            .iter()
            .filter(|a| a.alive && zone.contains(&a.position, radius));
        if let Some(id) = best_candidate(inside) {
            return Some(id);
        }
    }

    best_candidate(agents.iter().filter(|a| a.alive)).or_else(|| best_candidate(agents))
}
