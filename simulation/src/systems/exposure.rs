//! Exposure System
//!
//! Tracks how long each live agent has been outside the zone and eliminates
//! those who stay out for the full timeout.

use std::collections::HashMap;
use std::time::Duration;

use crate::components::{Agent, AgentId, Zone};

/// First moment each agent was seen outside the zone, keyed by identity.
///
/// Cleared per agent on re-entry and wholesale at every round boundary.
pub type OutsideSince = HashMap<AgentId, Duration>;

/// Current zone geometry and the exposure limit.
#[derive(Debug, Clone, Copy)]
pub struct ExposureRule {
    pub zone: Zone,
    pub radius: f64,
    pub timeout: Duration,
}

/// Run the inside/outside test against current positions.
///
/// Returns the agents eliminated for overstaying outside.
pub fn exposure_system(
    agents: &mut [Agent],
    rule: &ExposureRule,
    now: Duration,
    outside: &mut OutsideSince,
) -> Vec<AgentId> {
    let mut expired = Vec::new();
    for agent in agents.iter_mut().filter(|a| a.alive) {
        if rule.zone.contains(&agent.position, rule.radius) {
            outside.remove(&agent.id);
            continue;
        }

        let since = *outside.entry(agent.id).or_insert(now);
        if now.saturating_sub(since) >= rule.timeout {
            agent.alive = false;
            outside.remove(&agent.id);
            expired.push(agent.id);
        }
    }
    outside.retain(|id, _| agents.get(id.index()).is_some_and(|a| a.alive));
    expired
}
