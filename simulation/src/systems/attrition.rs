//! Attrition System
//!
//! Random hazards that cull the field once per round, independent of where
//! the zone is.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Agent, AgentId};
use crate::config::AttritionCap;

/// Eliminate between 1 and `min(alive - 1, cap)` live agents chosen uniformly
/// without replacement. Never removes the last survivor.
///
/// Returns the eliminated identities in elimination order.
pub fn attrition_system<R: Rng + ?Sized>(
    agents: &mut [Agent],
    cap: AttritionCap,
    rng: &mut R,
) -> Vec<AgentId> {
    let mut alive: Vec<AgentId> = agents.iter().filter(|a| a.alive).map(|a| a.id).collect();
    if alive.len() <= 1 {
        return Vec::new();
    }

    let max_elim = (alive.len() - 1).min(cap.cap(alive.len()));
    if max_elim == 0 {
        return Vec::new();
    }
    // Count is drawn before the shuffle.
    let elim_count = rng.gen_range(1..=max_elim);
    alive.shuffle(rng);
    alive.truncate(elim_count);

    for id in &alive {
        agents[id.index()].alive = false;
    }
    alive
}
