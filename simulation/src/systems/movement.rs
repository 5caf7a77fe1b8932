//! Movement System - jitter live agents around the arena each tick

use rand::Rng;

use crate::components::{Agent, Arena};

/// Displace every live agent by a random per-axis step scaled by its speed,
/// then keep it `margin` away from the border.
pub fn movement_system<R: Rng + ?Sized>(agents: &mut [Agent], arena: &Arena, margin: f64, rng: &mut R) {
    for agent in agents.iter_mut().filter(|a| a.alive) {
        let speed = agent.speed();
        let mut next = agent.position;
        next.x += rng.gen_range(-1.0..1.0) * speed;
        next.y += rng.gen_range(-1.0..1.0) * speed;
        agent.position = arena.clamp_inset(next, margin);
    }
}
