//! Zone Placement
//!
//! Picks the next safe-zone center once per round.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use tracing::warn;

use crate::components::{Agent, Arena, Position, Zone, ZoneMode};

/// Where the zone may land and how far it may drift from its anchor agent.
#[derive(Debug, Clone, Copy)]
pub struct PlacementBounds {
    pub arena: Arena,
    /// Minimum gap between the zone center and the arena border.
    pub margin: f64,
    /// Half-width of the uniform jitter applied around the sampled agent.
    pub jitter: f64,
}

/// Compute the candidate zone for the coming round.
///
/// Does not touch the agents; the caller stores the returned zone.
pub fn compute_zone_candidate<R: Rng + ?Sized>(
    agents: &[Agent],
    mode: ZoneMode,
    bounds: &PlacementBounds,
    rng: &mut R,
) -> Zone {
    match mode {
        ZoneMode::Adaptive => adaptive_candidate(agents, bounds, rng),
        ZoneMode::Random => random_candidate(bounds, rng),
    }
}

/// Weighted draw over live agents: `1 + kills*0.8 + activity*2`.
fn adaptive_candidate<R: Rng + ?Sized>(agents: &[Agent], bounds: &PlacementBounds, rng: &mut R) -> Zone {
    let alive: Vec<&Agent> = agents.iter().filter(|a| a.alive).collect();
    let fallback = bounds.arena.center();
    if alive.is_empty() {
        return Zone::new(fallback.x, fallback.y);
    }

    let anchor = match WeightedIndex::new(alive.iter().map(|a| a.zone_weight())) {
        Ok(dist) => alive[dist.sample(rng)],
        Err(err) => {
            warn!("Adaptive zone weights rejected ({}), using arena center", err);
            return Zone::new(fallback.x, fallback.y);
        }
    };

    let jitter = bounds.jitter;
    let jittered = Position::new(
        anchor.position.x + rng.gen_range(-jitter..=jitter),
        anchor.position.y + rng.gen_range(-jitter..=jitter),
    );
    let center = bounds.arena.clamp_inset(jittered, bounds.margin);
    Zone::new(center.x, center.y)
}

/// Uniform over the inset arena. Agent state is never consulted.
pub fn random_candidate<R: Rng + ?Sized>(bounds: &PlacementBounds, rng: &mut R) -> Zone {
    let arena = bounds.arena;
    let margin = bounds.margin;
    Zone::new(
        rng.gen_range(margin..=arena.width - margin),
        rng.gen_range(margin..=arena.height - margin),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::AgentId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds() -> PlacementBounds {
        PlacementBounds {
            arena: Arena::new(1000.0, 500.0),
            margin: 60.0,
            jitter: 60.0,
        }
    }

    fn agent_at(id: usize, x: f64, y: f64, kills: u32, activity: f64) -> Agent {
        Agent::new(AgentId(id), Position::new(x, y), kills, 0, activity)
    }

    #[test]
    fn test_no_live_agents_falls_back_to_center() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut agents = vec![agent_at(0, 100.0, 100.0, 0, 0.5)];
        agents[0].alive = false;

        let zone = compute_zone_candidate(&agents, ZoneMode::Adaptive, &bounds(), &mut rng);
        assert_eq!(zone, Zone::new(500.0, 250.0));

        let zone = compute_zone_candidate(&[], ZoneMode::Adaptive, &bounds(), &mut rng);
        assert_eq!(zone, Zone::new(500.0, 250.0));
    }

    #[test]
    fn test_adaptive_stays_near_single_survivor() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut agents = vec![
            agent_at(0, 900.0, 400.0, 9, 0.9),
            agent_at(1, 300.0, 250.0, 0, 0.1),
        ];
        agents[0].alive = false;

        for _ in 0..200 {
            let zone = compute_zone_candidate(&agents, ZoneMode::Adaptive, &bounds(), &mut rng);
            assert!((zone.center.x - 300.0).abs() <= 60.0);
            assert!((zone.center.y - 250.0).abs() <= 60.0);
        }
    }

    #[test]
    fn test_adaptive_clamps_to_margin() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let agents = vec![agent_at(0, 5.0, 495.0, 0, 0.0)];

        for _ in 0..200 {
            let zone = compute_zone_candidate(&agents, ZoneMode::Adaptive, &bounds(), &mut rng);
            assert!(zone.center.x >= 60.0 && zone.center.x <= 65.0 + 1e-9);
            assert!(zone.center.y <= 440.0 && zone.center.y >= 435.0 - 1e-9);
        }
    }

    #[test]
    fn test_adaptive_prefers_heavier_agents() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        // weight 1.0 vs 1 + 10*0.8 + 2*0.99 ~= 10.98
        let agents = vec![
            agent_at(0, 200.0, 250.0, 0, 0.0),
            agent_at(1, 800.0, 250.0, 10, 0.99),
        ];

        let near_strong = (0..2000)
            .map(|_| compute_zone_candidate(&agents, ZoneMode::Adaptive, &bounds(), &mut rng))
            .filter(|z| z.center.x > 500.0)
            .count();
        assert!(near_strong > 1600, "strong agent drew only {near_strong}/2000");
    }

    #[test]
    fn test_random_mode_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let zone = compute_zone_candidate(&[], ZoneMode::Random, &bounds(), &mut rng);
            assert!((60.0..=940.0).contains(&zone.center.x));
            assert!((60.0..=440.0).contains(&zone.center.y));
        }
    }

    #[test]
    fn test_random_mode_ignores_population() {
        let crowd_left: Vec<Agent> = (0..20).map(|i| agent_at(i, 70.0, 70.0, 4, 0.9)).collect();
        let crowd_right: Vec<Agent> = (0..20).map(|i| agent_at(i, 930.0, 430.0, 0, 0.1)).collect();

        // Same seed, different populations: identical draws.
        let mut rng_a = ChaCha8Rng::seed_from_u64(6);
        let mut rng_b = ChaCha8Rng::seed_from_u64(6);
        for _ in 0..100 {
            let a = compute_zone_candidate(&crowd_left, ZoneMode::Random, &bounds(), &mut rng_a);
            let b = compute_zone_candidate(&crowd_right, ZoneMode::Random, &bounds(), &mut rng_b);
            assert_eq!(a, b);
        }

        // And statistically the mean sits near the arena center either way.
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for crowd in [&crowd_left, &crowd_right] {
            let n = 4000;
            let mean_x = (0..n)
                .map(|_| compute_zone_candidate(crowd, ZoneMode::Random, &bounds(), &mut rng).center.x)
                .sum::<f64>()
                / n as f64;
            assert!((mean_x - 500.0).abs() < 25.0, "mean x drifted to {mean_x}");
        }
    }
}
