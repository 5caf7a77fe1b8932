//! Combat System
//!
//! Close-range duels between live agents, resolved by a fair coin.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::components::{Agent, AgentId};

/// Outcome of one duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Duel {
    pub winner: AgentId,
    pub loser: AgentId,
}

/// Resolve every pair of live agents within `radius` of each other.
///
/// Pair order comes from a fresh shuffle each tick. A loser dies on the spot
/// and takes no part in later pairings this tick.
pub fn combat_system<R: Rng + ?Sized>(agents: &mut [Agent], radius: f64, rng: &mut R) -> Vec<Duel> {
    let mut order: Vec<AgentId> = agents.iter().filter(|a| a.alive).map(|a| a.id).collect();
    order.shuffle(rng);

    let mut duels = Vec::new();
    for (slot, &first) in order.iter().enumerate() {
        for &second in &order[slot + 1..] {
            if !agents[first.index()].alive {
                break;
            }
            if !agents[second.index()].alive {
                continue;
            }
            let gap = agents[first.index()]
                .position
                .distance_to(&agents[second.index()].position);
            if gap > radius {
                continue;
            }

            let (winner, loser) = if rng.gen_bool(0.5) {
                (first, second)
            } else {
                (second, first)
            };
            agents[loser.index()].alive = false;
            agents[winner.index()].kills += 1;
            duels.push(Duel { winner, loser });
        }
    }
    duels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agent(id: usize, x: f64, y: f64) -> Agent {
        Agent::new(AgentId(id), Position::new(x, y), 0, 0, 0.5)
    }

    #[test]
    fn test_far_apart_agents_do_not_fight() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut agents = vec![agent(0, 100.0, 100.0), agent(1, 200.0, 100.0)];
        assert!(combat_system(&mut agents, 10.0, &mut rng).is_empty());
        assert!(agents.iter().all(|a| a.alive));
    }

    #[test]
    fn test_pair_in_range_leaves_one_survivor_with_a_kill() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut agents = vec![agent(0, 100.0, 100.0), agent(1, 105.0, 100.0)];
            let duels = combat_system(&mut agents, 10.0, &mut rng);

            assert_eq!(duels.len(), 1);
            let duel = duels[0];
            assert!(agents[duel.winner.index()].alive);
            assert!(!agents[duel.loser.index()].alive);
            assert_eq!(agents[duel.winner.index()].kills, 1);
            assert_eq!(agents[duel.loser.index()].kills, 0);
        }
    }

    #[test]
    fn test_coin_is_roughly_fair() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let first_wins = (0..2000)
            .filter(|_| {
                let mut agents = vec![agent(0, 100.0, 100.0), agent(1, 100.0, 100.0)];
                combat_system(&mut agents, 10.0, &mut rng);
                agents[0].alive
            })
            .count();
        assert!((850..=1150).contains(&first_wins), "agent 0 won {first_wins}/2000");
    }

    #[test]
    fn test_cluster_kills_match_deaths() {
        let mut rng = ChaCha8Rng::seed_from_u64(33);
        let mut agents: Vec<Agent> = (0..6).map(|i| agent(i, 100.0 + i as f64, 100.0)).collect();
        let duels = combat_system(&mut agents, 10.0, &mut rng);

        // Everyone is in range of everyone: the cluster fights down to one.
        assert_eq!(duels.len(), 5);
        assert_eq!(agents.iter().filter(|a| a.alive).count(), 1);
        let total_kills: u32 = agents.iter().map(|a| a.kills).sum();
        assert_eq!(total_kills as usize, duels.len());
        // Losers never fight again.
        for (n, duel) in duels.iter().enumerate() {
            assert!(duels[n + 1..].iter().all(|d| d.winner != duel.loser && d.loser != duel.loser));
        }
    }

    #[test]
    fn test_dead_agents_are_ignored() {
        let mut rng = ChaCha8Rng::seed_from_u64(34);
        let mut agents = vec![agent(0, 100.0, 100.0), agent(1, 101.0, 100.0)];
        agents[1].alive = false;
        assert!(combat_system(&mut agents, 10.0, &mut rng).is_empty());
        assert!(agents[0].alive);
    }
}
