//! Contest Runner - drives ticks and rounds on a simulated cadence
//!
//! The engine has no clock of its own beyond the per-tick step. This runner
//! plays the part of the two UI timers: a fast tick loop, a slower round
//! cadence and an overall countdown that forces the finish.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::components::{AgentId, EliminationCause, ZoneMode};
use crate::config::ContestConfig;
use crate::error::Result;
use crate::world::ContestWorld;

/// Pacing for a headless run, in simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    /// Simulation time between round advances.
    pub round_interval: Duration,
    /// Countdown after which the contest is force-finished.
    pub time_limit: Option<Duration>,
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            round_interval: Duration::from_secs(8),
            time_limit: Some(Duration::from_secs(60)),
        }
    }
}

/// Summary of one finished contest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub mode: ZoneMode,
    pub winner: Option<AgentId>,
    pub winner_kills: u32,
    pub rounds: u32,
    pub ticks: u64,
    pub elapsed: Duration,
    /// True when the countdown expired and the finish was forced.
    pub forced: bool,
    pub attrition_deaths: usize,
    pub combat_deaths: usize,
    pub timeout_deaths: usize,
}

pub struct ContestRunner {
    cadence: Cadence,
}

impl ContestRunner {
    pub fn new(cadence: Cadence) -> Self {
        Self { cadence }
    }

    /// Play `world` to completion from its current state.
    pub fn run(&self, world: &mut ContestWorld) -> ContestOutcome {
        let tick = world.config().tick_duration();
        let mut since_round = Duration::ZERO;
        let mut forced = false;

        loop {
            if world.is_finished() {
                if !world.is_finalized() {
                    world.finalize();
                }
                break;
            }
            if let Some(limit) = self.cadence.time_limit {
                if world.elapsed() >= limit {
                    debug!("Countdown expired at round {}, forcing finish", world.round());
                    world.force_finish();
                    forced = true;
                    break;
                }
            }

            world.step_tick();
            since_round += tick;
            if since_round >= self.cadence.round_interval {
                since_round = Duration::ZERO;
                world.advance_round();
            }
        }

        outcome(world, forced)
    }

    /// Run one independent contest per seed in parallel.
    ///
    /// Each seed gets its own world; results come back in seed order.
    pub fn run_batch(&self, config: &ContestConfig, seeds: &[u64]) -> Result<Vec<ContestOutcome>> {
        config.validate()?;
        info!(
            "Running {} {} contests of {} agents",
            seeds.len(),
            config.zone_mode,
            config.population
        );

        seeds
            .par_iter()
            .map(|&seed| -> Result<ContestOutcome> {
                let mut world = ContestWorld::with_seed(config.clone(), seed)?;
                world.reset(config.population);
                Ok(self.run(&mut world))
            })
            .collect()
    }
}

impl Default for ContestRunner {
    fn default() -> Self {
        Self::new(Cadence::default())
    }
}

fn outcome(world: &ContestWorld, forced: bool) -> ContestOutcome {
    let count = |wanted: fn(&EliminationCause) -> bool| {
        world
            .eliminations()
            .iter()
            .filter(|e| wanted(&e.cause))
            .count()
    };

    let winner = world.winner();
    ContestOutcome {
        seed: world.config().seed,
        mode: world.config().zone_mode,
        winner,
        winner_kills: winner
            .and_then(|id| world.agent(id))
            .map(|a| a.kills)
            .unwrap_or(0),
        rounds: world.round(),
        ticks: world.tick_count(),
        elapsed: world.elapsed(),
        forced,
        attrition_deaths: count(|c| matches!(c, EliminationCause::Attrition)),
        combat_deaths: count(|c| matches!(c, EliminationCause::Combat { .. })),
        timeout_deaths: count(|c| matches!(c, EliminationCause::Timeout)),
    }
}
