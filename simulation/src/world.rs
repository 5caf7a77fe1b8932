//! Contest World - main orchestrator
//!
//! Owns the population, the zone, the round counter, the simulation clock
//! and the contest's single RNG. Callers drive it with two independent
//! cadences: `step_tick` (frequent) and `advance_round` (rare).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::components::*;
use crate::config::ContestConfig;
use crate::error::Result;
use crate::snapshot::ContestSnapshot;
use crate::systems::{self, Duel, ExposureRule, OutsideSince, PlacementBounds};

/// What one `advance_round` call did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// False when the call was a no-op because the round cap was reached.
    pub advanced: bool,
    pub round: u32,
    pub zone: Option<Zone>,
    pub radius: f64,
    pub eliminated: Vec<AgentId>,
    /// Live agents inside the new zone at the new radius, counted before
    /// any finalization.
    pub inside_zone: usize,
    pub alive: usize,
    pub winner: Option<AgentId>,
    pub finished: bool,
}

/// What one `step_tick` call did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickResult {
    pub tick: u64,
    pub elapsed: Duration,
    pub duels: Vec<Duel>,
    pub timed_out: Vec<AgentId>,
    pub alive: usize,
    pub finished: bool,
}

pub struct ContestWorld {
    pub(crate) config: ContestConfig,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) agents: Vec<Agent>,
    pub(crate) zone: Option<Zone>,
    pub(crate) round: u32,
    pub(crate) outside_since: OutsideSince,
    pub(crate) winner: Option<AgentId>,
    pub(crate) finalized: bool,
    pub(crate) tick: u64,
    pub(crate) elapsed: Duration,
    pub(crate) eliminations: Vec<Elimination>,
}

impl ContestWorld {
    /// Build an empty contest. Call `reset` to populate it.
    pub fn new(config: ContestConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            agents: Vec::new(),
            zone: None,
            round: 0,
            outside_since: OutsideSince::new(),
            winner: None,
            finalized: false,
            tick: 0,
            elapsed: Duration::ZERO,
            eliminations: Vec::new(),
        })
    }

    pub fn with_seed(config: ContestConfig, seed: u64) -> Result<Self> {
        Self::new(ContestConfig {
            seed: Some(seed),
            ..config
        })
    }

    /// Build a contest around explicit agent values.
    ///
    /// Identities are reassigned to match vector positions and the zone
    /// starts at the arena center.
    pub fn from_agents(config: ContestConfig, agents: Vec<Agent>) -> Result<Self> {
        let mut world = Self::new(config)?;
        world.agents = agents
            .into_iter()
            .enumerate()
            .map(|(index, agent)| Agent {
                id: AgentId(index),
                ..agent
            })
            .collect();
        let center = world.config.arena().center();
        world.zone = Some(Zone::new(center.x, center.y));
        Ok(world)
    }

    /// Discard the current contest and seed a fresh population.
    pub fn reset(&mut self, population: usize) {
        let arena = self.config.arena();
        let margin = self.config.spawn_margin;

        self.agents = (0..population)
            .map(|index| {
                let rng = &mut self.rng;
                let x = rng.gen_range(margin..arena.width - margin);
                let y = rng.gen_range(margin..arena.height - margin);
                let kills = rng.gen_range(0..5);
                let distance = rng.gen_range(0..1000);
                let activity = rng.gen::<f64>();
                Agent::new(AgentId(index), Position::new(x, y), kills, distance, activity)
            })
            .collect();

        self.round = 0;
        self.outside_since.clear();
        self.winner = None;
        self.finalized = false;
        self.tick = 0;
        self.elapsed = Duration::ZERO;
        self.eliminations.clear();

        self.zone = Some(match self.config.zone_mode {
            ZoneMode::Adaptive => {
                let center = arena.center();
                Zone::new(center.x, center.y)
            }
            ZoneMode::Random => systems::zone::random_candidate(&self.placement_bounds(), &mut self.rng),
        });

        info!(
            "Contest reset: {} agents, {} zone, {} rounds",
            population, self.config.zone_mode, self.config.max_rounds
        );
    }

    /// Advance the simulation clock by one tick: move, fight, then check
    /// exposure against the post-move positions.
    pub fn step_tick(&mut self) -> TickResult {
        if self.finalized || self.agents.is_empty() {
            return self.idle_tick();
        }

        self.tick += 1;
        self.elapsed += self.config.tick_duration();
        let now = self.elapsed;
        let arena = self.config.arena();

        systems::movement_system(&mut self.agents, &arena, self.config.movement_margin, &mut self.rng);

        let duels = if self.config.combat_enabled {
            systems::combat_system(&mut self.agents, self.config.combat_radius, &mut self.rng)
        } else {
            Vec::new()
        };
        for Duel { winner, loser } in &duels {
            self.record(*loser, EliminationCause::Combat { by: *winner });
        }

        let timed_out = match self.zone {
            Some(zone) => {
                let rule = ExposureRule {
                    zone,
                    radius: self.current_radius(),
                    timeout: self.config.outside_timeout(),
                };
                systems::exposure_system(&mut self.agents, &rule, now, &mut self.outside_since)
            }
            None => Vec::new(),
        };
        for id in &timed_out {
            self.record(*id, EliminationCause::Timeout);
        }

        let alive = self.alive_count();
        if !duels.is_empty() || !timed_out.is_empty() {
            trace!(
                "Tick {}: {} duels, {} timed out, {} alive",
                self.tick,
                duels.len(),
                timed_out.len(),
                alive
            );
        }
        if alive <= 1 && self.round >= self.config.min_rounds {
            self.finalize();
        }

        TickResult {
            tick: self.tick,
            elapsed: self.elapsed,
            duels,
            timed_out,
            alive,
            finished: self.is_finished(),
        }
    }

    /// Advance to the next round: move the zone, cull the field, check for an
    /// early zone winner and finalize when the contest is over.
    ///
    /// A silent no-op once the round cap is reached.
    pub fn advance_round(&mut self) -> RoundReport {
        if self.round >= self.config.max_rounds {
            return self.round_report(false, Vec::new(), self.inside_zone_count());
        }

        let zone = systems::compute_zone_candidate(
            &self.agents,
            self.config.zone_mode,
            &self.placement_bounds(),
            &mut self.rng,
        );
        self.zone = Some(zone);

        self.round += 1;
        self.outside_since.clear();

        let eliminated = systems::attrition_system(&mut self.agents, self.config.attrition_cap, &mut self.rng);
        for id in &eliminated {
            self.record(*id, EliminationCause::Attrition);
        }

        let radius = self.current_radius();
        let inside: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|a| a.alive && zone.contains(&a.position, radius))
            .map(|a| a.id)
            .collect();
        if let [only] = inside.as_slice() {
            if self.winner.is_none() {
                info!("Round {}: {} is alone in the zone", self.round, only);
                self.winner = Some(*only);
            }
        }

        let alive = self.alive_count();
        debug!(
            "Round {} -> zone ({:.1}, {:.1}) r={}, {} culled, {} alive",
            self.round,
            zone.center.x,
            zone.center.y,
            radius,
            eliminated.len(),
            alive
        );

        if self.round >= self.config.max_rounds || (alive <= 1 && self.round >= self.config.min_rounds) {
            self.finalize();
        }

        self.round_report(true, eliminated, inside.len())
    }

    /// Contest over: minimum rounds played and either the cap is hit or at
    /// most one agent is left standing.
    pub fn is_finished(&self) -> bool {
        self.round >= self.config.min_rounds
            && (self.round >= self.config.max_rounds || self.alive_count() <= 1)
    }

    /// Settle the winner.
    ///
    /// Applies round attrition until one agent remains, then ranks. Returns
    /// `None` only for an empty population.
    pub fn finalize(&mut self) -> Option<AgentId> {
        while self.alive_count() > 1 {
            let eliminated = systems::attrition_system(&mut self.agents, self.config.attrition_cap, &mut self.rng);
            if eliminated.is_empty() {
                break;
            }
            for id in &eliminated {
                self.record(*id, EliminationCause::Attrition);
            }
        }

        let radius = self.current_radius();
        self.winner = systems::resolve_winner(&self.agents, self.zone.as_ref(), radius);
        self.finalized = true;

        match self.winner {
            Some(id) => info!("Contest finalized at round {}: winner {}", self.round, id),
            None => info!("Contest finalized at round {}: no agents, no winner", self.round),
        }
        self.winner
    }

    /// End the contest now, honouring the minimum-rounds floor, and mark it
    /// permanently complete.
    pub fn force_finish(&mut self) -> Option<AgentId> {
        self.round = self.round.max(self.config.min_rounds);
        let winner = self.finalize();
        self.round = self.config.max_rounds;
        winner
    }

    // ------------------------------------------------------------------------
    // Read-only accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &ContestConfig {
        &self.config
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.config.max_rounds
    }

    /// `None` until the first `reset`.
    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    pub fn current_radius(&self) -> f64 {
        self.config.radius_for(self.round)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    pub fn alive_count(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }

    pub fn inside_zone_count(&self) -> usize {
        let radius = self.current_radius();
        match self.zone {
            Some(zone) => self
                .agents
                .iter()
                .filter(|a| a.alive && zone.contains(&a.position, radius))
                .count(),
            None => 0,
        }
    }

    /// Before finalization this is provisional: an early zone winner may
    /// still be eliminated, and `finalize` replaces it.
    pub fn winner(&self) -> Option<AgentId> {
        self.winner
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulation time since the last reset.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    pub fn snapshot(&self) -> ContestSnapshot {
        ContestSnapshot::capture(self)
    }

    // ------------------------------------------------------------------------

    fn placement_bounds(&self) -> PlacementBounds {
        PlacementBounds {
            arena: self.config.arena(),
            margin: self.config.zone_margin,
            jitter: self.config.zone_jitter,
        }
    }

    fn record(&mut self, agent: AgentId, cause: EliminationCause) {
        self.eliminations.push(Elimination {
            agent,
            cause,
            round: self.round,
            at: self.elapsed,
        });
    }

    fn idle_tick(&self) -> TickResult {
        TickResult {
            tick: self.tick,
            elapsed: self.elapsed,
            duels: Vec::new(),
            timed_out: Vec::new(),
            alive: self.alive_count(),
            finished: self.is_finished(),
        }
    }

    fn round_report(&self, advanced: bool, eliminated: Vec<AgentId>, inside_zone: usize) -> RoundReport {
        RoundReport {
            advanced,
            round: self.round,
            zone: self.zone,
            radius: self.current_radius(),
            eliminated,
            inside_zone,
            alive: self.alive_count(),
            winner: self.winner,
            finished: self.is_finished(),
        }
    }
}
