//! BlueZone headless run
//!
//! Plays a batch of seeded contests in each zone mode and logs the results.

use simulation::{ContestConfig, ContestRunner, ZoneMode};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const SEEDS_PER_MODE: u64 = 32;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("BlueZone contest engine starting...");

    let runner = ContestRunner::default();
    let seeds: Vec<u64> = (0..SEEDS_PER_MODE).collect();

    for mode in [ZoneMode::Adaptive, ZoneMode::Random] {
        let config = ContestConfig {
            zone_mode: mode,
            ..Default::default()
        };

        let start = std::time::Instant::now();
        let outcomes = runner.run_batch(&config, &seeds)?;
        let elapsed = start.elapsed();

        let forced = outcomes.iter().filter(|o| o.forced).count();
        let winner_kills: u32 = outcomes.iter().map(|o| o.winner_kills).sum();
        info!(
            "{} mode: {} contests in {:?}, {} forced, mean winner kills {:.2}",
            mode,
            outcomes.len(),
            elapsed,
            forced,
            winner_kills as f64 / outcomes.len().max(1) as f64
        );
        for outcome in &outcomes {
            info!(
                "  seed {:>3}: winner {:?} after {} rounds ({} attrition, {} combat, {} timeout)",
                outcome.seed.unwrap_or_default(),
                outcome.winner,
                outcome.rounds,
                outcome.attrition_deaths,
                outcome.combat_deaths,
                outcome.timeout_deaths
            );
        }
    }

    Ok(())
}
