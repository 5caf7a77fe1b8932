//! BlueZone Contest Engine
//!
//! Deterministic, seedable simulation of a shrinking-zone elimination
//! contest. Callers drive two cadences: ticks (movement, combat, exposure)
//! and rounds (zone placement, attrition, termination).

pub mod components;
pub mod config;
pub mod error;
pub mod runner;
pub mod snapshot;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{AttritionCap, ContestConfig, RadiusSchedule};
pub use error::ConfigError;
pub use runner::{Cadence, ContestOutcome, ContestRunner};
pub use snapshot::{AgentSnapshot, ContestSnapshot};
pub use world::{ContestWorld, RoundReport, TickResult};
