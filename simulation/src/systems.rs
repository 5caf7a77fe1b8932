//! Contest Systems - pure functions over the agent vector
//!
//! Each system takes the RNG explicitly so callers control draw order.

pub mod attrition;
pub mod combat;
pub mod exposure;
pub mod movement;
pub mod resolver;
pub mod zone;

pub use attrition::attrition_system;
pub use combat::{combat_system, Duel};
pub use exposure::{exposure_system, ExposureRule, OutsideSince};
pub use movement::movement_system;
pub use resolver::resolve_winner;
pub use zone::{compute_zone_candidate, PlacementBounds};
