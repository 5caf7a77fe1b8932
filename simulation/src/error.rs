use thiserror::Error;

/// Rejected contest configuration.
///
/// The engine itself never fails once built; these are the only errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Arena must have positive dimensions, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },

    #[error("Arena {width}x{height} is too small for a zone margin of {margin}")]
    MarginTooLarge { width: f64, height: f64, margin: f64 },

    #[error("Radius schedule must contain at least one radius")]
    EmptySchedule,

    #[error("Radius schedule entry {index} is not a finite non-negative number: {value}")]
    InvalidRadius { index: usize, value: f64 },

    #[error("min_rounds ({min}) exceeds max_rounds ({max})")]
    RoundBounds { min: u32, max: u32 },

    #[error("Invalid setting `{0}`: must be greater than zero")]
    NonPositive(&'static str),

    #[error("Invalid setting `{field}`: must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
