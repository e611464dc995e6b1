use thiserror::Error;

/// The engine itself has no failure paths ("not found" is a defined result,
/// not an error), so the only thing that can go wrong is configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{knob} must be within [0.0, 1.0], got {value}")]
    RateOutOfRange { knob: &'static str, value: f64 },

    #[error("{knob}: minimum exceeds maximum")]
    InvertedRange { knob: &'static str },

    #[error("tick_ms must be at least 1")]
    ZeroTick,
}
