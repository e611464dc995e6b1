//! Simulation tuning knobs.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Tunable behavior of the simulated service.
///
/// Rates are probabilities in `[0.0, 1.0]`; durations are milliseconds.
/// Every field has a default, so a config source only needs to name the
/// knobs it wants to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Probability that an upload request is rejected before acceptance.
    pub upload_failure_rate: f64,

    /// Probability that a request stalls long enough to trip client timeouts.
    pub timeout_rate: f64,

    /// Probability that an accepted upload ultimately fails processing.
    /// Drawn once per upload at creation time, never re-evaluated.
    pub processing_failure_rate: f64,

    /// Bounds of the uniform draw for an upload's total processing time.
    pub min_processing_ms: u64,
    pub max_processing_ms: u64,

    /// Period of the per-upload progress driver.
    pub tick_ms: u64,

    /// Bounds of the uniform draw for a simulated slow response.
    pub slowdown_min_ms: u64,
    pub slowdown_max_ms: u64,

    /// How long a simulated timeout stalls before answering. Must exceed any
    /// client-side timeout the service is meant to exercise.
    pub timeout_stall_ms: u64,

    /// Bounds of the uniform draw for the number of stock sentences in a
    /// generated transcript.
    pub transcript_min_sentences: usize,
    pub transcript_max_sentences: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            upload_failure_rate: 0.1,
            timeout_rate: 0.05,
            processing_failure_rate: 0.1,
            min_processing_ms: 5_000,
            max_processing_ms: 30_000,
            tick_ms: 1_000,
            slowdown_min_ms: 1_000,
            slowdown_max_ms: 3_000,
            timeout_stall_ms: 35_000,
            transcript_min_sentences: 3,
            transcript_max_sentences: 7,
        }
    }
}

impl SimulationConfig {
    /// Reject impossible knob combinations before the service starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (knob, value) in [
            ("upload_failure_rate", self.upload_failure_rate),
            ("timeout_rate", self.timeout_rate),
            ("processing_failure_rate", self.processing_failure_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { knob, value });
            }
        }
        if self.min_processing_ms > self.max_processing_ms {
            return Err(ConfigError::InvertedRange {
                knob: "processing_ms",
            });
        }
        if self.slowdown_min_ms > self.slowdown_max_ms {
            return Err(ConfigError::InvertedRange { knob: "slowdown_ms" });
        }
        if self.transcript_min_sentences > self.transcript_max_sentences {
            return Err(ConfigError::InvertedRange {
                knob: "transcript_sentences",
            });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn processing_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_processing_ms),
            Duration::from_millis(self.max_processing_ms),
        )
    }

    pub fn slowdown_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.slowdown_min_ms),
            Duration::from_millis(self.slowdown_max_ms),
        )
    }

    pub fn timeout_stall(&self) -> Duration {
        Duration::from_millis(self.timeout_stall_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_config_is_valid() {
        SimulationConfig::default().validate().unwrap();
    }

    #[rstest]
    #[case::negative(-0.01)]
    #[case::above_one(1.01)]
    fn rates_outside_unit_interval_are_rejected(#[case] rate: f64) {
        let config = SimulationConfig {
            upload_failure_rate: rate,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn boundary_rates_are_accepted() {
        let config = SimulationConfig {
            upload_failure_rate: 0.0,
            timeout_rate: 1.0,
            processing_failure_rate: 1.0,
            ..SimulationConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn inverted_processing_range_is_rejected() {
        let config = SimulationConfig {
            min_processing_ms: 10_000,
            max_processing_ms: 5_000,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn degenerate_processing_range_is_accepted() {
        let config = SimulationConfig {
            min_processing_ms: 5_000,
            max_processing_ms: 5_000,
            ..SimulationConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn zero_tick_is_rejected() {
        let config = SimulationConfig {
            tick_ms: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"processingFailureRate": 0.5, "tickMs": 200}"#).unwrap();
        assert_eq!(config.processing_failure_rate, 0.5);
        assert_eq!(config.tick_ms, 200);
        assert_eq!(
            config.upload_failure_rate,
            SimulationConfig::default().upload_failure_rate
        );
    }
}
