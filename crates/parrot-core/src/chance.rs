//! Randomized outcome decisions.
//!
//! Every function here is stateless with respect to the engine: it never
//! reads or writes an upload record, and it is safe to call from any number
//! of concurrent request paths (each call draws from its own `thread_rng`).
//! Pinning a probability to `0.0` or `1.0` makes the decision deterministic,
//! which is how tests get reproducible behavior without seeding.

use std::time::Duration;

use rand::Rng;

use crate::config::SimulationConfig;

/// Probability of a simulated slow response. Fixed, independent of the
/// configured failure/timeout knobs.
pub const SLOWDOWN_RATE: f64 = 0.1;

/// A simulated upload-acceptance failure: HTTP status plus message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadFault {
    pub status: u16,
    pub message: &'static str,
}

const UPLOAD_FAULTS: &[UploadFault] = &[
    UploadFault {
        status: 500,
        message: "Internal server error during upload",
    },
    UploadFault {
        status: 503,
        message: "Service temporarily unavailable",
    },
    UploadFault {
        status: 507,
        message: "Insufficient storage space",
    },
];

/// Bernoulli draw. Values outside `[0.0, 1.0]` are treated as the nearer
/// bound, so a pinned config can never panic the RNG.
pub fn roll(probability: f64) -> bool {
    if probability <= 0.0 {
        false
    } else if probability >= 1.0 {
        true
    } else {
        rand::thread_rng().gen_bool(probability)
    }
}

/// Should this request be rejected outright?
pub fn should_fail(probability: f64) -> bool {
    roll(probability)
}

/// Should this request stall past the client's timeout?
pub fn should_timeout(probability: f64) -> bool {
    roll(probability)
}

/// Should this request get an artificial short delay before proceeding?
pub fn should_slow_down() -> bool {
    roll(SLOWDOWN_RATE)
}

/// Uniform draw from the configured slow-response range.
pub fn slowdown_delay(config: &SimulationConfig) -> Duration {
    let (min, max) = config.slowdown_range();
    draw_duration(min, max)
}

/// Pick one of the fixed upload-acceptance failures, uniformly.
pub fn pick_error() -> UploadFault {
    UPLOAD_FAULTS[rand::thread_rng().gen_range(0..UPLOAD_FAULTS.len())]
}

/// Uniform draw from `[min, max]`, at millisecond granularity.
pub fn draw_duration(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let millis = rand::thread_rng().gen_range(min.as_millis() as u64..=max.as_millis() as u64);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn pinned_to_zero_never_fires() {
        for _ in 0..200 {
            assert!(!roll(0.0));
        }
    }

    #[test]
    fn pinned_to_one_always_fires() {
        for _ in 0..200 {
            assert!(roll(1.0));
        }
    }

    #[rstest]
    #[case::below_zero(-0.5, false)]
    #[case::above_one(1.5, true)]
    fn out_of_range_probabilities_clamp(#[case] probability: f64, #[case] expected: bool) {
        for _ in 0..50 {
            assert_eq!(roll(probability), expected);
        }
    }

    #[test]
    fn draw_duration_stays_within_bounds() {
        let min = Duration::from_millis(100);
        let max = Duration::from_millis(300);
        for _ in 0..200 {
            let drawn = draw_duration(min, max);
            assert!(drawn >= min && drawn <= max);
        }
    }

    #[test]
    fn draw_duration_degenerate_range_is_exact() {
        let five = Duration::from_millis(5_000);
        assert_eq!(draw_duration(five, five), five);
    }

    #[test]
    fn picked_errors_come_from_the_fixed_set() {
        for _ in 0..100 {
            let fault = pick_error();
            assert!(UPLOAD_FAULTS.contains(&fault));
            assert!((400..600).contains(&fault.status));
            assert!(!fault.message.is_empty());
        }
    }

    #[test]
    fn slowdown_delay_respects_configured_range() {
        let config = SimulationConfig {
            slowdown_min_ms: 10,
            slowdown_max_ms: 20,
            ..SimulationConfig::default()
        };
        for _ in 0..100 {
            let delay = slowdown_delay(&config);
            assert!(delay >= Duration::from_millis(10) && delay <= Duration::from_millis(20));
        }
    }
}
