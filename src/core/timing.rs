//! Rounding of measured durations

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit a measured duration is reported in
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Seconds => write!(f, "seconds"),
            TimeUnit::Minutes => write!(f, "minutes"),
        }
    }
}

/// Round an elapsed time in seconds to two decimals of the given unit
pub fn round_time(elapsed_secs: f64, unit: TimeUnit) -> f64 {
    let value = match unit {
        TimeUnit::Seconds => elapsed_secs,
        TimeUnit::Minutes => elapsed_secs / 60.0,
    };
    round2(value)
}

/// Same as [`round_time`] for a `Duration` taken from `Instant::elapsed`
pub fn round_duration(elapsed: Duration, unit: TimeUnit) -> f64 {
    round_time(elapsed.as_secs_f64(), unit)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_seconds() {
        assert_eq!(round_time(1.23456, TimeUnit::Seconds), 1.23);
        assert_eq!(round_time(0.005, TimeUnit::Seconds), 0.01);
        assert_eq!(round_time(0.0, TimeUnit::Seconds), 0.0);
    }

    #[test]
    fn test_round_minutes() {
        assert_eq!(round_time(90.0, TimeUnit::Minutes), 1.5);
        assert_eq!(round_time(61.0, TimeUnit::Minutes), 1.02);
    }

    #[test]
    fn test_round_is_idempotent() {
        for x in [0.0, 0.01, 0.1, 1.23, 4.56, 12.34, 99.99, 1234.57] {
            let once = round_time(x, TimeUnit::Seconds);
            assert_eq!(round_time(once, TimeUnit::Seconds), once);
        }
        for step in 0..10_000u32 {
            let x = step as f64 * 0.013;
            let once = round_time(x, TimeUnit::Seconds);
            assert_eq!(round_time(once, TimeUnit::Seconds), once, "x = {}", x);
        }
    }

    #[test]
    fn test_minutes_matches_rounded_division() {
        for step in 0..5_000u32 {
            let x = step as f64 * 0.731;
            let expected = ((x / 60.0) * 100.0).round() / 100.0;
            assert_eq!(round_time(x, TimeUnit::Minutes), expected);
        }
    }

    #[test]
    fn test_round_duration() {
        let d = Duration::from_millis(1_234);
        assert_eq!(round_duration(d, TimeUnit::Seconds), 1.23);
    }
}
