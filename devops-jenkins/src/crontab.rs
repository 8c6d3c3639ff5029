//! Scan interval to crontab classification

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;

/// Inclusive upper bounds, checked in order
const TIERS: [(Duration, &str); 6] = [
    (Duration::from_secs(5 * MINUTE), "* * * * *"),
    (Duration::from_secs(30 * MINUTE), "H/5 * * * *"),
    (Duration::from_secs(HOUR), "H/15 * * * *"),
    (Duration::from_secs(8 * HOUR), "H/30 * * * *"),
    (Duration::from_secs(24 * HOUR), "H H/4 * * *"),
    (Duration::from_secs(48 * HOUR), "H H/12 * * *"),
];

const UNBOUNDED: &str = "H H * * *";

/// Map a scan interval in milliseconds to the crontab the engine schedules
pub fn millis_to_cron(millis: i64) -> &'static str {
    let nanos = i128::from(millis) * 1_000_000;
    TIERS
        .iter()
        .find(|(limit, _)| nanos <= limit.as_nanos() as i128)
        .map(|(_, spec)| *spec)
        .unwrap_or(UNBOUNDED)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE_MS: i64 = 60 * 1000;
    const HOUR_MS: i64 = 60 * MINUTE_MS;

    #[test]
    fn test_each_tier() {
        assert_eq!(millis_to_cron(4 * MINUTE_MS), "* * * * *");
        assert_eq!(millis_to_cron(20 * MINUTE_MS), "H/5 * * * *");
        assert_eq!(millis_to_cron(45 * MINUTE_MS), "H/15 * * * *");
        assert_eq!(millis_to_cron(2 * HOUR_MS), "H/30 * * * *");
        assert_eq!(millis_to_cron(12 * HOUR_MS), "H H/4 * * *");
        assert_eq!(millis_to_cron(25 * HOUR_MS), "H H/12 * * *");
        assert_eq!(millis_to_cron(72 * HOUR_MS), "H H * * *");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(millis_to_cron(5 * MINUTE_MS), "* * * * *");
        assert_eq!(millis_to_cron(5 * MINUTE_MS + 1), "H/5 * * * *");
        assert_eq!(millis_to_cron(HOUR_MS), "H/15 * * * *");
        assert_eq!(millis_to_cron(48 * HOUR_MS), "H H/12 * * *");
        assert_eq!(millis_to_cron(48 * HOUR_MS + 1), "H H * * *");
    }

    #[test]
    fn test_non_positive_intervals() {
        assert_eq!(millis_to_cron(0), "* * * * *");
        assert_eq!(millis_to_cron(-1), "* * * * *");
    }

    #[test]
    fn test_large_interval_does_not_overflow() {
        assert_eq!(millis_to_cron(i64::MAX), "H H * * *");
    }
}
