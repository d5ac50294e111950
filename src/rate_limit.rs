use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const MINUTE_WINDOW: Duration = Duration::from_secs(60);
pub const HOUR_WINDOW: Duration = Duration::from_secs(3600);

pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 2000;
pub const DEFAULT_REQUESTS_PER_HOUR: u32 = 10000;

// Time source for the governor, swapped out in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// Usage of a single rolling window
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WindowUsage {
    pub count: u32,
    pub limit: u32,
    pub remaining: u32,
    pub percent_used: f64,
}

impl WindowUsage {
    fn new(count: u32, limit: u32) -> Self {
        let percent_used = if limit > 0 {
            f64::from(count) / f64::from(limit) * 100.0
        } else {
            0.0
        };
        Self {
            count,
            limit,
            remaining: limit.saturating_sub(count),
            percent_used,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UsageReport {
    pub current_minute: WindowUsage,
    pub current_hour: WindowUsage,
}

// Admission control for outbound Geonames calls.
// Keeps a log of admitted calls from the last hour and checks two rolling
// windows against it. A window whose count already equals its limit rejects.
pub struct RateGovernor {
    minute_limit: u32,
    hour_limit: u32,
    timestamps: Mutex<VecDeque<Instant>>, // admitted calls, oldest first
    clock: Arc<dyn Clock>,
}

impl RateGovernor {
    pub fn new(minute_limit: u32, hour_limit: u32) -> Self {
        Self::with_clock(minute_limit, hour_limit, Arc::new(SystemClock))
    }

    pub fn with_clock(minute_limit: u32, hour_limit: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            minute_limit,
            hour_limit,
            timestamps: Mutex::new(VecDeque::new()),
            clock,
        }
    }

    // Checks both windows and, if there is room, records the call as spent.
    pub fn try_acquire(&self) -> bool {
        let mut timestamps = self.timestamps.lock();
        let now = self.clock.now();
        prune(&mut timestamps, now);

        let (minute_count, hour_count) = counts(&timestamps, now);

        if minute_count >= self.minute_limit {
            tracing::warn!(
                "Rate limit exceeded: {}/{} requests in the last minute",
                minute_count,
                self.minute_limit
            );
            return false;
        }

        if hour_count >= self.hour_limit {
            tracing::warn!(
                "Rate limit exceeded: {}/{} requests in the last hour",
                hour_count,
                self.hour_limit
            );
            return false;
        }

        timestamps.push_back(now);
        true
    }

    // Reports both windows without spending anything.
    pub fn usage_snapshot(&self) -> UsageReport {
        let mut timestamps = self.timestamps.lock();
        let now = self.clock.now();
        prune(&mut timestamps, now);

        let (minute_count, hour_count) = counts(&timestamps, now);

        UsageReport {
            current_minute: WindowUsage::new(minute_count, self.minute_limit),
            current_hour: WindowUsage::new(hour_count, self.hour_limit),
        }
    }
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new(DEFAULT_REQUESTS_PER_MINUTE, DEFAULT_REQUESTS_PER_HOUR)
    }
}

// drop everything that is an hour old or older
fn prune(timestamps: &mut VecDeque<Instant>, now: Instant) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) < HOUR_WINDOW {
            break;
        }
        timestamps.pop_front();
    }
}

// (minute, hour) counts, both windows inclusive at their edge
fn counts(timestamps: &VecDeque<Instant>, now: Instant) -> (u32, u32) {
    let mut minute = 0u32;
    let mut hour = 0u32;
    for ts in timestamps {
        let age = now.saturating_duration_since(*ts);
        if age <= MINUTE_WINDOW {
            minute += 1;
        }
        if age <= HOUR_WINDOW {
            hour += 1;
        }
    }
    (minute, hour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // Clock that only moves when told to
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(Instant::now()),
            })
        }

        fn advance(&self, by: Duration) {
            *self.now.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }

    fn governor(minute: u32, hour: u32) -> (RateGovernor, Arc<ManualClock>) {
        let clock = ManualClock::new();
        (RateGovernor::with_clock(minute, hour, clock.clone()), clock)
    }

    #[test]
    fn third_call_over_minute_limit_is_rejected() {
        let (governor, _clock) = governor(2, 100);

        let results: Vec<bool> = (0..3).map(|_| governor.try_acquire()).collect();
        assert_eq!(results, vec![true, true, false]);

        let usage = governor.usage_snapshot();
        assert_eq!(usage.current_minute.count, 2);
        assert_eq!(usage.current_minute.remaining, 0);
        assert_eq!(usage.current_minute.percent_used, 100.0);
        assert_eq!(usage.current_hour.count, 2);
        assert_eq!(usage.current_hour.remaining, 98);
    }

    #[test]
    fn admits_exactly_the_limit_in_call_order() {
        let (governor, clock) = governor(5, 1000);

        let results: Vec<bool> = (0..12)
            .map(|_| {
                clock.advance(Duration::from_secs(1));
                governor.try_acquire()
            })
            .collect();

        assert!(results[..5].iter().all(|r| *r));
        assert!(results[5..].iter().all(|r| !*r));
    }

    #[test]
    fn minute_window_rolls_forward() {
        let (governor, clock) = governor(2, 100);
        assert!(governor.try_acquire());
        assert!(governor.try_acquire());
        assert!(!governor.try_acquire());

        // still inside the window at exactly 60s
        clock.advance(MINUTE_WINDOW);
        assert!(!governor.try_acquire());

        clock.advance(Duration::from_secs(1));
        assert!(governor.try_acquire());

        let usage = governor.usage_snapshot();
        assert_eq!(usage.current_minute.count, 1);
        assert_eq!(usage.current_hour.count, 3);
    }

    #[test]
    fn hour_limit_applies_across_minutes() {
        let (governor, clock) = governor(100, 3);
        for _ in 0..3 {
            assert!(governor.try_acquire());
            clock.advance(Duration::from_secs(120));
        }
        assert!(!governor.try_acquire());

        let usage = governor.usage_snapshot();
        assert_eq!(usage.current_minute.count, 0);
        assert_eq!(usage.current_hour.count, 3);
        assert_eq!(usage.current_hour.remaining, 0);
    }

    #[test]
    fn hour_old_calls_are_pruned() {
        let (governor, clock) = governor(10, 10);
        for _ in 0..4 {
            assert!(governor.try_acquire());
        }

        clock.advance(HOUR_WINDOW);
        let usage = governor.usage_snapshot();
        assert_eq!(usage.current_minute.count, 0);
        assert_eq!(usage.current_hour.count, 0);
        assert!(governor.timestamps.lock().is_empty());
    }

    #[test]
    fn snapshot_does_not_spend_budget() {
        let (governor, _clock) = governor(1, 10);
        for _ in 0..5 {
            let usage = governor.usage_snapshot();
            assert_eq!(usage.current_minute.count, 0);
        }
        assert!(governor.try_acquire());
        for _ in 0..5 {
            assert_eq!(governor.usage_snapshot().current_minute.count, 1);
        }
        assert!(!governor.try_acquire());
    }

    #[test]
    fn zero_limit_rejects_and_reports_zero_percent() {
        let (governor, _clock) = governor(0, 0);
        assert!(!governor.try_acquire());

        let usage = governor.usage_snapshot();
        assert_eq!(usage.current_minute.percent_used, 0.0);
        assert_eq!(usage.current_hour.remaining, 0);
    }

    #[test]
    fn defaults_match_geonames_quota() {
        let usage = RateGovernor::default().usage_snapshot();
        assert_eq!(usage.current_minute.limit, 2000);
        assert_eq!(usage.current_hour.limit, 10000);
        assert_eq!(usage.current_hour.remaining, 10000);
    }

    #[test]
    fn concurrent_callers_never_overshoot() {
        let governor = Arc::new(RateGovernor::new(50, 1000));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let governor = Arc::clone(&governor);
                thread::spawn(move || (0..100).filter(|_| governor.try_acquire()).count())
            })
            .collect();

        let admitted: usize = handles
            .into_iter()
            .map(|h| h.join().expect("worker thread panicked"))
            .sum();

        assert_eq!(admitted, 50);
        assert_eq!(governor.usage_snapshot().current_minute.count, 50);
    }
}
