//! Elapsed classification of slots against the wall clock.
//!
//! Purely advisory: tells the rendering layer which slots lie in the past
//! (past > allocated > free precedence) and never touches the allocation
//! table. A past slot that was never allocated remains free, and booking
//! into the past is deliberately still allowed.
//!
//! The sampler follows the same no-internal-threads model as the rest of
//! the crate: the host calls `tick()` on whatever cadence it has (a UI
//! frame loop, a coarse timer) and the sampler re-reads the clock once its
//! interval has elapsed.

use chrono::{Local, NaiveTime, Timelike};

/// Whether the slot `(hour, block)` lies before `now`.
///
/// A slot is past once its closing minute boundary has been reached:
/// block 0 closes at minute 10, block 1 at minute 20, and so on. At
/// exactly 09:10 the slot covering 09:00-09:10 is past while 09:10-09:20
/// is not yet.
pub fn is_past(hour: u8, block: u8, now: NaiveTime) -> bool {
    if now.hour() > hour as u32 {
        return true;
    }
    now.hour() == hour as u32 && now.minute() >= (block as u32 + 1) * 10
}

/// Coarse wall-clock sampler driving elapsed classification.
///
/// Holds the most recent sample; `tick()` refreshes it when at least the
/// configured interval has passed since the last refresh.
#[derive(Debug, Clone)]
pub struct ClockSampler {
    interval_ms: u64,
    sample: NaiveTime,
    last_sample_epoch_ms: u64,
}

impl ClockSampler {
    /// Create a sampler with the given refresh interval, seeded with the
    /// current local time.
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval_ms: interval_secs * 1000,
            sample: Local::now().time(),
            last_sample_epoch_ms: now_ms(),
        }
    }

    /// The most recently sampled local time.
    pub fn sample(&self) -> NaiveTime {
        self.sample
    }

    /// Re-sample the clock if the interval has elapsed.
    ///
    /// Returns the fresh sample when one was taken, `None` otherwise.
    pub fn tick(&mut self) -> Option<NaiveTime> {
        let now = now_ms();
        if now.saturating_sub(self.last_sample_epoch_ms) < self.interval_ms {
            return None;
        }
        self.sample = Local::now().time();
        self.last_sample_epoch_ms = now;
        Some(self.sample)
    }

    /// Re-sample immediately, ignoring the interval.
    pub fn force_sample(&mut self) -> NaiveTime {
        self.sample = Local::now().time();
        self.last_sample_epoch_ms = now_ms();
        self.sample
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn earlier_hours_are_past() {
        assert!(is_past(9, 0, at(10, 0)));
        assert!(is_past(6, 5, at(23, 59)));
    }

    #[test]
    fn later_hours_are_not_past() {
        assert!(!is_past(14, 0, at(9, 30)));
    }

    #[test]
    fn closing_minute_boundary() {
        // At 09:10 exactly, 09:00-09:10 is past but 09:10-09:20 is not.
        assert!(is_past(9, 0, at(9, 10)));
        assert!(!is_past(9, 1, at(9, 10)));

        assert!(!is_past(9, 0, at(9, 9)));
        assert!(is_past(9, 5, at(10, 0)));
        assert!(!is_past(9, 5, at(9, 59)));
    }

    #[test]
    fn sampler_respects_interval() {
        // A long interval means the seed sample stays put.
        let mut sampler = ClockSampler::new(3600);
        let seed = sampler.sample();
        assert!(sampler.tick().is_none());
        assert_eq!(sampler.sample(), seed);

        // A zero interval refreshes on every tick.
        let mut eager = ClockSampler::new(0);
        assert!(eager.tick().is_some());
    }

    #[test]
    fn force_sample_ignores_interval() {
        let mut sampler = ClockSampler::new(3600);
        let forced = sampler.force_sample();
        assert_eq!(sampler.sample(), forced);
    }
}
