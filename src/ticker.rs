use std::time::{Duration, Instant};

/// Event-poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Period of the session countdown and of the wall-clock redraw
pub const SECOND: Duration = Duration::from_secs(1);

/// Get event-poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}

/// A cancellable periodic signal driven by the event loop
///
/// At most one schedule is outstanding: starting an active ticker keeps the
/// existing schedule, so periods are never counted twice.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_fire: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_fire: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Start firing one period from `now`, unless already active
    pub fn start(&mut self, now: Instant) {
        if self.next_fire.is_none() {
            self.next_fire = Some(now + self.period);
        }
    }

    /// Cancel the schedule (idempotent)
    pub fn stop(&mut self) {
        self.next_fire = None;
    }

    /// Start or stop so the ticker is active exactly when `active` is true
    pub fn sync(&mut self, active: bool, now: Instant) {
        if active {
            self.start(now);
        } else {
            self.stop();
        }
    }

    /// Number of whole periods that elapsed since the last fire
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_fire else {
            return 0;
        };

        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += self.period;
        }
        self.next_fire = Some(next);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_duration() {
        assert_eq!(poll_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_inactive_ticker_never_fires() {
        let mut ticker = Ticker::new(SECOND);
        let now = Instant::now();
        assert_eq!(ticker.poll(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut ticker = Ticker::new(SECOND);
        let start = Instant::now();
        ticker.start(start);

        assert_eq!(ticker.poll(start + Duration::from_millis(500)), 0);
        assert_eq!(ticker.poll(start + Duration::from_millis(1000)), 1);
        assert_eq!(ticker.poll(start + Duration::from_millis(1500)), 0);
        assert_eq!(ticker.poll(start + Duration::from_millis(4200)), 3);
    }

    #[test]
    fn test_restart_does_not_double_schedule() {
        let mut ticker = Ticker::new(SECOND);
        let start = Instant::now();
        ticker.start(start);
        ticker.start(start + Duration::from_millis(900));

        assert_eq!(ticker.poll(start + Duration::from_millis(1000)), 1);
    }

    #[test]
    fn test_stop_is_idempotent_and_cancels() {
        let mut ticker = Ticker::new(SECOND);
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();
        ticker.stop();

        assert!(!ticker.is_active());
        assert_eq!(ticker.poll(start + Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_sync_follows_active_flag() {
        let mut ticker = Ticker::new(SECOND);
        let start = Instant::now();
        ticker.sync(true, start);
        assert!(ticker.is_active());
        ticker.sync(false, start);
        assert!(!ticker.is_active());
    }
}
