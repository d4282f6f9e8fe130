use std::time::{Duration, Instant};

/// Debounce timer for directory scans.
///
/// Starts armed so the first [`poll`](Self::poll) fires. After that it fires
/// at most once per `interval`, measured from the previous firing, however
/// often it is polled. Time is passed in by the caller.
#[derive(Clone, Debug)]
pub struct RefreshTimer {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl RefreshTimer {
    /// Create an armed timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Make the next [`poll`](Self::poll) fire regardless of elapsed time.
    pub fn force(&mut self) {
        self.last_fired = None;
    }

    /// Returns `true` (and restarts the interval) if the timer is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last_fired {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_fired = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_fires_immediately() {
        let mut t = RefreshTimer::new(Duration::from_secs(1));
        assert!(t.poll(Instant::now()));
    }

    #[test]
    fn fires_at_most_once_per_interval() {
        let mut t = RefreshTimer::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert!(t.poll(t0));
        assert!(!t.poll(t0));
        assert!(!t.poll(t0 + Duration::from_millis(999)));
        assert!(t.poll(t0 + Duration::from_secs(1)));
        assert!(!t.poll(t0 + Duration::from_millis(1500)));
        assert!(t.poll(t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn force_rearms() {
        let mut t = RefreshTimer::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert!(t.poll(t0));
        t.force();
        assert!(t.poll(t0 + Duration::from_millis(10)));
        assert!(!t.poll(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn clock_going_backwards_does_not_fire() {
        let mut t = RefreshTimer::new(Duration::from_secs(1));
        let t0 = Instant::now() + Duration::from_secs(5);
        assert!(t.poll(t0));
        assert!(!t.poll(t0 - Duration::from_secs(3)));
    }
}
