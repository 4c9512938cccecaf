use std::time::Duration;

/// Fixed-interval scheduler for the game loop.
///
/// Time is passed in as milliseconds from any monotonic origin, so the same
/// ticker works with `Instant` natively and `performance.now()` in the browser.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval_ms: f64,
    last_tick: f64,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_secs_f64() * 1000.0,
            last_tick: 0.0,
            running: false,
        }
    }

    /// (Re)starts the ticker. The first tick is due one interval after `now_ms`.
    pub fn start(&mut self, now_ms: f64) {
        self.last_tick = now_ms;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true at most once per call when a tick is due.
    ///
    /// A late frame yields one tick, not a burst of catch-up ticks.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !self.running || now_ms - self.last_tick < self.interval_ms {
            return false;
        }
        self.last_tick = now_ms;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_ticker_never_fires() {
        let mut ticker = Ticker::new(Duration::from_millis(100));
        assert!(!ticker.poll(1_000.0));
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(100));
        ticker.start(0.0);

        assert!(!ticker.poll(50.0));
        assert!(ticker.poll(100.0));
        assert!(!ticker.poll(150.0));
        assert!(ticker.poll(210.0));
    }

    #[test]
    fn test_late_poll_does_not_burst() {
        let mut ticker = Ticker::new(Duration::from_millis(100));
        ticker.start(0.0);

        assert!(ticker.poll(1_000.0));
        assert!(!ticker.poll(1_001.0));
    }

    #[test]
    fn test_stop_cancels_pending_ticks() {
        let mut ticker = Ticker::new(Duration::from_millis(100));
        ticker.start(0.0);
        ticker.stop();
        assert!(!ticker.poll(500.0));

        ticker.start(500.0);
        assert!(ticker.poll(600.0));
    }
}
