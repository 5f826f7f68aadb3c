//! Per-client rate limiter for the submission endpoint.
//!
//! Fixed-window counters keyed by client identifier (source IP). State is
//! in-memory and resets on process restart; no cross-process coordination
//! exists. Safe to share via `Arc<RateLimiter>` across async tasks.
//!
//! A periodic sweep drops expired windows to bound memory. Losing a window
//! to a concurrent sweep merely resets that client's counter early, so the
//! limiter fails open, never closed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct Window {
    count: usize,
    window_start: Instant,
}

/// In-memory fixed-window rate limiter.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_per_window: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_per_window: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_per_window,
            window,
        }
    }

    /// Check `key` against the limit. Returns `true` if the request is
    /// counted and allowed, `false` if rate-limited (no state mutation).
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Remove expired windows (call periodically to free memory).
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock();

        match windows.get_mut(key) {
            None => {
                windows.insert(
                    key.to_string(),
                    Window {
                        count: 1,
                        window_start: now,
                    },
                );
                true
            }
            Some(w) => {
                if now.duration_since(w.window_start) > self.window {
                    w.count = 1;
                    w.window_start = now;
                    true
                } else if w.count >= self.max_per_window {
                    false
                } else {
                    w.count += 1;
                    true
                }
            }
        }
    }

    fn sweep_at(&self, now: Instant) {
        let mut windows = self.windows.lock();
        windows.retain(|_, w| now.duration_since(w.window_start) <= self.window);
    }
}

/// Periodic sweep task. Runs for the life of the process.
pub async fn run_sweep_loop(limiter: Arc<RateLimiter>) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    interval.tick().await; // first tick fires immediately

    loop {
        interval.tick().await;
        limiter.sweep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_max_per_window() {
        let l = RateLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();

        assert!(l.check_at("1.2.3.4", now));
        assert!(l.check_at("1.2.3.4", now));
        assert!(l.check_at("1.2.3.4", now));
        assert!(!l.check_at("1.2.3.4", now));
    }

    #[test]
    fn rejection_does_not_mutate_count() {
        let l = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(l.check_at("1.2.3.4", now));
        assert!(!l.check_at("1.2.3.4", now));

        // The rejected request did not extend or grow the window: once it
        // expires, the client is admitted again.
        let later = now + Duration::from_secs(61);
        assert!(l.check_at("1.2.3.4", later));
    }

    #[test]
    fn window_resets_after_expiry() {
        let l = RateLimiter::new(5, Duration::from_millis(60000));
        let now = Instant::now();

        for _ in 0..5 {
            assert!(l.check_at("1.2.3.4", now));
        }
        assert!(!l.check_at("1.2.3.4", now + Duration::from_secs(1)));

        // Past the window the counter resets and requests succeed again.
        let later = now + Duration::from_millis(60001);
        assert!(l.check_at("1.2.3.4", later));
    }

    #[test]
    fn keys_are_independent() {
        let l = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();

        l.check_at("1.2.3.4", now);
        l.check_at("1.2.3.4", now);
        assert!(!l.check_at("1.2.3.4", now));

        assert!(l.check_at("5.6.7.8", now));
    }

    #[test]
    fn sweep_removes_only_expired_windows() {
        let l = RateLimiter::new(5, Duration::from_secs(60));
        let now = Instant::now();

        l.check_at("stale", now);
        l.check_at("fresh", now + Duration::from_secs(50));

        l.sweep_at(now + Duration::from_secs(61));

        let windows = l.windows.lock();
        assert!(!windows.contains_key("stale"));
        assert!(windows.contains_key("fresh"));
    }

    #[test]
    fn swept_client_fails_open() {
        let l = RateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(l.check_at("1.2.3.4", now));
        assert!(!l.check_at("1.2.3.4", now));

        // A sweep that drops the window resets the counter early.
        l.windows.lock().clear();
        assert!(l.check_at("1.2.3.4", now));
    }
}
