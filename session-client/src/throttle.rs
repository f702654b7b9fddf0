//! Sliding-window attempt throttle for repeated form submissions.
//!
//! Purely advisory: it smooths the UX by refusing to fire yet another
//! doomed request, while the server remains free to apply its own
//! limits.

/// Limits for one kind of attempt: at most `max_attempts` within a
/// sliding window of `window_ms` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub max_attempts: u32,
    pub window_ms: u64,
}

impl ThrottlePolicy {
    /// Login submissions: 5 attempts per 5 minutes.
    pub const LOGIN: ThrottlePolicy = ThrottlePolicy {
        max_attempts: 5,
        window_ms: 5 * 60 * 1000,
    };

    /// Registration submissions: 3 attempts per 10 minutes.
    pub const REGISTER: ThrottlePolicy = ThrottlePolicy {
        max_attempts: 3,
        window_ms: 10 * 60 * 1000,
    };

    /// Password reset requests: 3 attempts per hour.
    pub const PASSWORD_RESET: ThrottlePolicy = ThrottlePolicy {
        max_attempts: 3,
        window_ms: 60 * 60 * 1000,
    };
}

/// Snapshot of the throttle state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleStatus {
    /// Whether another attempt may be made right now.
    pub allowed: bool,
    /// Attempts left before the limit is reached.
    pub remaining: u32,
    /// Milliseconds until the oldest in-window attempt expires and a
    /// slot frees up. Zero when attempts remain.
    pub reset_in_ms: u64,
    /// True once the limit has been hit.
    pub exceeded: bool,
}

/// Tracks attempt timestamps against a [`ThrottlePolicy`].
///
/// Timestamps are Unix milliseconds. The `_at` variants take an
/// explicit clock so behavior is testable; the plain methods read the
/// system clock.
#[derive(Debug, Clone)]
pub struct AttemptThrottle {
    policy: ThrottlePolicy,
    attempts: Vec<u64>,
}

impl AttemptThrottle {
    pub fn new(policy: ThrottlePolicy) -> Self {
        Self {
            policy,
            attempts: Vec::new(),
        }
    }

    /// Checks whether another attempt is allowed right now.
    pub fn check_limit(&self) -> ThrottleStatus {
        self.check_limit_at(now_ms())
    }

    /// Clock-injected form of [`check_limit`](Self::check_limit).
    ///
    /// Does not mutate state; expired attempts are simply ignored in
    /// the computed view.
    pub fn check_limit_at(&self, now: u64) -> ThrottleStatus {
        let cutoff = now.saturating_sub(self.policy.window_ms);
        let in_window: Vec<u64> = self
            .attempts
            .iter()
            .copied()
            .filter(|&at| at > cutoff)
            .collect();

        let count = in_window.len() as u32;
        let remaining = self.policy.max_attempts.saturating_sub(count);
        let exceeded = count >= self.policy.max_attempts;

        let reset_in_ms = if exceeded {
            in_window
                .iter()
                .min()
                .map(|&oldest| (oldest + self.policy.window_ms).saturating_sub(now))
                .unwrap_or(0)
        } else {
            0
        };

        ThrottleStatus {
            allowed: !exceeded,
            remaining,
            reset_in_ms,
            exceeded,
        }
    }

    /// Records an attempt at the current time.
    pub fn record_attempt(&mut self) {
        self.record_attempt_at(now_ms());
    }

    /// Clock-injected form of [`record_attempt`](Self::record_attempt).
    ///
    /// Appends the attempt, then drops everything that has aged out of
    /// the window so the log never grows past `max_attempts` entries
    /// for long.
    pub fn record_attempt_at(&mut self, now: u64) {
        self.attempts.push(now);
        let cutoff = now.saturating_sub(self.policy.window_ms);
        self.attempts.retain(|&at| at > cutoff);
    }

    /// Forgets all recorded attempts, e.g. after a successful login.
    pub fn clear_attempts(&mut self) {
        self.attempts.clear();
    }

    /// Formats a reset duration for display: "45 seconds", "1 minute",
    /// "3 minutes".
    pub fn formatted_reset_time(reset_in_ms: u64) -> String {
        let total_seconds = reset_in_ms.div_ceil(1000);
        if total_seconds < 60 {
            let unit = if total_seconds == 1 { "second" } else { "seconds" };
            format!("{total_seconds} {unit}")
        } else {
            let minutes = total_seconds.div_ceil(60);
            let unit = if minutes == 1 { "minute" } else { "minutes" };
            format!("{minutes} {unit}")
        }
    }

    /// The message shown when the limit has been exceeded.
    pub fn retry_message(reset_in_ms: u64) -> String {
        format!(
            "Too many attempts. Please try again in {}.",
            Self::formatted_reset_time(reset_in_ms)
        )
    }
}

fn now_ms() -> u64 {
    use std::time::SystemTime;
    use std::time::UNIX_EPOCH;

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn test_allows_attempts_under_the_limit() {
        let mut throttle = AttemptThrottle::new(ThrottlePolicy::LOGIN);

        for i in 0..4 {
            let status = throttle.check_limit_at(T0 + i);
            assert!(status.allowed);
            assert!(!status.exceeded);
            throttle.record_attempt_at(T0 + i);
        }

        let status = throttle.check_limit_at(T0 + 10);
        assert!(status.allowed);
        assert_eq!(status.remaining, 1);
        assert_eq!(status.reset_in_ms, 0);
    }

    #[test]
    fn test_blocks_after_limit_reached() {
        let mut throttle = AttemptThrottle::new(ThrottlePolicy::LOGIN);

        for i in 0..5 {
            throttle.record_attempt_at(T0 + i * 1000);
        }

        let status = throttle.check_limit_at(T0 + 5000);
        assert!(!status.allowed);
        assert!(status.exceeded);
        assert_eq!(status.remaining, 0);
        // Oldest attempt was at T0; it frees up at T0 + window.
        assert_eq!(status.reset_in_ms, ThrottlePolicy::LOGIN.window_ms - 5000);
    }

    #[test]
    fn test_window_elapse_frees_a_slot_without_reset() {
        let mut throttle = AttemptThrottle::new(ThrottlePolicy::REGISTER);

        for i in 0..3 {
            throttle.record_attempt_at(T0 + i);
        }
        assert!(!throttle.check_limit_at(T0 + 100).allowed);

        // Just past the window for the oldest attempt.
        let later = T0 + ThrottlePolicy::REGISTER.window_ms + 1;
        let status = throttle.check_limit_at(later);
        assert!(status.allowed);
        assert_eq!(status.reset_in_ms, 0);
    }

    #[test]
    fn test_clear_attempts_resets_the_count() {
        let mut throttle = AttemptThrottle::new(ThrottlePolicy::PASSWORD_RESET);

        for _ in 0..3 {
            throttle.record_attempt_at(T0);
        }
        assert!(!throttle.check_limit_at(T0).allowed);

        throttle.clear_attempts();

        let status = throttle.check_limit_at(T0);
        assert!(status.allowed);
        assert_eq!(status.remaining, 3);
    }

    #[test]
    fn test_check_limit_does_not_mutate() {
        let mut throttle = AttemptThrottle::new(ThrottlePolicy::LOGIN);
        throttle.record_attempt_at(T0);

        let first = throttle.check_limit_at(T0 + 1);
        let second = throttle.check_limit_at(T0 + 1);
        assert_eq!(first, second);
        assert_eq!(first.remaining, 4);
    }

    #[test]
    fn test_formatted_reset_time() {
        assert_eq!(AttemptThrottle::formatted_reset_time(1000), "1 second");
        assert_eq!(AttemptThrottle::formatted_reset_time(45_000), "45 seconds");
        assert_eq!(AttemptThrottle::formatted_reset_time(59_000), "59 seconds");
        assert_eq!(AttemptThrottle::formatted_reset_time(59_400), "1 minute");
        assert_eq!(AttemptThrottle::formatted_reset_time(60_000), "1 minute");
        assert_eq!(AttemptThrottle::formatted_reset_time(150_000), "3 minutes");
    }

    #[test]
    fn test_retry_message() {
        assert_eq!(
            AttemptThrottle::retry_message(120_000),
            "Too many attempts. Please try again in 2 minutes."
        );
    }
}
