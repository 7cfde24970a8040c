use serde::{Deserialize, Serialize};

pub const MINUTE_WINDOW_SECS: i64 = 60;
pub const HOUR_WINDOW_SECS: i64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    pub per_minute: usize,
    pub per_hour: usize,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            per_minute: 10,
            per_hour: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitDecision {
    Allowed,
    MinuteExceeded,
    HourExceeded,
}

/// Sliding-window check over one caller's request history.
///
/// `recent` holds the caller's request timestamps (unix seconds) from at most
/// the last hour; the caller owns that state and injects it here, so the
/// calculator itself stays pure and per-identity.
pub fn evaluate_window(recent: &[i64], now: i64, limits: RateLimits) -> LimitDecision {
    let minute_floor = now - MINUTE_WINDOW_SECS;
    let hour_floor = now - HOUR_WINDOW_SECS;

    let in_minute = recent.iter().filter(|ts| **ts > minute_floor).count();
    let in_hour = recent.iter().filter(|ts| **ts > hour_floor).count();

    if in_minute >= limits.per_minute {
        LimitDecision::MinuteExceeded
    } else if in_hour >= limits.per_hour {
        LimitDecision::HourExceeded
    } else {
        LimitDecision::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::{evaluate_window, LimitDecision, RateLimits};

    const LIMITS: RateLimits = RateLimits {
        per_minute: 3,
        per_hour: 5,
    };

    #[test]
    fn empty_history_is_allowed() {
        assert_eq!(evaluate_window(&[], 1_000, LIMITS), LimitDecision::Allowed);
    }

    #[test]
    fn minute_window_fills_first() {
        let now = 10_000;
        let recent = [now - 5, now - 10, now - 15];
        assert_eq!(
            evaluate_window(&recent, now, LIMITS),
            LimitDecision::MinuteExceeded
        );
    }

    #[test]
    fn old_requests_slide_out_of_the_minute_window() {
        let now = 10_000;
        let recent = [now - 90, now - 120, now - 200];
        assert_eq!(evaluate_window(&recent, now, LIMITS), LimitDecision::Allowed);
    }

    #[test]
    fn hour_window_catches_sustained_traffic() {
        let now = 10_000;
        // Spread out enough that the minute window never fills.
        let recent = [now - 100, now - 400, now - 900, now - 1600, now - 2500];
        assert_eq!(
            evaluate_window(&recent, now, LIMITS),
            LimitDecision::HourExceeded
        );
    }

    #[test]
    fn requests_older_than_an_hour_do_not_count() {
        let now = 10_000;
        let recent = [now - 3700, now - 4000, now - 5000, now - 6000, now - 7000];
        assert_eq!(evaluate_window(&recent, now, LIMITS), LimitDecision::Allowed);
    }
}
