//! In-process fixed-window request counter
//!
//! Each identifier (`user_{id}_{action}` or `ip_{addr}_{action}`) owns a
//! window that opens on its first request. Inside the window at most
//! `max_requests` calls pass; once the window has elapsed the next call
//! opens a fresh one. Every check first drops entries whose window opened
//! more than an hour ago, so state never outlives [`SWEEP_AFTER`].

use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::Deserialize;
use std::fmt;

/// Entries older than this are swept on every check
pub const SWEEP_AFTER: Duration = Duration::hours(1);

/// Limit for one action: `max_requests` per `window_minutes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateRule {
    pub max_requests: u32,
    pub window_minutes: u32,
}

impl RateRule {
    pub const fn new(max_requests: u32, window_minutes: u32) -> Self {
        Self {
            max_requests,
            window_minutes,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::minutes(i64::from(self.window_minutes))
    }
}

/// Actions guarded by a fixed-window limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitAction {
    CreatePost,
    CreateComment,
    React,
    Report,
    Login,
    Register,
}

impl RateLimitAction {
    pub const ALL: [RateLimitAction; 6] = [
        Self::CreatePost,
        Self::CreateComment,
        Self::React,
        Self::Report,
        Self::Login,
        Self::Register,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatePost => "create_post",
            Self::CreateComment => "create_comment",
            Self::React => "react",
            Self::Report => "report",
            Self::Login => "login",
            Self::Register => "register",
        }
    }

    /// Upper-case name used in `RATE_LIMIT_<ACTION>_*` variables
    pub fn env_prefix(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for RateLimitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a rate check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after: Duration },
}

impl RateDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    first_request: DateTime<Utc>,
}

/// Shared limiter; cheap to check from many request tasks at once
#[derive(Debug, Default)]
pub struct RateLimiter {
    entries: DashMap<String, WindowEntry>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_key(user_id: impl fmt::Display, action: RateLimitAction) -> String {
        format!("user_{user_id}_{action}")
    }

    pub fn ip_key(addr: impl fmt::Display, action: RateLimitAction) -> String {
        format!("ip_{addr}_{action}")
    }

    /// Check and count one request for `key` at the current time
    pub fn check(&self, key: &str, rule: RateRule) -> RateDecision {
        self.check_at(key, rule, Utc::now())
    }

    pub fn check_at(&self, key: &str, rule: RateRule, now: DateTime<Utc>) -> RateDecision {
        self.sweep(now);

        let window = rule.window();
        let mut entry = match self.entries.entry(key.to_string()) {
            Entry::Occupied(occupied) => occupied.into_ref(),
            Entry::Vacant(vacant) => {
                // The first request always opens a window
                vacant.insert(WindowEntry {
                    count: 1,
                    first_request: now,
                });
                return RateDecision::Allowed;
            }
        };

        let elapsed = now - entry.first_request;
        if elapsed >= window {
            *entry = WindowEntry {
                count: 1,
                first_request: now,
            };
            return RateDecision::Allowed;
        }

        if entry.count >= rule.max_requests {
            return RateDecision::Limited {
                retry_after: window - elapsed,
            };
        }

        entry.count += 1;
        RateDecision::Allowed
    }

    /// Drop every entry whose window opened more than an hour ago
    pub fn sweep(&self, now: DateTime<Utc>) {
        self.entries
            .retain(|_, entry| now - entry.first_request <= SWEEP_AFTER);
    }

    /// Number of tracked identifiers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: RateRule = RateRule::new(3, 5);

    #[test]
    fn test_allows_up_to_max_then_limits() {
        let limiter = RateLimiter::new();
        let now = Utc::now();

        for _ in 0..3 {
            assert!(limiter.check_at("k", RULE, now).is_allowed());
        }
        let decision = limiter.check_at("k", RULE, now + Duration::minutes(1));
        assert_eq!(
            decision,
            RateDecision::Limited {
                retry_after: Duration::minutes(4)
            }
        );
    }

    #[test]
    fn test_window_resets_after_elapsed() {
        let limiter = RateLimiter::new();
        let start = Utc::now();

        for _ in 0..3 {
            limiter.check_at("k", RULE, start);
        }
        assert!(!limiter.check_at("k", RULE, start).is_allowed());
        assert!(limiter
            .check_at("k", RULE, start + Duration::minutes(5))
            .is_allowed());
        // The reset opened a new window with count 1
        assert!(limiter
            .check_at("k", RULE, start + Duration::minutes(6))
            .is_allowed());
    }

    #[test]
    fn test_first_request_opens_a_window_even_with_zero_max() {
        let limiter = RateLimiter::new();
        let now = Utc::now();
        let closed = RateRule::new(0, 10);

        assert!(limiter.check_at("k", closed, now).is_allowed());
        assert_eq!(
            limiter.check_at("k", closed, now + Duration::minutes(2)),
            RateDecision::Limited {
                retry_after: Duration::minutes(8)
            }
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new();
        let now = Utc::now();
        let one = RateRule::new(1, 10);

        let a = RateLimiter::user_key(1, RateLimitAction::React);
        let b = RateLimiter::user_key(2, RateLimitAction::React);
        let c = RateLimiter::user_key(1, RateLimitAction::Report);

        assert!(limiter.check_at(&a, one, now).is_allowed());
        assert!(!limiter.check_at(&a, one, now).is_allowed());
        assert!(limiter.check_at(&b, one, now).is_allowed());
        assert!(limiter.check_at(&c, one, now).is_allowed());
    }

    #[test]
    fn test_sweep_drops_entries_older_than_an_hour() {
        let limiter = RateLimiter::new();
        let start = Utc::now();

        limiter.check_at("old", RULE, start);
        limiter.check_at("new", RULE, start + Duration::minutes(30));
        assert_eq!(limiter.len(), 2);

        limiter.check_at("new", RULE, start + Duration::minutes(61));
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn test_key_formats() {
        assert_eq!(
            RateLimiter::user_key(42, RateLimitAction::CreatePost),
            "user_42_create_post"
        );
        assert_eq!(
            RateLimiter::ip_key("10.0.0.1", RateLimitAction::Login),
            "ip_10.0.0.1_login"
        );
        assert_eq!(RateLimitAction::CreateComment.env_prefix(), "CREATE_COMMENT");
    }
}
