//! Per-action fixed-window rate limiting

mod fixed_window;

pub use fixed_window::{RateDecision, RateLimitAction, RateLimiter, RateRule, SWEEP_AFTER};
