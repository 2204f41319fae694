use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?|",
        r"localhost|",
        r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("url pattern is a valid regex")
});

/// `http(s)` URL with a domain, `localhost` or IPv4 host and optional port
pub fn validate_url(url: &str) -> bool {
    URL_PATTERN.is_match(url)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Human-readable age of `dt` relative to `now`.
///
/// Anything a week or older is rendered as a date (`Jan 05, 2025`).
pub fn time_ago(dt: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - dt).num_seconds();

    match seconds {
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => plural(s / 60, "minute"),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 604_800 => plural(s / 86_400, "day"),
        _ => dt.format("%b %d, %Y").to_string(),
    }
}
