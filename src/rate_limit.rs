//! Rate limit telemetry parsed from response headers.
//!
//! The API reports its quota through three headers:
//! - `x-ratelimit-limit`: requests allowed in the current window
//! - `x-ratelimit-remaining`: requests left in the current window
//! - `x-ratelimit-reset`: Unix timestamp (seconds) at which the window resets
//!
//! A snapshot is only produced when all three are present and well formed.

use http::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const LIMIT_HEADER: &str = "x-ratelimit-limit";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// A snapshot of the caller's rate limit quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests allowed in the current window.
    pub limit: i32,

    /// Requests remaining in the current window.
    pub remaining: i32,

    /// When the current window resets.
    pub reset: SystemTime,
}

impl RateLimit {
    /// Extracts a snapshot from response headers.
    ///
    /// Returns `None` unless all three rate limit headers parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuu_client::rate_limit::RateLimit;
    /// use http::HeaderMap;
    ///
    /// let mut headers = HeaderMap::new();
    /// headers.insert("x-ratelimit-limit", "100".parse().unwrap());
    /// headers.insert("x-ratelimit-remaining", "99".parse().unwrap());
    /// headers.insert("x-ratelimit-reset", "1700000000".parse().unwrap());
    ///
    /// let snapshot = RateLimit::from_headers(&headers).unwrap();
    /// assert_eq!(snapshot.remaining, 99);
    ///
    /// headers.remove("x-ratelimit-reset");
    /// assert!(RateLimit::from_headers(&headers).is_none());
    /// ```
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = parse_header::<i32>(headers, REMAINING_HEADER)?;
        let limit = parse_header::<i32>(headers, LIMIT_HEADER)?;
        let reset = parse_header::<i64>(headers, RESET_HEADER)?;

        Some(Self {
            limit,
            remaining,
            reset: from_unix_seconds(reset)?,
        })
    }

    /// Returns `true` if no requests remain in the current window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining <= 0
    }

    /// Time left until the window resets, or zero if it already has.
    pub fn until_reset(&self) -> Duration {
        self.reset
            .duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO)
    }
}

fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

fn from_unix_seconds(seconds: i64) -> Option<SystemTime> {
    let offset = Duration::from_secs(seconds.unsigned_abs());
    if seconds >= 0 {
        UNIX_EPOCH.checked_add(offset)
    } else {
        UNIX_EPOCH.checked_sub(offset)
    }
}
