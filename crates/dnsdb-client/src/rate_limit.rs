//! Passive quota tracking from response headers.

use dnsdb_core::{DnsdbError, Quota, QuotaValue, Result, UNLIMITED};
use reqwest::header::HeaderMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Header carrying the total quota of the key
pub const LIMIT_HEADER: &str = "X-RateLimit-Limit";

/// Header carrying the queries left for the key
pub const REMAINING_HEADER: &str = "X-RateLimit-Remaining";

/// Tracks the quota the server reported on its last response.
///
/// Nothing is ever requested to learn the quota; every completed call feeds
/// its headers into [`RateLimiter::update`], and [`RateLimiter::allow`] gates
/// the next call on what was seen. Share one limiter between clients with
/// [`DnsdbClientBuilder::rate_limiter`](crate::DnsdbClientBuilder::rate_limiter)
/// to get process-wide accounting.
#[derive(Debug, Default)]
pub struct RateLimiter {
    state: Mutex<Option<Quota>>,
}

impl RateLimiter {
    /// Create a limiter that has not seen any response yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Returns true if the next call may be sent.
    ///
    /// Only an observed quota with no remaining queries blocks.
    pub fn allow(&self) -> bool {
        match *self.lock() {
            // Nothing observed yet: the first call has to go through so
            // there is something to observe.
            None => true,
            Some(quota) => quota.allows(),
        }
    }

    /// Replace the tracked quota with the one reported in `headers`.
    ///
    /// A limit of `unlimited` marks both values unlimited. Otherwise both
    /// headers must be base-10 integers; a missing or malformed header is an
    /// error and the previous snapshot is kept.
    pub fn update(&self, headers: &HeaderMap) -> Result<()> {
        let quota = parse_quota(headers)?;
        debug!(limit = %quota.limit, remaining = %quota.remaining, "quota updated");
        *self.lock() = Some(quota);
        Ok(())
    }

    /// The last observed quota, if any
    pub fn snapshot(&self) -> Option<Quota> {
        *self.lock()
    }

    /// Forget the observed quota
    pub fn reset(&self) {
        *self.lock() = None;
    }

    /// The limit to report when refusing a call
    pub(crate) fn exhausted_limit(&self) -> QuotaValue {
        self.snapshot()
            .map_or(QuotaValue::Count(0), |quota| quota.limit)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Quota>> {
        // The guarded value is plain data; a panic elsewhere cannot leave it
        // half written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_quota(headers: &HeaderMap) -> Result<Quota> {
    let limit = header_str(headers, LIMIT_HEADER)?;
    if limit == UNLIMITED {
        return Ok(Quota::UNLIMITED);
    }

    let remaining = header_str(headers, REMAINING_HEADER)?;
    Ok(Quota {
        limit: QuotaValue::Count(parse_count(LIMIT_HEADER, limit)?),
        remaining: QuotaValue::Count(parse_count(REMAINING_HEADER, remaining)?),
    })
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str> {
    let value = headers.get(name).ok_or_else(|| DnsdbError::RateLimitHeader {
        header: name,
        value: String::new(),
    })?;

    value.to_str().map_err(|_| DnsdbError::RateLimitHeader {
        header: name,
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })
}

fn parse_count(name: &'static str, value: &str) -> Result<i64> {
    value.parse().map_err(|_| DnsdbError::RateLimitHeader {
        header: name,
        value: value.to_string(),
    })
}
