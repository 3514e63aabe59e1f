use std::fmt;

use thiserror::Error;

use crate::types::QuotaValue;

/// Result type alias for DNSDB operations
pub type Result<T> = std::result::Result<T, DnsdbError>;

/// Result of a newline-delimited lookup: every record, or the records
/// decoded before the failure together with the failure itself.
pub type LookupResult<T> = std::result::Result<Vec<T>, LookupError<T>>;

/// Errors that can occur when using the DNSDB API
#[derive(Error, Debug)]
pub enum DnsdbError {
    /// Authentication failed - invalid or missing API key
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// The client-side quota tracker reports no remaining queries
    #[error("DNSDB API quota limit reached (limit {limit})")]
    QuotaExceeded {
        /// Last limit reported by the server
        limit: QuotaValue,
    },

    /// The server rejected the request with 429
    #[error("rate limited by the DNSDB API")]
    RateLimited,

    /// A rate-limit response header was missing or not an integer
    #[error("malformed {header} header: {value:?}")]
    RateLimitHeader {
        /// Header name
        header: &'static str,
        /// Raw header value (empty when absent)
        value: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Reading the response body failed part way through
    #[error("failed to read response body: {0}")]
    Io(String),

    /// A single-object response could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One line of a newline-delimited response could not be decoded
    #[error("invalid JSON on line {line}: {source}")]
    Decode {
        /// 1-based line number within the response body
        line: usize,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// rdata lookup format outside `name`, `ip`, `raw`
    #[error("wrong rdata format {0:?} - allowed are (name|ip|raw)")]
    InvalidFormat(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DnsdbError {
    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns true if the error was raised before any request was sent
    #[must_use]
    pub const fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded { .. } | Self::InvalidFormat(_) | Self::InvalidUrl(_)
        )
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited => Some(429),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A lookup that stopped early.
///
/// `records` holds everything decoded before `source` occurred. It is empty
/// when the failure happened before the body was read (quota gate, transport
/// error, bad format).
pub struct LookupError<T> {
    /// Records decoded before the failure
    pub records: Vec<T>,
    /// What stopped the lookup
    pub source: DnsdbError,
}

impl<T> LookupError<T> {
    /// Pair partial records with the error that interrupted them
    #[must_use]
    pub const fn new(records: Vec<T>, source: DnsdbError) -> Self {
        Self { records, source }
    }

    /// Split into the partial records and the error
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, DnsdbError) {
        (self.records, self.source)
    }
}

impl<T> From<DnsdbError> for LookupError<T> {
    fn from(source: DnsdbError) -> Self {
        Self::new(Vec::new(), source)
    }
}

impl<T> fmt::Debug for LookupError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupError")
            .field("records", &self.records.len())
            .field("source", &self.source)
            .finish()
    }
}

impl<T> fmt::Display for LookupError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.records.is_empty() {
            write!(f, "{}", self.source)
        } else {
            write!(
                f,
                "{} (after {} records)",
                self.source,
                self.records.len()
            )
        }
    }
}

impl<T> std::error::Error for LookupError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_from_dnsdb_error() {
        let err: LookupError<u32> = DnsdbError::InvalidFormat("hostname".into()).into();
        assert!(err.records.is_empty());
        assert!(matches!(err.source, DnsdbError::InvalidFormat(_)));
        assert_eq!(
            err.to_string(),
            "wrong rdata format \"hostname\" - allowed are (name|ip|raw)"
        );
    }

    #[test]
    fn test_lookup_error_display_counts_records() {
        let err = LookupError::new(vec![1, 2], DnsdbError::Io("reset".into()));
        assert_eq!(
            err.to_string(),
            "failed to read response body: reset (after 2 records)"
        );
        let (records, source) = err.into_parts();
        assert_eq!(records, vec![1, 2]);
        assert!(matches!(source, DnsdbError::Io(_)));
    }

    #[test]
    fn test_error_classification() {
        assert!(DnsdbError::Timeout(30).is_retryable());
        assert!(!DnsdbError::Unauthorized.is_retryable());
        assert!(DnsdbError::Unauthorized.is_auth_error());
        assert!(DnsdbError::QuotaExceeded {
            limit: QuotaValue::Count(1000)
        }
        .is_pre_flight());
        assert_eq!(DnsdbError::RateLimited.status_code(), Some(429));
        assert_eq!(DnsdbError::Http("x".into()).status_code(), None);
    }
}
