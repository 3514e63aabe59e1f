use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::timestamp::{deserialize_optional_or_na, Timestamp};

/// Token the API uses for keys without a quota
pub const UNLIMITED: &str = "unlimited";

/// A quota figure: a count, or no limit at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaValue {
    /// Number of queries
    Count(i64),
    /// Key has no quota
    Unlimited,
}

impl QuotaValue {
    /// Returns true if at least one more query fits in this value
    #[must_use]
    pub const fn has_capacity(self) -> bool {
        match self {
            Self::Count(n) => n > 0,
            Self::Unlimited => true,
        }
    }

    /// The count, if limited
    #[must_use]
    pub const fn count(self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(n),
            Self::Unlimited => None,
        }
    }
}

impl std::fmt::Display for QuotaValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str(UNLIMITED),
        }
    }
}

impl Serialize for QuotaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_i64(*n),
            Self::Unlimited => serializer.serialize_str(UNLIMITED),
        }
    }
}

impl<'de> Deserialize<'de> for QuotaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QuotaVisitor;

        impl Visitor<'_> for QuotaVisitor {
            type Value = QuotaValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an integer or \"unlimited\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(QuotaValue::Count(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(QuotaValue::Count)
                    .map_err(|_| E::custom(format!("quota {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                match v {
                    UNLIMITED | "n/a" => Ok(QuotaValue::Unlimited),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(QuotaVisitor)
    }
}

/// Quota as last reported by the rate-limit response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Total queries allowed for the key
    pub limit: QuotaValue,
    /// Queries left before the limit is hit
    pub remaining: QuotaValue,
}

impl Quota {
    /// Quota of a key with no limit
    pub const UNLIMITED: Self = Self {
        limit: QuotaValue::Unlimited,
        remaining: QuotaValue::Unlimited,
    };

    /// Returns true if another query may be sent
    #[must_use]
    pub const fn allows(&self) -> bool {
        self.remaining.has_capacity()
    }
}

/// Body of `/lookup/rate_limit/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    /// The quota snapshot
    pub rate: RateLimitStatus,
}

/// Rate limit information for the API key in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitStatus {
    /// Total queries allowed
    pub limit: QuotaValue,

    /// Queries left in the current window
    pub remaining: QuotaValue,

    /// When the quota resets
    #[serde(
        default,
        deserialize_with = "deserialize_optional_or_na",
        skip_serializing_if = "Option::is_none"
    )]
    pub reset: Option<Timestamp>,
}

impl RateLimitStatus {
    /// The limit/remaining pair as a [`Quota`]
    #[must_use]
    pub const fn quota(&self) -> Quota {
        Quota {
            limit: self.limit,
            remaining: self.remaining,
        }
    }
}
