//! rdata lookup formats.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::DnsdbError;

/// How the value of an rdata lookup is interpreted by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RDataFormat {
    /// Domain name found in the rdata (e.g. NS, CNAME, MX targets)
    Name,
    /// IPv4/IPv6 address or network
    Ip,
    /// Hex-encoded raw rdata bytes
    Raw,
}

impl RDataFormat {
    /// The path segment used by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ip => "ip",
            Self::Raw => "raw",
        }
    }
}

impl FromStr for RDataFormat {
    type Err = DnsdbError;

    /// Exact, case-sensitive match; no trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "ip" => Ok(Self::Ip),
            "raw" => Ok(Self::Raw),
            other => Err(DnsdbError::InvalidFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for RDataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true iff `format` is exactly `name`, `ip` or `raw`.
#[must_use]
pub fn is_valid_rdata_format(format: &str) -> bool {
    format.parse::<RDataFormat>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_formats() {
        assert!(is_valid_rdata_format("name"));
        assert!(is_valid_rdata_format("ip"));
        assert!(is_valid_rdata_format("raw"));
    }

    #[test]
    fn test_invalid_formats() {
        for format in ["NAME", "", "ip ", " ip", "hostname", "Raw"] {
            assert!(!is_valid_rdata_format(format), "{format:?} accepted");
        }
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = "hostname".parse::<RDataFormat>().unwrap_err();
        assert!(matches!(err, DnsdbError::InvalidFormat(ref s) if s == "hostname"));
    }

    #[test]
    fn test_display_matches_path_segment() {
        assert_eq!(RDataFormat::Ip.to_string(), "ip");
        assert_eq!("raw".parse::<RDataFormat>().unwrap(), RDataFormat::Raw);
    }
}
