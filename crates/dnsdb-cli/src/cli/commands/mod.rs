//! Command implementations.

pub mod ratelimit;
pub mod rdata;
pub mod rrset;

use dnsdb::{DnsdbClient, RateLimiter};
use std::sync::Arc;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// DNSDB API key
    pub api_key: Option<String>,

    /// API server base URL
    pub server: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Quota tracker shared by every client this process builds
    pub limiter: Arc<RateLimiter>,
}

impl Context {
    /// Get the API key, returning an error if not set.
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "API key required.\n\n\
                 Set it with one of:\n  \
                 1. --api-key <KEY>\n  \
                 2. DNSDB_API_KEY environment variable\n  \
                 3. APIKEY = \"<KEY>\" in ~/.dnsdb-query.conf"
            )
        })
    }

    /// Create a DNSDB client with the configured API key and server.
    ///
    /// Plain HTTP is only allowed when the server was given as `http://`.
    pub fn client(&self) -> anyhow::Result<DnsdbClient> {
        let key = self.require_api_key()?;
        let client = DnsdbClient::builder(key)
            .base_url(&self.server)
            .https_only(!self.server.starts_with("http://"))
            .rate_limiter(self.limiter.clone())
            .build()?;
        Ok(client)
    }
}

/// Print the records a failed lookup did return, then hand back the error.
fn partial_failure<T>(
    what: &str,
    err: dnsdb::LookupError<T>,
    print: impl FnOnce(&[T]) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let (records, source) = err.into_parts();
    if !records.is_empty() {
        print(&records)?;
        eprintln!("{} records received before the error", records.len());
    }
    Err(anyhow::Error::new(source).context(format!("{what} query failed")))
}
