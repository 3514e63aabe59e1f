//! Rust client for the DNSDB passive DNS API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dnsdb::DnsdbClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DnsdbClient::new("your-api-key")?;
//!
//!     // Quota of the key
//!     let status = client.rate_limit_query().await?;
//!     println!("{} of {} queries left", status.remaining, status.limit);
//!
//!     // Every rrset seen for a name
//!     for record in client.rrset_query("example.com").await? {
//!         println!("{} {} {:?}", record.rrname, record.rrtype, record.rdata);
//!     }
//!
//!     // At most 100 names that pointed at an address
//!     let records = client
//!         .lookup()
//!         .rdata("93.184.216.34", "ip")
//!         .limit(100)
//!         .send()
//!         .await?;
//!     println!("{} names", records.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! Lookups that fail part way return the records decoded so far in
//! [`LookupError::records`].
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/dnsdb/0.2.0")]

// Re-export core types
pub use dnsdb_core::*;

// Re-export client
pub use dnsdb_client::{
    api, DnsdbClient, DnsdbClientBuilder, RateLimiter, RecordStream, DEFAULT_BASE_URL,
    LIMIT_HEADER, REMAINING_HEADER,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
