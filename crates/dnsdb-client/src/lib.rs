//! HTTP client for the DNSDB passive DNS API.
//!
//! This crate provides the main [`DnsdbClient`], the [`RateLimiter`] that
//! gates it, and [`RecordStream`] for decoding newline-delimited lookup
//! results.

#![doc(html_root_url = "https://docs.rs/dnsdb-client/0.2.0")]

mod client;
mod rate_limit;
mod stream;
pub mod api;

pub use client::{DnsdbClient, DnsdbClientBuilder, DEFAULT_BASE_URL};
pub use dnsdb_core::{DnsdbError, LookupError, LookupResult, Result};
pub use rate_limit::{RateLimiter, LIMIT_HEADER, REMAINING_HEADER};
pub use stream::RecordStream;
