//! Core types and errors for the DNSDB passive DNS API client.
//!
//! This crate provides the foundational types used across the dnsdb crates:
//!
//! - **Types**: Strongly-typed records returned by the lookup endpoints
//! - **Formats**: [`RDataFormat`] and [`is_valid_rdata_format`]
//! - **Errors**: [`DnsdbError`] and the partial-result carrier [`LookupError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use dnsdb_core::{RRSetRecord, Result};
//!
//! fn print_rrset(record: &RRSetRecord) -> Result<()> {
//!     println!("{} {} {:?}", record.rrname, record.rrtype, record.rdata);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/dnsdb-core/0.2.0")]

mod error;
mod format;
pub mod types;

pub use error::{DnsdbError, LookupError, LookupResult, Result};
pub use format::{is_valid_rdata_format, RDataFormat};
pub use types::*;
