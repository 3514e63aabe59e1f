//! # dnsdb-cli
//!
//! Command-line interface for the DNSDB passive DNS API.
//!
//! ## Features
//!
//! - **rrset lookups**: every record set observed for an owner name
//! - **rdata lookups**: every owner name whose answer matched a name, IP or raw value
//! - **Quota status**: `--ratelimit` or the `ratelimit` command
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
