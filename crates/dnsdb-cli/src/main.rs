//! dnsdb-query - DNSDB passive DNS lookups from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dnsdb_cli::run().await
}
