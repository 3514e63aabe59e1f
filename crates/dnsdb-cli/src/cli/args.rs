//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use crate::output::OutputFormat;

/// Query the DNSDB passive DNS database
///
/// Look up the record sets observed for a name, or the names that pointed
/// at a given answer.
///
/// The API key is read from --api-key, DNSDB_API_KEY, or the APIKEY entry
/// of the config file (~/.dnsdb-query.conf).
#[derive(Parser, Debug)]
#[command(name = "dnsdb-query")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// DNSDB API server to connect to [default: https://api.dnsdb.info]
    #[arg(short, long, env = "DNSDB_SERVER", global = true)]
    pub server: Option<String>,

    /// Path to config file [default: ~/.dnsdb-query.conf]
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// DNSDB API key (or set DNSDB_API_KEY env var)
    #[arg(short = 'k', long, env = "DNSDB_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Print current rate limit data
    #[arg(short, long, global = true)]
    pub ratelimit: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up record sets by owner name
    Rrset(RrsetArgs),

    /// Look up records by answer data
    Rdata(RdataArgs),

    /// Show the quota of the API key
    Ratelimit,
}

// ============================================================================
// rrset command
// ============================================================================

#[derive(Args, Debug)]
pub struct RrsetArgs {
    /// Owner name to look up (wildcards like *.example.com allowed)
    #[arg(short, long)]
    pub query: String,

    /// Only this record type (A, NS, MX, ...)
    #[arg(short = 't', long)]
    pub rrtype: Option<String>,

    /// Only records observed under this zone
    #[arg(short, long)]
    pub bailiwick: Option<String>,

    /// Maximum number of records to return
    #[arg(short, long)]
    pub limit: Option<u64>,
}

// ============================================================================
// rdata command
// ============================================================================

#[derive(Args, Debug)]
pub struct RdataArgs {
    /// Answer data to look up
    #[arg(short, long)]
    pub query: String,

    /// Specify rdata format (name|ip|raw)
    #[arg(short, long)]
    pub format: String,

    /// Only this record type
    #[arg(short = 't', long)]
    pub rrtype: Option<String>,

    /// Maximum number of records to return
    #[arg(short, long)]
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rdata() {
        let cli = Cli::try_parse_from([
            "dnsdb-query", "-r", "rdata", "-q", " 1.2.3.4 ", "-f", "ip", "-l", "5",
        ])
        .unwrap();
        assert!(cli.ratelimit);
        match cli.command {
            Some(Commands::Rdata(args)) => {
                assert_eq!(args.query, " 1.2.3.4 ");
                assert_eq!(args.format, "ip");
                assert_eq!(args.limit, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dnsdb-query", "rrset", "-q", "example.com", "-t", "NS", "-o", "json",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Some(Commands::Rrset(RrsetArgs { ref rrtype, .. })) if rrtype.as_deref() == Some("NS")
        ));
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["dnsdb-query", "rrset"]).is_err());
    }

    #[test]
    fn test_rdata_format_is_required() {
        let err = Cli::try_parse_from(["dnsdb-query", "rdata", "-q", "1.2.3.4"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
