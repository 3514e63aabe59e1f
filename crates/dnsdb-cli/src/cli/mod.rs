//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use dnsdb::{RateLimiter, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration; only an explicitly named file has to exist
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(&PathBuf::from(shellexpand::tilde(path).as_ref()))?,
        None => Config::load()?,
    };

    // Flag/env first, then the config file
    let api_key = cli.api_key.or_else(|| config.api_key.clone());
    let server = cli
        .server
        .or_else(|| config.server.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // One quota tracker for every call this process makes
    let ctx = commands::Context {
        api_key,
        server,
        output_format,
        verbose: cli.verbose,
        limiter: Arc::new(RateLimiter::new()),
    };

    if cli.ratelimit {
        commands::ratelimit::execute(&ctx).await?;
    }

    match cli.command {
        Some(Commands::Rrset(args)) => commands::rrset::execute(&ctx, args).await,
        Some(Commands::Rdata(args)) => commands::rdata::execute(&ctx, args).await,
        Some(Commands::Ratelimit) => commands::ratelimit::execute(&ctx).await,
        None if cli.ratelimit => Ok(()),
        None => anyhow::bail!("no command given\n\nRun with --help to see available commands"),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "dnsdb_client=debug,dnsdb_cli=debug"
    } else {
        "dnsdb_client=warn,dnsdb_cli=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
