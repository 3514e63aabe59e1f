//! `dnsdb-query ratelimit` - Quota of the API key.

use anyhow::Result;
use colored::Colorize;
use dnsdb::RateLimitStatus;

use super::Context;
use crate::output::{time_cell, write_csv, OutputFormat};

pub async fn execute(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client.rate_limit_query().await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&status)?);
        }
        OutputFormat::Csv => {
            let reset = status.reset.map(|t| t.unix().to_string()).unwrap_or_default();
            write_csv(
                std::io::stdout().lock(),
                &["limit", "remaining", "reset"],
                [vec![status.limit.to_string(), status.remaining.to_string(), reset]],
            )?;
        }
        OutputFormat::Pretty => print_pretty(&status),
    }

    Ok(())
}

fn print_pretty(status: &RateLimitStatus) {
    let remaining = match status.remaining.count() {
        Some(n) if n <= 0 => status.remaining.to_string().red(),
        Some(n) if n < 100 => status.remaining.to_string().yellow(),
        _ => status.remaining.to_string().green(),
    };

    println!("{}      {}", "Limit:".bold(), status.limit);
    println!("{}  {}", "Remaining:".bold(), remaining);
    let reset = match status.reset {
        Some(_) => time_cell(status.reset),
        None => "n/a".to_string(),
    };
    println!("{}      {}", "Reset:".bold(), reset);
}
