//! `dnsdb-query rdata` - Records by answer data.

use anyhow::Result;
use colored::Colorize;
use dnsdb::RDataRecord;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use super::{partial_failure, Context};
use crate::cli::args::RdataArgs;
use crate::output::{time_cell, write_csv, OutputFormat};

const CSV_HEADER: [&str; 8] = [
    "count",
    "time_first",
    "time_last",
    "zone_time_first",
    "zone_time_last",
    "rrtype",
    "rrname",
    "rdata",
];

#[derive(Tabled)]
struct RdataRow {
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "First Seen")]
    time_first: String,
    #[tabled(rename = "Last Seen")]
    time_last: String,
    #[tabled(rename = "Zone First")]
    zone_time_first: String,
    #[tabled(rename = "Zone Last")]
    zone_time_last: String,
    #[tabled(rename = "Type")]
    rrtype: String,
    #[tabled(rename = "Name")]
    rrname: String,
    #[tabled(rename = "Data")]
    rdata: String,
}

impl From<&RDataRecord> for RdataRow {
    fn from(r: &RDataRecord) -> Self {
        Self {
            count: r.count,
            time_first: time_cell(r.time_first),
            time_last: time_cell(r.time_last),
            zone_time_first: time_cell(r.zone_time_first),
            zone_time_last: time_cell(r.zone_time_last),
            rrtype: r.rrtype.clone(),
            rrname: r.rrname.clone(),
            rdata: r.rdata.clone(),
        }
    }
}

fn csv_row(r: &RDataRecord) -> Vec<String> {
    vec![
        r.count.to_string(),
        r.time_first.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.time_last.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.zone_time_first.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.zone_time_last.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.rrtype.clone(),
        r.rrname.clone(),
        r.rdata.clone(),
    ]
}

pub async fn execute(ctx: &Context, args: RdataArgs) -> Result<()> {
    let client = ctx.client()?;
    let query = args.query.trim();
    debug!(query, format = %args.format, "rdata lookup");

    let mut builder = client.lookup().rdata(query, &args.format);

    if let Some(rrtype) = &args.rrtype {
        builder = builder.rrtype(rrtype);
    }

    if let Some(limit) = args.limit {
        builder = builder.limit(limit);
    }

    match builder.send().await {
        Ok(records) => print(ctx, query, &records),
        Err(err) => partial_failure("rdata", err, |records| print(ctx, query, records)),
    }
}

fn print(ctx: &Context, query: &str, records: &[RDataRecord]) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(records)?);
        }
        OutputFormat::Csv => {
            write_csv(std::io::stdout().lock(), &CSV_HEADER, records.iter().map(csv_row))?;
        }
        OutputFormat::Pretty => {
            if records.is_empty() {
                println!("{} {}", "No records for".dimmed(), query.cyan());
                return Ok(());
            }

            let rows: Vec<RdataRow> = records.iter().map(RdataRow::from).collect();
            let table = Table::new(&rows).with(Style::rounded()).to_string();
            println!("{}", table);

            if ctx.verbose {
                println!();
                println!("{} {}", "Records:".bold(), records.len().to_string().cyan());
            }
        }
    }

    Ok(())
}
