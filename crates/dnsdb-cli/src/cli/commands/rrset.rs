//! `dnsdb-query rrset` - Record sets by owner name.

use anyhow::Result;
use colored::Colorize;
use dnsdb::RRSetRecord;
use tabled::{settings::Style, Table, Tabled};

use super::{partial_failure, Context};
use crate::cli::args::RrsetArgs;
use crate::output::{time_cell, write_csv, OutputFormat};

const CSV_HEADER: [&str; 9] = [
    "count",
    "time_first",
    "time_last",
    "zone_time_first",
    "zone_time_last",
    "bailiwick",
    "rrtype",
    "rrname",
    "rdata",
];

#[derive(Tabled, Debug, PartialEq, Eq)]
struct RrsetRow {
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
    #[tabled(rename = "Bailiwick")]
    bailiwick: String,
    #[tabled(rename = "Type")]
    rrtype: String,
    #[tabled(rename = "Name")]
    rrname: String,
    #[tabled(rename = "Data")]
    rdata: String,
}

impl From<&RRSetRecord> for RrsetRow {
    fn from(r: &RRSetRecord) -> Self {
        Self {
            count: r.count,
            time_first: time_cell(r.time_first),
            time_last: time_cell(r.time_last),
            zone_time_first: time_cell(r.zone_time_first),
            zone_time_last: time_cell(r.zone_time_last),
            bailiwick: r.bailiwick.clone(),
            rrtype: r.rrtype.clone(),
            rrname: r.rrname.clone(),
            rdata: r.rdata.join(", "),
        }
    }
}

fn csv_row(r: &RRSetRecord) -> Vec<String> {
    vec![
        r.count.to_string(),
        r.time_first.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.time_last.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.zone_time_first.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.zone_time_last.map(|t| t.unix().to_string()).unwrap_or_default(),
        r.bailiwick.clone(),
        r.rrtype.clone(),
        r.rrname.clone(),
        r.rdata.join(";"),
    ]
}

pub async fn execute(ctx: &Context, args: RrsetArgs) -> Result<()> {
    let client = ctx.client()?;

    let mut builder = client.lookup().rrset(&args.query);

    if let Some(rrtype) = &args.rrtype {
        builder = builder.rrtype(rrtype);
    }

    if let Some(zone) = &args.bailiwick {
        builder = builder.bailiwick(zone);
    }

    if let Some(limit) = args.limit {
        builder = builder.limit(limit);
    }

    match builder.send().await {
        Ok(records) => print(ctx, &args, &records),
        Err(err) => partial_failure("rrset", err, |records| print(ctx, &args, records)),
    }
}

fn print(ctx: &Context, args: &RrsetArgs, records: &[RRSetRecord]) -> Result<()> {
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
                println!("{} {}", "No records for".dimmed(), args.query.cyan());
                return Ok(());
            }

            let rows: Vec<RrsetRow> = records.iter().map(RrsetRow::from).collect();
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

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RRSetRecord {
        serde_json::from_str(
            r#"{"count":87,"zone_time_first":1271809855,"rrname":"example.com.","rrtype":"NS","bailiwick":"com.","rdata":["a.iana-servers.net.","b.iana-servers.net."]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_row_joins_rdata_and_blanks_missing_times() {
        let row = RrsetRow::from(&record());
        assert_eq!(row.count, 87);
        assert_eq!(row.time_first, "");
        assert_eq!(row.zone_time_first, "2010-04-21 00:30:55 UTC");
        assert_eq!(row.rdata, "a.iana-servers.net., b.iana-servers.net.");
    }

    #[test]
    fn test_csv_row_uses_epochs() {
        let row = csv_row(&record());
        assert_eq!(row.len(), CSV_HEADER.len());
        assert_eq!(row[3], "1271809855");
        assert_eq!(row[8], "a.iana-servers.net.;b.iana-servers.net.");
    }
}
