use anyhow::{Context, Result};
use ip_cardinality::access_log::read_ipv4_addresses;
use ip_cardinality::comparison::{self, ComparisonReport};
use tracing::{info, warn};

pub fn run(path: &str, precision: u8, parallel: bool, json: bool) -> Result<()> {
    let (addresses, stats) =
        read_ipv4_addresses(path).with_context(|| format!("unable to read '{}'", path))?;
    if stats.accepted == 0 {
        warn!(path, lines = stats.lines, "no IPv4 addresses found");
    }

    info!(items = addresses.len(), precision, parallel, "counting unique addresses");
    let report = if parallel {
        comparison::compare_parallel(&addresses, precision)?
    } else {
        comparison::compare(&addresses, precision)?
    };

    print_report(&report, json)
}

pub fn print_report(report: &ComparisonReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
