use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use ip_cardinality::comparison::DEFAULT_PRECISION;
use std::str::FromStr;

pub fn build_cli() -> Command {
    Command::new("ip-cardinality")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Count unique IPv4 addresses exactly and with HyperLogLog")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more (repeat for debug output)"),
        )
        .subcommand(compare_command())
        .subcommand(synthetic_command())
}

fn compare_command() -> Command {
    let compare_command = Command::new("compare")
        .about("Compare exact and approximate unique counts over a JSON-lines access log")
        .arg(
            Arg::new("INPUT")
                .help("Access log with one JSON object per line")
                .required(true),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Build the sketch on all cores and merge the partial sketches"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the report as JSON instead of a table"),
        );
    add_precision_option(compare_command)
}

fn synthetic_command() -> Command {
    let synthetic_command = Command::new("synthetic")
        .about("Run the comparison over generated IPv4 addresses")
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .default_value("10000")
                .help("Number of distinct addresses to generate"),
        )
        .arg(
            Arg::new("duplicates")
                .long("duplicates")
                .default_value("1")
                .help("How many times each address appears in the input"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .default_value("0")
                .help("Seed for the address generator"),
        )
        .arg(
            Arg::new("plot")
                .long("plot")
                .value_name("FILE")
                .help("Also draw estimate-vs-n curves for several precisions to this PNG"),
        );
    add_precision_option(synthetic_command)
}

fn add_precision_option(command: Command) -> Command {
    command.arg(
        Arg::new("precision")
            .short('p')
            .long("precision")
            .value_name("P")
            .help("Sketch precision; the sketch keeps 2^P registers [default: 14]"),
    )
}

pub fn get_int_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Result<T> {
    let display_key = key.replace('_', "-");
    matches
        .get_one::<String>(key)
        .ok_or_else(|| anyhow!("Bad {}", display_key))?
        .parse::<T>()
        .map_err(|_| anyhow!("{} must be a positive integer", display_key))
}

pub fn get_precision(matches: &ArgMatches) -> Result<u8> {
    if matches.contains_id("precision") {
        get_int_arg::<u8>(matches, "precision")
    } else {
        Ok(DEFAULT_PRECISION)
    }
}
