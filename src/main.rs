mod cli;
mod demo;

use anyhow::{Result, anyhow};
use tracing::Level;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("compare", matches)) => {
            let path = matches
                .get_one::<String>("INPUT")
                .ok_or_else(|| anyhow!("Bad INPUT"))?;
            demo::access_log::run(
                path,
                cli::get_precision(matches)?,
                matches.get_flag("parallel"),
                matches.get_flag("json"),
            )?;
        }
        Some(("synthetic", matches)) => {
            let precision = cli::get_precision(matches)?;
            demo::synthetic::run(
                cli::get_int_arg(matches, "count")?,
                cli::get_int_arg(matches, "duplicates")?,
                cli::get_int_arg(matches, "seed")?,
                precision,
            )?;
            if let Some(path) = matches.get_one::<String>("plot") {
                demo::synthetic::plot_accuracy(path)?;
            }
        }
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
