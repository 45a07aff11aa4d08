use anyhow::{Context, Result};

use shift_roster::config::{check_sales_target, CliConfig, ServerConfig};
use shift_roster::display::{print_averages, print_roster};
use shift_roster::export::write_roster_to_file;
use shift_roster::parser::load_records;
use shift_roster::schedule::generate_from_records;
use shift_roster::web;

const USAGE: &str = "\
Usage:
  shift-roster <history.csv> [--target N] [--departments]
               [--single-shift-per-day | --allow-double-shifts]
               [--out FILE] [--averages]
  shift-roster web [port]";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Check if we should run in web mode
    if args.first().map(String::as_str) == Some("web") {
        let config = ServerConfig::from_args(&args[1..]);
        println!("Starting web server on {}:{}...", config.bind, config.port);
        println!("Access the site at http://localhost:{}", config.port);

        web::start_server(config).await?;
        return Ok(());
    }

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let config = match CliConfig::from_args(&args) {
        Ok(config) => config,
        Err(message) => anyhow::bail!("{message}\n\n{USAGE}"),
    };
    check_sales_target(config.sales_target);

    println!("Loading history from {}...", config.input.display());
    let records = load_records(&config.input, config.options.department_aware)
        .with_context(|| format!("could not read {}", config.input.display()))?;
    println!("Loaded {} history rows", records.len());

    let report = generate_from_records(&records, config.sales_target, config.options)?;

    if config.show_averages {
        print_averages(&report.averages, config.options.department_aware);
    }
    print_roster(&report.roster);

    write_roster_to_file(&report.roster, &config.output)
        .with_context(|| format!("could not write {}", config.output.display()))?;
    println!("\nSchedule saved to {}", config.output.display());

    Ok(())
}
