use airport_lookup::api_client::AirportLookupClient;
use airport_lookup::cli::{parse_args, CliArgs, Command, API_KEY_ENV};
use airport_lookup::config::Config;
use airport_lookup::record_display::record_table;
use airport_lookup::utils::logging::init_tracing;
use anyhow::Result;
use crossterm::style::Stylize;

fn print_help() {
    println!("{}", "Airport Lookup - ICAO location indicator client".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  airport-lookup [OPTIONS] icao <CODE>");
    println!("  airport-lookup [OPTIONS] iata <CODE>");
    println!("  airport-lookup [OPTIONS] lid <CODE> --authority FAA|TC");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}   - API key (overrides config)", "--api-key <KEY>".green());
    println!("  {}           - Show the record as a table", "--table".green());
    println!(
        "  {}      - Debug logging on stderr (added to RUST_LOG)",
        "-v, --verbose".green()
    );
    println!(
        "  {}     - Initialize configuration with wizard",
        "--init-config".green()
    );
    println!(
        "  {} - Print a config file with defaults",
        "--generate-config".green()
    );
    println!("  {}       - Show this help", "-h, --help".green());
    println!();
    println!(
        "The API key is taken from --api-key, then the config file, then {}.",
        API_KEY_ENV
    );
    println!();
}

fn lookup(cli: &CliArgs, request: &airport_lookup::cli::LookupRequest) -> Result<()> {
    let mut config = Config::load()?;
    crossterm::style::force_color_output(config.output.use_color);

    if let Some(log_path) = init_tracing(&config.logging, cli.verbose)? {
        tracing::info!(target: "airport_lookup", "Logging to {}", log_path.display());
    }

    if let Some(key) = &cli.api_key {
        config.api.api_key = Some(key.clone());
    } else if config.api.api_key.is_none() {
        config.api.api_key = std::env::var(API_KEY_ENV).ok();
    }

    let client = AirportLookupClient::from_config(&config)?;
    let record = request.run(&client)?;

    if cli.table || config.output.table {
        match record_table(&record) {
            Some(table) => println!("{table}"),
            None => {
                eprintln!(
                    "{}",
                    "Record is not a single JSON object, showing raw text".yellow()
                );
                println!("{record}");
            }
        }
    } else {
        println!("{record}");
    }

    Ok(())
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    match &cli.command {
        Command::Help => print_help(),
        Command::GenerateConfig => print!("{}", Config::create_default_with_comments()),
        Command::InitConfig => {
            Config::init_wizard()?;
        }
        Command::Lookup(request) => lookup(&cli, request)?,
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
