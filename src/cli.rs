//! Argument handling for the `airport-lookup` binary.

use anyhow::{anyhow, bail, Result};

use crate::api::{Authority, LookupError};
use crate::api_client::AirportLookupClient;

/// Environment variable consulted when no key is given on the command line
/// or in the config file.
pub const API_KEY_ENV: &str = "AIRPORT_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Icao(String),
    Iata(String),
    Lid { code: String, authority: Authority },
}

impl LookupRequest {
    pub fn run(&self, client: &AirportLookupClient) -> Result<String, LookupError> {
        match self {
            LookupRequest::Icao(code) => client.find_by_icao(code),
            LookupRequest::Iata(code) => client.find_by_iata(code),
            LookupRequest::Lid { code, authority } => client.find_by_lid(code, *authority),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lookup(LookupRequest),
    InitConfig,
    GenerateConfig,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub api_key: Option<String>,
    pub table: bool,
    pub verbose: bool,
}

/// Options that consume the following argument
const VALUE_FLAGS: [&str; 2] = ["--api-key", "--authority"];

fn flag_value(args: &[String], flag: &str) -> Result<Option<String>> {
    match args.iter().position(|arg| arg == flag) {
        Some(pos) => args
            .get(pos + 1)
            .filter(|value| !value.starts_with("--"))
            .cloned()
            .map(Some)
            .ok_or_else(|| anyhow!("{} needs a value", flag)),
        None => Ok(None),
    }
}

fn positionals(args: &[String]) -> Vec<&String> {
    let mut found = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with('-') {
            found.push(arg);
        }
    }
    found
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let has = |flag: &str| args.iter().any(|arg| arg == flag);

    let api_key = flag_value(args, "--api-key")?;
    let table = has("--table");
    let verbose = has("-v") || has("--verbose");

    let command = if has("--help") || has("-h") || args.is_empty() {
        Command::Help
    } else if has("--init-config") {
        Command::InitConfig
    } else if has("--generate-config") {
        Command::GenerateConfig
    } else {
        let positional = positionals(args);
        let (kind, code) = match positional.as_slice() {
            [kind, code] => (kind.to_lowercase(), (*code).clone()),
            [kind] => bail!("Missing airport code after '{}'", kind),
            [] => bail!("Missing lookup type (icao, iata or lid)"),
            _ => bail!("Too many arguments"),
        };

        let request = match kind.as_str() {
            "icao" => LookupRequest::Icao(code),
            "iata" => LookupRequest::Iata(code),
            "lid" => {
                let authority = flag_value(args, "--authority")?
                    .ok_or_else(|| anyhow!("lid lookups need --authority FAA|TC"))?
                    .parse::<Authority>()?;
                LookupRequest::Lid { code, authority }
            }
            other => bail!("Unknown lookup type '{}'", other),
        };
        Command::Lookup(request)
    };

    Ok(CliArgs {
        command,
        api_key,
        table,
        verbose,
    })
}
