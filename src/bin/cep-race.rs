//! Redundant postal-resolver race.
//!
//! Queries BrasilAPI and ViaCEP concurrently for the same postal code and
//! prints whichever answers first. Losing lookups are abandoned. The race
//! is bounded at one second overall.

use std::path::PathBuf;

use clap::Parser;

use lookup_relay::config;
use lookup_relay::observability::TraceContext;
use lookup_relay::postal::race::{fastest_address, RACE_BUDGET};
use lookup_relay::resilience::RaceOutcome;
use lookup_relay::upstream::{self, BrasilApiClient, ViaCepClient};

#[derive(Parser)]
#[command(name = "cep-race")]
#[command(about = "Race two postal-code resolvers, first success wins", long_about = None)]
struct Cli {
    /// Postal code to resolve (provider-native format, dashes allowed).
    cep: String,

    /// Optional TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured BrasilAPI base URL.
    #[arg(long)]
    brasilapi_url: Option<String>,

    /// Override the configured ViaCEP base URL.
    #[arg(long)]
    viacep_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let relay = config::load_config(cli.config.as_deref())?;

    let brasilapi_url = cli.brasilapi_url.unwrap_or(relay.postal.brasilapi_url);
    let viacep_url = cli.viacep_url.unwrap_or(relay.postal.viacep_url);

    let http = upstream::http_client();
    let brasilapi = BrasilApiClient::new(http.clone(), brasilapi_url);
    let viacep = ViaCepClient::new(http, viacep_url);
    let trace = TraceContext::new();

    match fastest_address(brasilapi, viacep, trace, cli.cep, RACE_BUDGET).await {
        RaceOutcome::Won((provider, address)) => {
            println!("{provider} answered first");
            println!("CEP: {}", address.cep);
            println!("Street: {}", address.street);
            println!("Neighborhood: {}", address.neighborhood);
            println!("City: {}", address.city);
            println!("State: {}", address.state);
        }
        RaceOutcome::AllFailed => {
            eprintln!("both resolvers failed");
            std::process::exit(1);
        }
        RaceOutcome::TimedOut => {
            eprintln!("no resolver answered within {}ms", RACE_BUDGET.as_millis());
            std::process::exit(1);
        }
    }

    Ok(())
}
