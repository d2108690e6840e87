//! Deadline-bounded lookup relay.
//!
//! Three small HTTP services sharing one orchestration core:
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │                 LOOKUP RELAY                 │
//!                   │                                              │
//!   POST / {cep}    │  ┌─────────┐  relays   ┌───────────────────┐ │
//!   ────────────────┼─▶│ gateway │──────────▶│ weather chain     │ │
//!                   │  └─────────┘           │ cep → city → temp │ │
//!                   │                        └───────────────────┘ │
//!   GET /cotacao    │  ┌───────────────────────────────┐           │
//!   ────────────────┼─▶│ rates (200ms upstream budget, │           │
//!                   │  │ 10ms shielded history write)  │           │
//!                   │  └───────────────────────────────┘           │
//!                   │                                              │
//!                   │  ┌────────────────────────────────────────┐  │
//!                   │  │          Cross-Cutting Concerns        │  │
//!                   │  │  config · observability · resilience   │  │
//!                   │  │  (budget / bounded / race / gate)      │  │
//!                   │  └────────────────────────────────────────┘  │
//!                   └──────────────────────────────────────────────┘
//! ```
//!
//! Each subcommand runs one service; the postal-provider race ships as the
//! separate `cep-race` binary, the budgeted quote client as `rate-client`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use lookup_relay::config;
use lookup_relay::http;
use lookup_relay::lifecycle::Shutdown;
use lookup_relay::observability;

#[derive(Parser)]
#[command(name = "lookup-relay")]
#[command(about = "Deadline-bounded lookup services", long_about = None)]
struct Cli {
    /// Optional TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    service: Service,
}

#[derive(Subcommand)]
enum Service {
    /// Run the validating gateway in front of the weather chain.
    Gateway,
    /// Run the weather chain service.
    Weather,
    /// Run the rate lookup service.
    Rates,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    observability::logging::init(&config.observability);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let (name, bind_address, router) = match cli.service {
        Service::Gateway => (
            "gateway",
            config.gateway.bind_address.clone(),
            http::gateway::router(&config.gateway),
        ),
        Service::Weather => (
            "weather",
            config.weather.bind_address.clone(),
            http::weather::router(&config.weather),
        ),
        Service::Rates => (
            "rates",
            config.rates.bind_address.clone(),
            http::rates::router(&config.rates)?,
        ),
    };

    tracing::info!(service = name, bind_address = %bind_address, "configuration loaded");

    let listener = TcpListener::bind(&bind_address).await?;
    http::serve(listener, http::with_middleware(router), shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
