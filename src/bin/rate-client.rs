//! Budgeted quote client.
//!
//! Fetches the current USD/BRL bid from the rates service under a fixed
//! 300 ms budget and writes it to a file. The server's own 200 ms upstream
//! sub-budget nests inside this one; a server-side 408 and a locally
//! elapsed budget both count as a timeout here.

use std::path::PathBuf;

use clap::Parser;

use lookup_relay::error::LookupError;
use lookup_relay::rates::{self, CLIENT_BUDGET};

#[derive(Parser)]
#[command(name = "rate-client")]
#[command(about = "Fetch the current USD/BRL bid under a 300ms budget", long_about = None)]
struct Cli {
    /// Quote endpoint of the rates service.
    #[arg(short, long, default_value = "http://localhost:8082/cotacao")]
    url: String,

    /// File the bid is written to.
    #[arg(short, long, default_value = "cotacao.txt")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match rates::fetch_quote(&client, &cli.url, CLIENT_BUDGET).await {
        Ok(rate) => {
            let content = format!("Dólar: {}", rate.bid);
            std::fs::write(&cli.output, &content)?;
            println!("{}", content);
            println!("saved to {}", cli.output.display());
            Ok(())
        }
        Err(err @ LookupError::UpstreamTimeout { .. }) => {
            eprintln!("quote not available within {}ms: {err}", CLIENT_BUDGET.as_millis());
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("quote lookup failed: {err}");
            std::process::exit(1);
        }
    }
}
