use clap::{Parser, Subcommand};
use oracle::{FailoverOracle, PriceOracle};
use tracing_subscriber::EnvFilter;

/// A paper-trading backend: buy stock from a simulated market and resell it
/// peer-to-peer to other registered accounts.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the trading API server.
    Serve(ServeArgs),
    /// Print the current quote for a symbol and exit.
    Quote(QuoteArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the bind address from the configuration (e.g., "0.0.0.0:8080").
    #[arg(long)]
    addr: Option<String>,
}

#[derive(Parser)]
struct QuoteArgs {
    /// The stock symbol to quote (e.g., "AAPL").
    symbol: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (PAPERTRADE_ORACLE__API_KEY etc.) from a .env file, if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut settings = configuration::load_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            if let Some(addr) = args.addr {
                settings.server.bind_addr = addr;
            }
            web_server::run_server(settings).await
        }
        Commands::Quote(args) => {
            let oracle = FailoverOracle::from_settings(&settings.oracle);
            let quote = oracle.quote(&args.symbol).await?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
            Ok(())
        }
    }
}
