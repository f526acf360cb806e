use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trading_command_relay::{agent::TradingAgent, config::RelayConfig, models::PageContext};

/// Run a single command through the trading agent and print the result
#[derive(Debug, Parser)]
#[command(name = "relay", version)]
struct Cli {
    /// Natural-language command, e.g. "show me watchlist"
    command: String,

    /// Page context as a JSON object
    #[arg(long)]
    context: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let page_context: Option<PageContext> = cli
        .context
        .as_deref()
        .map(|raw| serde_json::from_str::<PageContext>(raw))
        .transpose()?;

    let agent = TradingAgent::from_config(&config)?;

    info!(command = %cli.command, "Running command");

    let response = agent.process_command(&cli.command, page_context.as_ref()).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
