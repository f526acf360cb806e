use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trading_command_relay::{
    agent::{AgentSlot, TradingAgent},
    api::start_server,
    config::RelayConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚀 Trading Command Relay - API Server");
    info!("📍 Address: {}", config.bind_address());

    let agent = AgentSlot::from_init(TradingAgent::from_config(&config));
    match &agent {
        AgentSlot::Ready(agent) => {
            let model_info = agent.model_info();
            info!(
                model = %model_info.model,
                advanced_model = %model_info.advanced_model,
                "✅ Trading agent initialized"
            );
        }
        AgentSlot::Unavailable(reason) => {
            error!("Error initializing trading agent: {}", reason);
            eprintln!("⚠️  /process_command will answer 500 until the agent can be initialized");
            eprintln!("📌 Set GROQ_API_KEY in .env and restart");
        }
    }

    info!("📡 Starting API server...");

    start_server(agent, &config.bind_address()).await?;

    Ok(())
}
