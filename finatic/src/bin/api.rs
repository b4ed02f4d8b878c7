use finatic::{api::start_server, llm::OpenAiChatModel, Config, Responder};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(|e| {
        error!("Startup aborted: {}", e);
        eprintln!("⚠️  {}", e);
        eprintln!("📌 Set OPENAI_API_KEY in the environment or in .env");
        e
    })?;

    info!("💸 Finatic - API Server");
    info!("📍 Port: {}", config.port);
    info!("🤖 Model: {}", config.openai_model);
    match config.request_timeout {
        Some(timeout) => info!("⏱️  Advisor timeout: {:?}", timeout),
        None => info!("⏱️  Advisor timeout: none"),
    }

    let model = Arc::new(OpenAiChatModel::from_config(&config)?);
    let responder = Arc::new(Responder::new(model));

    info!("✅ Responder initialized");
    info!("📡 Starting API server...");

    start_server(responder, config.port).await?;

    Ok(())
}
