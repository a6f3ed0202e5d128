use std::sync::Arc;

use clap::Parser;

use scout_core::capability::{Delegate, Search};
use scout_engine::search::SerperSearch;
use scout_llm::GeminiDelegate;
use scout_server::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "scout", about = "Two-stage research assistant server")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 8787)]
    port: u16,

    /// Model name override (defaults to SCOUT_MODEL, then the registry
    /// default).
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    tracing::info!("Starting Scout server");

    // Capability handles live for the process lifetime.
    let gemini = GeminiDelegate::from_env(args.model.as_deref())
        .expect("Failed to configure delegate (is GEMINI_API_KEY set?)");
    tracing::info!(model = gemini.model(), "Delegate configured");
    let delegate: Arc<dyn Delegate> = Arc::new(gemini);

    let search: Arc<dyn Search> = Arc::new(
        SerperSearch::from_env().expect("Failed to configure search (is SERPER_API_KEY set?)"),
    );

    let config = ServerConfig { port: args.port };
    let handle = scout_server::start(config, delegate, search)
        .await
        .expect("Failed to start server");

    tracing::info!(port = handle.port, "Scout ready");

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for ctrl+c");

    tracing::info!("Shutting down");
}
