use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use equiphelper_api::{
    config::Config,
    router,
    service::{AnswerService, AnswerSettings, HttpReferenceFetcher},
    state::AppState,
};
use equiphelper_llm::{ClientFactory, ProviderConfig};
use equiphelper_persist::TranscriptStoreBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    
    // Load configuration
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    
    // Initialize logging
    init_logging(&config);
    
    tracing::info!("Starting equipHelper answer service");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);
    
    // Initialize LLM client
    tracing::info!(model = %config.llm.model, "Initializing LLM client");
    let mut provider = ProviderConfig::openai(config.openai_api_key.clone());
    if let Some(base_url) = &config.llm.base_url {
        provider = provider.with_base_url(base_url.clone());
    }
    let llm_client = ClientFactory::create_chat_client(provider)?;
    
    // Reference data and transcripts
    let fetcher = Arc::new(HttpReferenceFetcher::new()?);
    tracing::info!(sources = ?config.reference.sources, "Reference sources configured");
    let store = TranscriptStoreBuilder::new()
        .ttl(config.store.ttl())
        .build()?;
    
    let answers = AnswerService::new(
        llm_client,
        fetcher,
        store,
        AnswerSettings::from(&config),
    );
    
    // Create application state
    let state = Arc::new(AppState::new(config.clone(), answers));
    
    // Build router
    let app = router(state);
    
    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api-docs/openapi.json", addr);
    
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    
    let registry = tracing_subscriber::registry().with(env_filter);
    
    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
