//! VedicUtsav assistant server entry point.
//!
//! Loads configuration, wires the Gemini client into the chat and generation
//! components, and serves the HTTP API until the process is stopped.

use std::sync::Arc;

use utsav_assistant::{
    api::{router, AppState},
    config::load_config,
    gemini_api::{GeminiClient, ModelClient},
    generate::ContentGenerator,
    leads::{LeadStore, SupabaseLeadStore},
    pipeline::ReplyPipeline,
};

#[tokio::main]
async fn main() {
    // Structured logging; RUST_LOG overrides, INFO by default.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Please check your .env file. See .env.example for the variables.");
            std::process::exit(1);
        }
    };

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; chat and generation requests will fail");
    }
    if config.supabase_url.is_none() || config.supabase_anon_key.is_none() {
        tracing::warn!("Supabase is not configured; lead submissions will fail");
    }

    let bind_addr = config.bind_addr.clone();
    tracing::info!(
        model = %config.gemini_model,
        fallback_model = ?config.gemini_fallback_model,
        endpoint = %config.gemini_base_url,
        "assistant starting"
    );

    let leads: Arc<dyn LeadStore> = match SupabaseLeadStore::new(&config) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Initialisation error: {}", e);
            std::process::exit(1);
        }
    };

    let client: Arc<dyn ModelClient> = match GeminiClient::new(config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Initialisation error: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        pipeline: ReplyPipeline::new(Arc::clone(&client)),
        generator: ContentGenerator::new(client),
        leads,
    };

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %bind_addr, "listening");

    if let Err(e) = axum::serve(listener, router(state)).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
