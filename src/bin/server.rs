//! verse-agent HTTP server binary.
//!
//! Loads the flattened verse corpus, wires the OpenAI completion provider
//! into the theme extractor, and serves the A2A endpoints.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8000)
//! - `VERSE_CORPUS_PATH` — Flattened corpus JSON (default: processed_bible_data.json)
//! - `AGENT_BASE_URL` — Public URL advertised on the agent card
//! - `OPENAI_API_KEY` — Completion provider key
//! - `OPENAI_ORGANIZATION` — Optional organization header for the provider
//! - `RUST_LOG` — Tracing filter (default: "info,verse_agent=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::sync::Arc;

use verse_agent::a2a::build_agent_card;
use verse_agent::server::{app_router, AppState};
use verse_agent::{AgentConfig, Corpus, OpenAICompletion, ThemeExtractor, VerseAgent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,verse_agent=debug".into()),
        )
        .init();

    let config = AgentConfig::from_env();

    // A missing or malformed corpus leaves the agent running in degraded mode.
    let corpus = Arc::new(Corpus::load_or_empty(&config.corpus_path));
    if corpus.is_empty() {
        tracing::warn!("Serving with an empty corpus; every request will receive an apology");
    }

    let provider = OpenAICompletion::new(
        config.model.clone(),
        config.api_key.clone(),
        Some(config.api_base_url.clone()),
    )
    .with_organization(config.organization.clone())
    .with_timeout(config.llm_timeout());
    if provider.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; every request will use a random verse");
    }

    let extractor = ThemeExtractor::new(Arc::new(provider))
        .with_timeout(config.llm_timeout())
        .with_temperature(config.temperature)
        .with_max_tokens(config.max_tokens);

    let agent = VerseAgent::new(corpus, extractor);
    let state = AppState::new(agent, build_agent_card(&config));
    let app = app_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!("verse-agent server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  POST /                        — JSON-RPC message/send");
    tracing::info!("  GET  /.well-known/agent.json  — agent card");
    tracing::info!("  GET  /health                  — liveness probe");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
