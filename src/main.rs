mod blob;
mod config;
mod error;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use blob::BlobStore;
use blob::fs::FsBlobStore;
use blob::memory::MemoryBlobStore;
use config::{BlobBackend, Config};
use llm::types::LlmChat;
use llm::LlmClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let blobs: Arc<dyn BlobStore> = match config.blob_backend {
        BlobBackend::Fs => Arc::new(
            FsBlobStore::open(&config.blob_dir, &config.blob_public_base_url)
                .await
                .expect("blob directory init failed"),
        ),
        BlobBackend::Memory => Arc::new(MemoryBlobStore::new(&config.blob_public_base_url)),
    };

    let llm: Option<Arc<dyn LlmChat>> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client unavailable; AI generation disabled");
            None
        }
    };

    let state = state::AppState::new(blobs, llm)
        .with_llm_max_tokens(config.llm_max_tokens)
        .with_static_dir(config.static_dir.clone());
    let app = routes::site(state, &config);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, backend = ?config.blob_backend, "proxa listening");
    axum::serve(listener, app).await.expect("server failed");
}
