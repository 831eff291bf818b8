//! HTTP API server for the knowledge base.

pub mod routes;

use crate::embedding::Embedder;
use crate::metrics::MetricsCollector;
use crate::retriever::Retriever;
use std::sync::{Arc, Mutex};

/// Shared application state for the HTTP server.
///
/// The retriever sits behind a single exclusive lock: inserts and searches
/// never overlap, so a search cannot observe a half-applied batch.
pub struct AppState<E: Embedder> {
    pub retriever: Mutex<Retriever<E>>,
    pub metrics: Mutex<MetricsCollector>,
    /// Default number of results for `/search`
    pub top_k: usize,
}

impl<E: Embedder> AppState<E> {
    pub fn new(retriever: Retriever<E>, top_k: usize) -> Self {
        Self {
            retriever: Mutex::new(retriever),
            metrics: Mutex::new(MetricsCollector::new()),
            top_k,
        }
    }
}

/// Start the HTTP server around an already populated retriever.
pub async fn start<E: Embedder + 'static>(
    addr: &str,
    retriever: Retriever<E>,
    top_k: usize,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(retriever, top_k));

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
