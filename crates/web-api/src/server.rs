use crate::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use senti_bot_core::SizingConfig;
use senti_bot_data::{PaperTradeRepository, PostRepository, SignalRepository};
use senti_bot_signals::ScanPipeline;

/// Shared state for all handlers.
pub struct AppState {
    pub pipeline: ScanPipeline,
    pub posts: PostRepository,
    pub signals: SignalRepository,
    pub trades: PaperTradeRepository,
    pub sizing: SizingConfig,
}

pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    #[must_use]
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/health", get(handlers::health))
            .route("/api/stats", get(handlers::get_stats))
            .route("/api/signals", get(handlers::get_signals))
            .route("/api/posts", get(handlers::get_posts))
            .route("/api/trades", get(handlers::get_trades))
            .route("/api/trades", post(handlers::open_trade))
            .route("/api/trades/:trade_id/close", post(handlers::close_trade))
            .route("/api/scan", post(handlers::trigger_scan))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the web server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve
    /// requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Web API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
