//! Serve command: start the REST API.

use anyhow::Result;
use std::sync::Arc;

use senti_bot_core::AppConfig;
use senti_bot_web_api::{ApiServer, AppState};

use super::build_context;

/// Starts the web API. The scan endpoint uses the configured source and
/// classifier, never the demo fixtures.
pub async fn run(config: &AppConfig, addr: Option<String>) -> Result<()> {
    let ctx = build_context(config, false).await?;

    let state = Arc::new(AppState {
        pipeline: ctx.pipeline,
        posts: ctx.posts,
        signals: ctx.signals,
        trades: ctx.trades,
        sizing: config.sizing.clone(),
    });

    let addr = addr.unwrap_or_else(|| format!("{}:{}", config.server.host, config.server.port));
    ApiServer::new(state).serve(&addr).await
}
