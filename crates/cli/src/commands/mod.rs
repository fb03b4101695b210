//! CLI commands.

pub mod report;
pub mod scan;
pub mod serve;
pub mod trade;

use std::sync::Arc;

use anyhow::{Context, Result};

use senti_bot_core::{
    AppConfig, ConfigLoader, ContentSource, SentimentClassifier,
};
use senti_bot_data::{DatabaseClient, PaperTradeRepository, PostRepository, SignalRepository};
use senti_bot_signals::analyzer::{KeywordAnalyzer, LlmAnalyzer, LlmAnalyzerConfig};
use senti_bot_signals::collector::{RedditCollector, RedditCollectorConfig, StaticCollector};
use senti_bot_signals::ScanPipeline;

/// Loads configuration, optionally with a profile.
pub fn load_config(profile: Option<&str>) -> Result<AppConfig> {
    match profile {
        Some(profile) => ConfigLoader::load_with_profile(profile),
        None => ConfigLoader::load(),
    }
}

/// Repositories plus the scan pipeline, wired from config.
pub struct AppContext {
    pub posts: PostRepository,
    pub signals: SignalRepository,
    pub trades: PaperTradeRepository,
    pub pipeline: ScanPipeline,
}

/// Connects to the database, initializes the schema, and builds the pipeline.
///
/// With `demo` set, the pipeline uses canned posts and the keyword analyzer
/// so no network access or API key is needed.
pub async fn build_context(config: &AppConfig, demo: bool) -> Result<AppContext> {
    let db = DatabaseClient::new(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;
    db.init_schema().await?;

    let posts = PostRepository::new(db.pool());
    let signals = SignalRepository::new(db.pool());
    let trades = PaperTradeRepository::new(db.pool());

    let source: Arc<dyn ContentSource> = if demo {
        Arc::new(StaticCollector::new())
    } else {
        Arc::new(RedditCollector::new(
            RedditCollectorConfig::default().with_user_agent(config.reddit.user_agent.clone()),
        )?)
    };

    let classifier: Arc<dyn SentimentClassifier> =
        if !demo && config.classifier.provider == "llm" {
            let api_key = std::env::var("ANTHROPIC_API_KEY")
                .context("ANTHROPIC_API_KEY is required for the llm classifier")?;
            Arc::new(LlmAnalyzer::new(
                LlmAnalyzerConfig::new(api_key)
                    .with_api_url(config.classifier.api_url.clone())
                    .with_model(config.classifier.model.clone()),
            )?)
        } else {
            Arc::new(KeywordAnalyzer::new())
        };

    let pipeline = ScanPipeline::new(
        source,
        classifier,
        config.signal,
        config.reddit.clone(),
        config.classifier.max_posts_per_batch,
        posts.clone(),
        signals.clone(),
    );

    Ok(AppContext {
        posts,
        signals,
        trades,
        pipeline,
    })
}
