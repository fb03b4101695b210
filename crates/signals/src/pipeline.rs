//! Scan pipeline: content source -> classifier -> aggregation -> signals.
//!
//! One scan fetches posts from the configured channels, classifies them,
//! persists the classified posts (deduplicated by post id at the repo), runs
//! batch signal generation, and persists the signals under an hour-bucket
//! idempotency key.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use senti_bot_core::{
    ContentSource, RedditConfig, SentimentClassifier, SentimentRecord, Signal, SignalConfig,
};
use senti_bot_data::{PostRepository, SignalRepository};

use crate::generator::SignalBatchGenerator;

/// Outcome of one scan, serialized as-is by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Raw posts fetched across all channels.
    pub posts_fetched: usize,
    /// Posts successfully classified into records.
    pub posts_classified: usize,
    /// Newly stored posts (duplicates excluded).
    pub posts_stored: u64,
    /// Signals generated this scan.
    pub signals_generated: usize,
    /// Signals actually stored (dedup key collisions excluded).
    pub signals_stored: usize,
    /// The generated signals.
    pub signals: Vec<Signal>,
}

/// Orchestrates one scan end to end.
pub struct ScanPipeline {
    source: Arc<dyn ContentSource>,
    classifier: Arc<dyn SentimentClassifier>,
    generator: SignalBatchGenerator,
    reddit: RedditConfig,
    max_posts_per_batch: usize,
    posts: PostRepository,
    signals: SignalRepository,
}

impl ScanPipeline {
    #[must_use]
    pub fn new(
        source: Arc<dyn ContentSource>,
        classifier: Arc<dyn SentimentClassifier>,
        signal_config: SignalConfig,
        reddit: RedditConfig,
        max_posts_per_batch: usize,
        posts: PostRepository,
        signals: SignalRepository,
    ) -> Self {
        Self {
            source,
            classifier,
            generator: SignalBatchGenerator::new(signal_config),
            reddit,
            max_posts_per_batch,
            posts,
            signals,
        }
    }

    /// Runs one scan across all configured channels.
    ///
    /// A classifier failure on a single post is logged and the post skipped;
    /// a content-source failure for a channel aborts the scan.
    ///
    /// # Errors
    /// Returns an error if fetching or persistence fails.
    pub async fn run_scan(&self) -> Result<ScanReport> {
        let mut raw_posts = Vec::new();
        for channel in &self.reddit.channels {
            let posts = self
                .source
                .fetch_posts(channel, self.reddit.max_posts_per_scan)
                .await?;
            raw_posts.extend(posts);
        }
        let posts_fetched = raw_posts.len();

        // Bound classification per scan to cap API cost.
        raw_posts.truncate(self.max_posts_per_batch);

        let mut records: Vec<SentimentRecord> = Vec::with_capacity(raw_posts.len());
        for post in &raw_posts {
            if post.is_empty() {
                continue;
            }
            let analysis = match self.classifier.classify(post).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    tracing::warn!(post_id = %post.id, error = %e, "classification failed, skipping post");
                    continue;
                }
            };
            match SentimentRecord::from_analysis(post, &analysis) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(post_id = %post.id, error = %e, "classifier verdict rejected");
                }
            }
        }
        let posts_classified = records.len();

        let posts_stored = self.posts.insert_batch(&records).await?;

        let signals: Vec<Signal> = self
            .generator
            .generate(&records, None)
            .into_iter()
            .map(|s| {
                let key = s.hour_bucket_key();
                s.with_dedup_key(key)
            })
            .collect();

        let mut signals_stored = 0;
        for signal in &signals {
            if self.signals.insert(signal).await?.is_some() {
                signals_stored += 1;
            }
        }

        tracing::info!(
            posts_fetched,
            posts_classified,
            posts_stored,
            signals_generated = signals.len(),
            signals_stored,
            "scan complete"
        );

        Ok(ScanReport {
            posts_fetched,
            posts_classified,
            posts_stored,
            signals_generated: signals.len(),
            signals_stored,
            signals,
        })
    }
}
