use crate::record::{RawPost, SentimentAnalysis};
use anyhow::Result;
use async_trait::async_trait;

/// Source of raw posts for a named channel (subreddit, feed, mock).
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_posts(&self, channel: &str, max_posts: usize) -> Result<Vec<RawPost>>;
}

/// Maps one raw post to a sentiment verdict.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, post: &RawPost) -> Result<SentimentAnalysis>;
    fn name(&self) -> &str;
}
