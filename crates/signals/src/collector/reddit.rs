//! Reddit content source.
//!
//! Fetches hot posts from a subreddit via Reddit's public listing JSON
//! endpoint. No authentication; the endpoint only needs a descriptive
//! user agent.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;

use senti_bot_core::{ContentSource, RawPost};

/// Reddit public API base URL.
pub const REDDIT_API_URL: &str = "https://www.reddit.com";

/// Configuration for the Reddit collector.
#[derive(Debug, Clone)]
pub struct RedditCollectorConfig {
    /// Base URL, overridable for tests.
    pub base_url: String,
    /// User agent sent with every request; Reddit rejects generic ones.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RedditCollectorConfig {
    fn default() -> Self {
        Self {
            base_url: REDDIT_API_URL.to_string(),
            user_agent: "senti-bot/0.1".to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl RedditCollectorConfig {
    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Content source over Reddit subreddit hot listings.
pub struct RedditCollector {
    client: reqwest::Client,
    base_url: String,
}

impl RedditCollector {
    /// Creates a collector with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RedditCollectorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: ListingPost,
}

#[derive(Debug, Deserialize)]
struct ListingPost {
    id: String,
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: i64,
    #[serde(default)]
    permalink: String,
    created_utc: f64,
}

#[async_trait]
impl ContentSource for RedditCollector {
    async fn fetch_posts(&self, channel: &str, max_posts: usize) -> Result<Vec<RawPost>> {
        let url = format!(
            "{}/r/{}/hot.json?limit={}",
            self.base_url, channel, max_posts
        );
        tracing::debug!(channel, max_posts, "fetching subreddit listing");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "reddit listing for r/{} failed with status {}",
                channel,
                response.status()
            ));
        }
        let listing: Listing = response.json().await?;

        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| {
                let post = child.data;
                let created_at = DateTime::<Utc>::from_timestamp(post.created_utc as i64, 0)
                    .unwrap_or_else(Utc::now);
                RawPost {
                    id: post.id,
                    channel: channel.to_string(),
                    title: post.title,
                    body: post.selftext,
                    engagement_score: post.score.max(0),
                    comment_count: post.num_comments.max(0),
                    url: if post.permalink.is_empty() {
                        None
                    } else {
                        Some(format!("https://www.reddit.com{}", post.permalink))
                    },
                    created_at,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(channel, count = posts.len(), "fetched subreddit posts");
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_payload() {
        let payload = r#"{
            "data": {
                "children": [
                    {"data": {"id": "abc", "title": "BTC rally", "selftext": "up only",
                              "score": 42, "num_comments": 7, "permalink": "/r/Bitcoin/abc",
                              "created_utc": 1700000000.0}}
                ]
            }
        }"#;
        let listing: Listing = serde_json::from_str(payload).unwrap();
        assert_eq!(listing.data.children.len(), 1);
        assert_eq!(listing.data.children[0].data.id, "abc");
        assert_eq!(listing.data.children[0].data.score, 42);
    }

    #[test]
    fn missing_optional_fields_default() {
        let payload = r#"{
            "data": {"children": [{"data": {"id": "x", "title": "t", "created_utc": 0.0}}]}
        }"#;
        let listing: Listing = serde_json::from_str(payload).unwrap();
        let post = &listing.data.children[0].data;
        assert_eq!(post.selftext, "");
        assert_eq!(post.score, 0);
    }
}
