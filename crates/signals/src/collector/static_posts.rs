//! Canned content source for demos and tests.
//!
//! Serves a fixed set of posts so the full scan path can run without network
//! access or API keys.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use senti_bot_core::{ContentSource, RawPost};

/// Content source that returns a canned set of posts for any channel.
#[derive(Debug, Clone, Default)]
pub struct StaticCollector;

impl StaticCollector {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn canned_posts(channel: &str) -> Vec<RawPost> {
        let now = Utc::now();
        let posts = [
            (
                "demo_1",
                "Bitcoin breaks through resistance, rally continues",
                "BTC looking extremely bullish after the breakout. Buying more.",
                1523,
                342,
            ),
            (
                "demo_2",
                "Why Ethereum will surge after the upgrade",
                "ETH fundamentals are stronger than ever. Very bullish long term.",
                847,
                156,
            ),
            (
                "demo_3",
                "Concerns about Bitcoin mining difficulty",
                "Worried about BTC hashrate trends. Risk of a pullback here.",
                234,
                89,
            ),
            (
                "demo_4",
                "Dogecoin pump incoming?",
                "DOGE volume is spiking, could moon again.",
                3201,
                1024,
            ),
            (
                "demo_5",
                "Market analysis: crypto winter or spring?",
                "Mixed signals across the board, staying neutral for now.",
                412,
                67,
            ),
        ];

        posts
            .into_iter()
            .enumerate()
            .map(|(i, (id, title, body, score, comments))| RawPost {
                id: format!("{channel}_{id}"),
                channel: channel.to_string(),
                title: title.to_string(),
                body: body.to_string(),
                engagement_score: score,
                comment_count: comments,
                url: None,
                created_at: now - chrono::Duration::minutes(i as i64 * 10),
            })
            .collect()
    }
}

#[async_trait]
impl ContentSource for StaticCollector {
    async fn fetch_posts(&self, channel: &str, max_posts: usize) -> Result<Vec<RawPost>> {
        let mut posts = Self::canned_posts(channel);
        posts.truncate(max_posts);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_at_most_max_posts() {
        let source = StaticCollector::new();
        let posts = source.fetch_posts("CryptoCurrency", 3).await.unwrap();
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.channel == "CryptoCurrency"));
    }

    #[tokio::test]
    async fn post_ids_are_channel_scoped() {
        let source = StaticCollector::new();
        let a = source.fetch_posts("Bitcoin", 5).await.unwrap();
        let b = source.fetch_posts("ethereum", 5).await.unwrap();
        assert_ne!(a[0].id, b[0].id);
    }
}
