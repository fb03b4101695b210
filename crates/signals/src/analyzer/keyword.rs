//! Keyword-based sentiment analyzer.
//!
//! Deterministic heuristic classifier: keyword lists decide the label, a
//! ticker alias table extracts mentioned assets. Used by the demo command
//! and as the test classifier; no network access.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

use senti_bot_core::{RawPost, SentimentAnalysis, SentimentClassifier, SentimentLabel};

const BULLISH_WORDS: &[&str] = &[
    "moon", "bullish", "buy", "rally", "pump", "ath", "surge", "breakout",
];
const BEARISH_WORDS: &[&str] = &[
    "crash", "bearish", "sell", "dump", "concern", "risk", "bear", "pullback",
];

/// Ticker and the lowercase aliases that count as a mention.
const ASSET_ALIASES: &[(&str, &[&str])] = &[
    ("BTC", &["btc", "bitcoin"]),
    ("ETH", &["eth", "ethereum", "ether"]),
    ("SOL", &["sol", "solana"]),
    ("DOGE", &["doge", "dogecoin"]),
    ("ADA", &["ada", "cardano"]),
    ("XRP", &["xrp", "ripple"]),
    ("AVAX", &["avax", "avalanche"]),
];

/// Deterministic keyword sentiment classifier.
#[derive(Debug, Clone, Default)]
pub struct KeywordAnalyzer;

impl KeywordAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentClassifier for KeywordAnalyzer {
    async fn classify(&self, post: &RawPost) -> Result<SentimentAnalysis> {
        let text = format!("{} {}", post.title, post.body).to_lowercase();

        let bullish_hits = BULLISH_WORDS.iter().filter(|w| text.contains(*w)).count();
        let bearish_hits = BEARISH_WORDS.iter().filter(|w| text.contains(*w)).count();

        let (label, score) = if bullish_hits > bearish_hits {
            (SentimentLabel::Bullish, 0.7)
        } else if bearish_hits > bullish_hits {
            (SentimentLabel::Bearish, -0.7)
        } else {
            (SentimentLabel::Neutral, 0.0)
        };

        let mut mentioned_assets = BTreeSet::new();
        for (ticker, aliases) in ASSET_ALIASES {
            if aliases.iter().any(|a| text.contains(a)) {
                mentioned_assets.insert((*ticker).to_string());
            }
        }

        Ok(SentimentAnalysis {
            label,
            score,
            confidence: 0.75,
            mentioned_assets,
            themes: BTreeSet::from(["cryptocurrency".to_string(), "trading".to_string()]),
            reasoning: format!("Keyword-based analysis detected {} sentiment", label.as_str()),
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(title: &str, body: &str) -> RawPost {
        RawPost {
            id: "p1".to_string(),
            channel: "CryptoCurrency".to_string(),
            title: title.to_string(),
            body: body.to_string(),
            engagement_score: 10,
            comment_count: 2,
            url: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn detects_bullish_keywords_and_assets() {
        let analyzer = KeywordAnalyzer::new();
        let verdict = analyzer
            .classify(&post("Bitcoin to the moon", "BTC rally incoming"))
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentLabel::Bullish);
        assert!(verdict.score > 0.0);
        assert!(verdict.mentioned_assets.contains("BTC"));
    }

    #[tokio::test]
    async fn detects_bearish_keywords() {
        let analyzer = KeywordAnalyzer::new();
        let verdict = analyzer
            .classify(&post("Ethereum crash?", "Time to sell ETH, risk is high"))
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentLabel::Bearish);
        assert!(verdict.mentioned_assets.contains("ETH"));
    }

    #[tokio::test]
    async fn balanced_text_is_neutral() {
        let analyzer = KeywordAnalyzer::new();
        let verdict = analyzer
            .classify(&post("Solana weekly discussion", "What are your thoughts?"))
            .await
            .unwrap();
        assert_eq!(verdict.label, SentimentLabel::Neutral);
        assert_eq!(verdict.score, 0.0);
        assert!(verdict.mentioned_assets.contains("SOL"));
    }

    #[tokio::test]
    async fn classification_is_deterministic() {
        let analyzer = KeywordAnalyzer::new();
        let p = post("DOGE pump", "dogecoin surge");
        let a = analyzer.classify(&p).await.unwrap();
        let b = analyzer.classify(&p).await.unwrap();
        assert_eq!(a.label, b.label);
        assert_eq!(a.score, b.score);
        assert_eq!(a.mentioned_assets, b.mentioned_assets);
    }
}
