//! Shared fixtures for unit tests.

use std::collections::BTreeSet;

use chrono::Utc;
use senti_bot_core::{SentimentLabel, SentimentRecord};

/// Builds a classified record mentioning a single asset.
pub fn record(
    id: &str,
    asset: &str,
    label: SentimentLabel,
    score: f64,
    confidence: f64,
    engagement: i64,
) -> SentimentRecord {
    SentimentRecord {
        id: id.to_string(),
        source_channel: "CryptoCurrency".to_string(),
        title: format!("{asset} discussion"),
        body: String::new(),
        engagement_score: engagement,
        comment_count: 0,
        sentiment_label: label,
        sentiment_score: score,
        confidence,
        mentioned_assets: BTreeSet::from([asset.to_uppercase()]),
        themes: BTreeSet::new(),
        timestamp: Utc::now(),
    }
}
