//! Per-asset sentiment aggregation.
//!
//! Reduces a set of classified posts, optionally filtered to one ticker,
//! into summary statistics. Pure and deterministic; the engagement-weighted
//! mean floors each post's weight at 1 so no post is excluded by zero
//! engagement.

use serde::{Deserialize, Serialize};

use senti_bot_core::{SentimentLabel, SentimentRecord};

/// Summary sentiment statistics for one asset (or all posts).
///
/// When no posts match the filter, all numeric fields are zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateSentiment {
    /// Requested ticker (uppercase), or "ALL" when unfiltered.
    pub asset: String,
    /// Number of posts behind the aggregate.
    pub post_count: usize,
    /// Unweighted mean sentiment score.
    pub avg_sentiment_score: f64,
    /// Unweighted mean classifier confidence.
    pub avg_confidence: f64,
    /// Posts labeled bullish.
    pub bullish_count: usize,
    /// Posts labeled bearish.
    pub bearish_count: usize,
    /// Posts labeled neutral.
    pub neutral_count: usize,
    /// `bullish_count / post_count * 100`.
    pub bullish_pct: f64,
    /// `bearish_count / post_count * 100`.
    pub bearish_pct: f64,
    /// Engagement-weighted mean sentiment, weight `max(engagement, 1)`.
    pub weighted_sentiment: f64,
}

impl AggregateSentiment {
    fn empty(asset: String) -> Self {
        Self {
            asset,
            post_count: 0,
            avg_sentiment_score: 0.0,
            avg_confidence: 0.0,
            bullish_count: 0,
            bearish_count: 0,
            neutral_count: 0,
            bullish_pct: 0.0,
            bearish_pct: 0.0,
            weighted_sentiment: 0.0,
        }
    }
}

/// Aggregates sentiment across records, optionally filtered by ticker.
///
/// Ticker matching is case-insensitive against each record's
/// `mentioned_assets`. Sums are sequential over the input slice, so the
/// result is deterministic for a given input.
#[must_use]
pub fn aggregate(records: &[SentimentRecord], asset: Option<&str>) -> AggregateSentiment {
    let asset_name = asset.map_or_else(|| "ALL".to_string(), str::to_uppercase);

    let relevant: Vec<&SentimentRecord> = match asset {
        Some(ticker) => records.iter().filter(|r| r.mentions(ticker)).collect(),
        None => records.iter().collect(),
    };

    if relevant.is_empty() {
        return AggregateSentiment::empty(asset_name);
    }

    let post_count = relevant.len();
    let mut bullish_count = 0;
    let mut bearish_count = 0;
    let mut neutral_count = 0;
    let mut score_sum = 0.0;
    let mut confidence_sum = 0.0;
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for record in &relevant {
        match record.sentiment_label {
            SentimentLabel::Bullish => bullish_count += 1,
            SentimentLabel::Bearish => bearish_count += 1,
            SentimentLabel::Neutral => neutral_count += 1,
        }
        score_sum += record.sentiment_score;
        confidence_sum += record.confidence;

        let weight = record.weight();
        weighted_sum += record.sentiment_score * weight;
        weight_sum += weight;
    }

    let count = post_count as f64;
    AggregateSentiment {
        asset: asset_name,
        post_count,
        avg_sentiment_score: score_sum / count,
        avg_confidence: confidence_sum / count,
        bullish_count,
        bearish_count,
        neutral_count,
        bullish_pct: bullish_count as f64 / count * 100.0,
        bearish_pct: bearish_count as f64 / count * 100.0,
        weighted_sentiment: weighted_sum / weight_sum,
    }
}
