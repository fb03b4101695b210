//! Classified post data model.
//!
//! A `SentimentRecord` is the canonical shape of one social-media post after
//! sentiment classification. Records are validated once at the ingestion
//! boundary and immutable afterwards, so downstream aggregation can assume
//! well-typed fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CoreError;

/// Sentiment classification of a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Expect price to go up.
    Bullish,
    /// Expect price to go down.
    Bearish,
    /// No directional bias.
    Neutral,
}

impl SentimentLabel {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bullish" => Some(Self::Bullish),
            "bearish" => Some(Self::Bearish),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// A raw post as returned by a content source, before classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPost {
    /// Source-assigned unique post id.
    pub id: String,
    /// Channel the post came from (e.g. a subreddit name).
    pub channel: String,
    /// Post title.
    pub title: String,
    /// Post body text (may be empty for link posts).
    pub body: String,
    /// Engagement score reported by the source (upvotes, likes).
    pub engagement_score: i64,
    /// Number of comments.
    pub comment_count: i64,
    /// Link to the post.
    pub url: Option<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
}

impl RawPost {
    /// Returns true if the post has no analyzable text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }
}

/// Verdict produced by a sentiment classifier for one post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// Sentiment label.
    pub label: SentimentLabel,
    /// Sentiment score from -1.0 (very bearish) to 1.0 (very bullish).
    pub score: f64,
    /// Classifier confidence from 0.0 to 1.0.
    pub confidence: f64,
    /// Uppercase tickers of crypto assets mentioned (e.g. "BTC", "ETH").
    pub mentioned_assets: BTreeSet<String>,
    /// Main themes/topics discussed.
    pub themes: BTreeSet<String>,
    /// Brief explanation of the verdict.
    pub reasoning: String,
}

/// A classified post, the unit of input to sentiment aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Unique post id (deduplication key at the persistence layer).
    pub id: String,
    /// Channel the post came from.
    pub source_channel: String,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// Engagement score (non-negative).
    pub engagement_score: i64,
    /// Comment count (non-negative).
    pub comment_count: i64,
    /// Sentiment label.
    pub sentiment_label: SentimentLabel,
    /// Sentiment score in [-1.0, 1.0].
    pub sentiment_score: f64,
    /// Classifier confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Uppercase tickers mentioned in the post.
    pub mentioned_assets: BTreeSet<String>,
    /// Themes discussed in the post.
    pub themes: BTreeSet<String>,
    /// When the post was created.
    pub timestamp: DateTime<Utc>,
}

impl SentimentRecord {
    /// Builds a validated record from a raw post and its classifier verdict.
    ///
    /// Tickers are normalized to uppercase. Validation happens once here;
    /// downstream logic assumes the fields are in range.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if the post id is empty, any ticker is
    /// empty, counts are negative, or score/confidence are out of range.
    pub fn from_analysis(post: &RawPost, analysis: &SentimentAnalysis) -> Result<Self, CoreError> {
        if post.id.trim().is_empty() {
            return Err(CoreError::Validation("post id must not be empty".into()));
        }
        if post.engagement_score < 0 || post.comment_count < 0 {
            return Err(CoreError::Validation(format!(
                "negative engagement metrics for post {}: score={}, comments={}",
                post.id, post.engagement_score, post.comment_count
            )));
        }
        if !(-1.0..=1.0).contains(&analysis.score) {
            return Err(CoreError::Validation(format!(
                "sentiment score {} outside [-1, 1] for post {}",
                analysis.score, post.id
            )));
        }
        if !(0.0..=1.0).contains(&analysis.confidence) {
            return Err(CoreError::Validation(format!(
                "confidence {} outside [0, 1] for post {}",
                analysis.confidence, post.id
            )));
        }

        let mut mentioned_assets = BTreeSet::new();
        for ticker in &analysis.mentioned_assets {
            let ticker = ticker.trim();
            if ticker.is_empty() {
                return Err(CoreError::Validation(format!(
                    "empty ticker in post {}",
                    post.id
                )));
            }
            mentioned_assets.insert(ticker.to_uppercase());
        }

        Ok(Self {
            id: post.id.clone(),
            source_channel: post.channel.clone(),
            title: post.title.clone(),
            body: post.body.clone(),
            engagement_score: post.engagement_score,
            comment_count: post.comment_count,
            sentiment_label: analysis.label,
            sentiment_score: analysis.score,
            confidence: analysis.confidence,
            mentioned_assets,
            themes: analysis.themes.clone(),
            timestamp: post.created_at,
        })
    }

    /// Returns true if this record mentions the given ticker (case-insensitive).
    #[must_use]
    pub fn mentions(&self, ticker: &str) -> bool {
        self.mentioned_assets
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ticker))
    }

    /// Aggregation weight: engagement score floored at 1 so zero-engagement
    /// posts still contribute.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.engagement_score.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_post() -> RawPost {
        RawPost {
            id: "t3_abc".to_string(),
            channel: "CryptoCurrency".to_string(),
            title: "BTC to the moon".to_string(),
            body: "Bullish on bitcoin".to_string(),
            engagement_score: 120,
            comment_count: 14,
            url: None,
            created_at: Utc::now(),
        }
    }

    fn analysis() -> SentimentAnalysis {
        SentimentAnalysis {
            label: SentimentLabel::Bullish,
            score: 0.8,
            confidence: 0.9,
            mentioned_assets: BTreeSet::from(["btc".to_string()]),
            themes: BTreeSet::from(["trading".to_string()]),
            reasoning: "keyword match".to_string(),
        }
    }

    #[test]
    fn builds_record_with_uppercase_tickers() {
        let record = SentimentRecord::from_analysis(&raw_post(), &analysis()).unwrap();
        assert!(record.mentioned_assets.contains("BTC"));
        assert!(record.mentions("btc"));
        assert!(!record.mentions("ETH"));
    }

    #[test]
    fn rejects_out_of_range_score() {
        let mut a = analysis();
        a.score = 1.5;
        assert!(SentimentRecord::from_analysis(&raw_post(), &a).is_err());
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        let mut a = analysis();
        a.confidence = -0.1;
        assert!(SentimentRecord::from_analysis(&raw_post(), &a).is_err());
    }

    #[test]
    fn rejects_empty_id() {
        let mut p = raw_post();
        p.id = "  ".to_string();
        assert!(SentimentRecord::from_analysis(&p, &analysis()).is_err());
    }

    #[test]
    fn rejects_empty_ticker() {
        let mut a = analysis();
        a.mentioned_assets.insert("  ".to_string());
        assert!(SentimentRecord::from_analysis(&raw_post(), &a).is_err());
    }

    #[test]
    fn zero_engagement_still_weighs_one() {
        let mut p = raw_post();
        p.engagement_score = 0;
        let record = SentimentRecord::from_analysis(&p, &analysis()).unwrap();
        assert!((record.weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn label_round_trips_through_strings() {
        for label in [
            SentimentLabel::Bullish,
            SentimentLabel::Bearish,
            SentimentLabel::Neutral,
        ] {
            assert_eq!(SentimentLabel::parse(label.as_str()), Some(label));
        }
        assert_eq!(SentimentLabel::parse("sideways"), None);
    }
}
