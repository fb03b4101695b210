//! Row models for the persistence layer.
//!
//! Enum-typed core fields are stored as their string representations; rows
//! are the shape served to the presentation layer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A classified post row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalyzedPostRow {
    /// Auto-generated row id.
    pub id: i64,
    /// Source-assigned post id (unique).
    pub post_id: String,
    /// Channel the post came from.
    pub source_channel: String,
    pub title: String,
    pub body: String,
    pub engagement_score: i64,
    pub comment_count: i64,
    /// Sentiment label: "bullish", "bearish", "neutral".
    pub sentiment: String,
    pub sentiment_score: f64,
    pub confidence: f64,
    pub mentioned_assets: Vec<String>,
    pub themes: Vec<String>,
    /// When the post was created at the source.
    pub posted_at: DateTime<Utc>,
    /// When the post was classified and stored.
    pub analyzed_at: DateTime<Utc>,
}

/// A stored trading signal row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SignalRow {
    /// Auto-generated signal id.
    pub id: i64,
    pub generated_at: DateTime<Utc>,
    pub asset: String,
    /// "BUY" or "SELL".
    pub signal_type: String,
    pub confidence_score: f64,
    pub sentiment_score: f64,
    pub post_count: i64,
    pub bullish_pct: f64,
    pub bearish_pct: f64,
    pub reasoning: String,
    /// Idempotency key (asset + time bucket), unique when present.
    pub dedup_key: Option<String>,
}

/// A paper trade row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PaperTradeRow {
    /// Auto-generated trade id.
    pub id: i64,
    /// Weak reference to the originating signal.
    pub signal_id: i64,
    pub asset: String,
    /// "BUY" (long) or "SELL" (short).
    pub trade_type: String,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub position_size: Decimal,
    pub pnl: Option<Decimal>,
    /// "open" or "closed".
    pub status: String,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}
