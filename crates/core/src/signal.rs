//! Trading signal types.
//!
//! A `Signal` is a discrete BUY/SELL recommendation derived from aggregate
//! sentiment crossing fixed thresholds. Signals are created only by the
//! classifier in `senti-bot-signals` and are immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a trading signal, also used as the paper trade side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    /// Open a long position.
    Buy,
    /// Open a short position.
    Sell,
}

impl SignalType {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "BUY" => Some(Self::Buy),
            "SELL" => Some(Self::Sell),
            _ => None,
        }
    }
}

/// A trading signal for one asset, generated from aggregate sentiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    /// Asset ticker (uppercase).
    pub asset: String,
    /// BUY or SELL.
    pub signal_type: SignalType,
    /// Signal confidence in [0.0, 1.0].
    pub confidence_score: f64,
    /// Weighted sentiment at generation time, in [-1.0, 1.0].
    pub sentiment_score: f64,
    /// Number of posts behind the signal.
    pub post_count: usize,
    /// Human-readable rationale naming the tier and the numbers used.
    pub reasoning: String,
    /// Percentage of bullish posts in [0, 100].
    pub bullish_pct: f64,
    /// Percentage of bearish posts in [0, 100].
    pub bearish_pct: f64,
    /// When the signal was generated.
    pub generated_at: DateTime<Utc>,
    /// Optional idempotency key (e.g. asset + time bucket). Dedup policy
    /// lives at the persistence boundary, not here.
    pub dedup_key: Option<String>,
}

impl Signal {
    /// Attaches an idempotency key for the persistence layer.
    #[must_use]
    pub fn with_dedup_key(mut self, key: String) -> Self {
        self.dedup_key = Some(key);
        self
    }

    /// Hour-bucket dedup key for this signal: `ASSET:YYYYMMDDHH`.
    #[must_use]
    pub fn hour_bucket_key(&self) -> String {
        format!("{}:{}", self.asset, self.generated_at.format("%Y%m%d%H"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn signal_type_round_trips() {
        assert_eq!(SignalType::parse("buy"), Some(SignalType::Buy));
        assert_eq!(SignalType::parse("SELL"), Some(SignalType::Sell));
        assert_eq!(SignalType::parse("HOLD"), None);
        assert_eq!(SignalType::Buy.as_str(), "BUY");
    }

    #[test]
    fn hour_bucket_key_formats_asset_and_hour() {
        let signal = Signal {
            asset: "SOL".to_string(),
            signal_type: SignalType::Buy,
            confidence_score: 0.9,
            sentiment_score: 0.8,
            post_count: 10,
            reasoning: String::new(),
            bullish_pct: 100.0,
            bearish_pct: 0.0,
            generated_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap(),
            dedup_key: None,
        };
        assert_eq!(signal.hour_bucket_key(), "SOL:2026031415");
    }
}
