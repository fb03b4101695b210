//! Threshold-based signal classification.
//!
//! Turns an asset's aggregate sentiment into a BUY/SELL signal, or nothing.
//! Two gates run before the tiers: enough posts, enough average confidence.
//! The tier-derived confidence is re-checked against the floor afterwards,
//! since a tier can discount confidence below it.

use chrono::Utc;

use crate::aggregator::AggregateSentiment;
use senti_bot_core::{Signal, SignalConfig, SignalType};

/// Applies fixed sentiment thresholds to aggregates.
///
/// Thresholds are immutable after construction; classification is fully
/// deterministic given its inputs.
#[derive(Debug, Clone, Copy)]
pub struct SignalClassifier {
    min_confidence: f64,
    min_posts: usize,
}

impl SignalClassifier {
    #[must_use]
    pub const fn new(config: SignalConfig) -> Self {
        Self {
            min_confidence: config.min_confidence,
            min_posts: config.min_posts,
        }
    }

    /// The minimum confidence floor applied at both gates.
    #[must_use]
    pub const fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Classifies one aggregate into a signal, or `None`.
    ///
    /// Tier table, first match wins:
    ///
    /// | tier             | condition                                  | type | confidence                         |
    /// |------------------|--------------------------------------------|------|------------------------------------|
    /// | strong bullish   | weighted > 0.5  and bullish_pct > 60       | BUY  | `avg_conf * bullish_pct/100`       |
    /// | moderate bullish | weighted > 0.25 and bullish_pct > 50       | BUY  | `avg_conf * 0.8 * bullish_pct/100` |
    /// | strong bearish   | weighted < -0.5 and bearish_pct > 60       | SELL | `avg_conf * bearish_pct/100`       |
    /// | moderate bearish | weighted < -0.25 and bearish_pct > 50      | SELL | `avg_conf * 0.8 * bearish_pct/100` |
    ///
    /// Confidence is capped at 1.0.
    #[must_use]
    pub fn classify(&self, agg: &AggregateSentiment) -> Option<Signal> {
        if agg.post_count < self.min_posts {
            return None;
        }
        if agg.avg_confidence < self.min_confidence {
            return None;
        }

        let weighted = agg.weighted_sentiment;
        let (signal_type, confidence_score, reasoning) = if weighted > 0.5 && agg.bullish_pct > 60.0
        {
            (
                SignalType::Buy,
                (agg.avg_confidence * agg.bullish_pct / 100.0).min(1.0),
                format!(
                    "Strong bullish sentiment detected: {:.1}% bullish posts, weighted sentiment {:.2}",
                    agg.bullish_pct, weighted
                ),
            )
        } else if weighted > 0.25 && agg.bullish_pct > 50.0 {
            (
                SignalType::Buy,
                (agg.avg_confidence * 0.8 * agg.bullish_pct / 100.0).min(1.0),
                format!(
                    "Moderate bullish sentiment: {:.1}% bullish posts, weighted sentiment {:.2}",
                    agg.bullish_pct, weighted
                ),
            )
        } else if weighted < -0.5 && agg.bearish_pct > 60.0 {
            (
                SignalType::Sell,
                (agg.avg_confidence * agg.bearish_pct / 100.0).min(1.0),
                format!(
                    "Strong bearish sentiment detected: {:.1}% bearish posts, weighted sentiment {:.2}",
                    agg.bearish_pct, weighted
                ),
            )
        } else if weighted < -0.25 && agg.bearish_pct > 50.0 {
            (
                SignalType::Sell,
                (agg.avg_confidence * 0.8 * agg.bearish_pct / 100.0).min(1.0),
                format!(
                    "Moderate bearish sentiment: {:.1}% bearish posts, weighted sentiment {:.2}",
                    agg.bearish_pct, weighted
                ),
            )
        } else {
            return None;
        };

        // A tier can discount below the floor even when the post-level
        // average confidence passed the gate.
        if confidence_score < self.min_confidence {
            return None;
        }

        Some(Signal {
            asset: agg.asset.clone(),
            signal_type,
            confidence_score,
            sentiment_score: weighted,
            post_count: agg.post_count,
            reasoning,
            bullish_pct: agg.bullish_pct,
            bearish_pct: agg.bearish_pct,
            generated_at: Utc::now(),
            dedup_key: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> SignalClassifier {
        SignalClassifier::new(SignalConfig {
            min_confidence: 0.6,
            min_posts: 3,
        })
    }

    fn agg(
        post_count: usize,
        avg_confidence: f64,
        weighted_sentiment: f64,
        bullish_pct: f64,
        bearish_pct: f64,
    ) -> AggregateSentiment {
        AggregateSentiment {
            asset: "BTC".to_string(),
            post_count,
            avg_sentiment_score: weighted_sentiment,
            avg_confidence,
            bullish_count: 0,
            bearish_count: 0,
            neutral_count: 0,
            bullish_pct,
            bearish_pct,
            weighted_sentiment,
        }
    }

    #[test]
    fn too_few_posts_yields_no_signal_even_when_extreme() {
        let result = classifier().classify(&agg(1, 0.9, 0.9, 100.0, 0.0));
        assert!(result.is_none());
    }

    #[test]
    fn low_average_confidence_yields_no_signal() {
        let result = classifier().classify(&agg(10, 0.5, 0.9, 100.0, 0.0));
        assert!(result.is_none());
    }

    #[test]
    fn strong_bullish_tier_takes_precedence() {
        let signal = classifier().classify(&agg(10, 0.9, 0.6, 70.0, 10.0)).unwrap();
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert!((signal.confidence_score - 0.63).abs() < 1e-12);
        assert!(signal.reasoning.contains("Strong bullish"));
        assert!(signal.reasoning.contains("70.0%"));
        assert!(signal.reasoning.contains("0.60"));
    }

    #[test]
    fn moderate_bullish_applies_discount() {
        let signal = classifier().classify(&agg(10, 0.9, 0.3, 90.0, 5.0)).unwrap();
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert!((signal.confidence_score - 0.9 * 0.8 * 0.9).abs() < 1e-12);
        assert!(signal.reasoning.contains("Moderate bullish"));
    }

    #[test]
    fn strong_bearish_mirrors_strong_bullish() {
        let buy = classifier().classify(&agg(10, 0.9, 0.6, 70.0, 10.0)).unwrap();
        let sell = classifier().classify(&agg(10, 0.9, -0.6, 10.0, 70.0)).unwrap();
        assert_eq!(sell.signal_type, SignalType::Sell);
        assert_eq!(sell.confidence_score, buy.confidence_score);
        assert_eq!(sell.post_count, buy.post_count);
    }

    #[test]
    fn moderate_bearish_triggers_below_minus_quarter() {
        // 0.9 * 0.8 * 0.85 = 0.612, above the floor.
        let signal = classifier().classify(&agg(10, 0.9, -0.3, 10.0, 85.0)).unwrap();
        assert_eq!(signal.signal_type, SignalType::Sell);
        assert!(signal.reasoning.contains("Moderate bearish"));
    }

    #[test]
    fn mixed_sentiment_yields_no_signal() {
        assert!(classifier().classify(&agg(10, 0.9, 0.1, 40.0, 40.0)).is_none());
        // Strong weighted sentiment but insufficient label consensus.
        assert!(classifier().classify(&agg(10, 0.9, 0.6, 55.0, 10.0)).is_none());
    }

    #[test]
    fn boundary_thresholds_are_strict() {
        // Low floor so the moderate tier's discounted confidence passes and
        // the tier choice itself is observable.
        let loose = SignalClassifier::new(SignalConfig {
            min_confidence: 0.4,
            min_posts: 3,
        });
        // weighted exactly 0.5 with bullish_pct 70 falls to the moderate tier.
        let signal = loose.classify(&agg(10, 0.9, 0.5, 70.0, 0.0)).unwrap();
        assert!(signal.reasoning.contains("Moderate"));
        // bullish_pct exactly 60 with strong weighted also falls through.
        let signal = loose.classify(&agg(10, 0.9, 0.6, 60.0, 0.0)).unwrap();
        assert!(signal.reasoning.contains("Moderate"));
    }

    #[test]
    fn tier_confidence_below_floor_is_rejected() {
        // Gate passes (avg 0.65) but 0.65 * 0.8 * 0.55 = 0.286 < 0.6.
        let result = classifier().classify(&agg(10, 0.65, 0.3, 55.0, 10.0));
        assert!(result.is_none());
    }

    #[test]
    fn confidence_is_capped_at_one() {
        let mut a = agg(10, 1.0, 0.9, 100.0, 0.0);
        a.bullish_pct = 100.0;
        let signal = classifier().classify(&a).unwrap();
        assert!(signal.confidence_score <= 1.0);
    }
}
