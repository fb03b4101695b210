//! End-to-end signal flow: posts through classification, aggregation, and
//! batch generation.

use std::collections::BTreeSet;

use chrono::Utc;

use senti_bot_core::{
    RawPost, SentimentClassifier, SentimentLabel, SentimentRecord, SignalConfig, SignalType,
};
use senti_bot_signals::analyzer::KeywordAnalyzer;
use senti_bot_signals::{aggregate, SignalBatchGenerator};

fn record(
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
        title: format!("{asset} talk"),
        body: String::new(),
        engagement_score: engagement,
        comment_count: 0,
        sentiment_label: label,
        sentiment_score: score,
        confidence,
        mentioned_assets: BTreeSet::from([asset.to_string()]),
        themes: BTreeSet::new(),
        timestamp: Utc::now(),
    }
}

fn config() -> SignalConfig {
    SignalConfig {
        min_confidence: 0.6,
        min_posts: 3,
    }
}

#[test]
fn ten_unanimous_bullish_posts_yield_one_buy_signal() {
    let records: Vec<_> = (0..10)
        .map(|i| {
            record(
                &format!("sol-{i}"),
                "SOL",
                SentimentLabel::Bullish,
                0.8,
                0.9,
                100,
            )
        })
        .collect();

    let signals = SignalBatchGenerator::new(config()).generate(&records, None);

    assert_eq!(signals.len(), 1);
    let signal = &signals[0];
    assert_eq!(signal.asset, "SOL");
    assert_eq!(signal.signal_type, SignalType::Buy);
    assert_eq!(signal.post_count, 10);
    assert!((signal.sentiment_score - 0.8).abs() < 1e-12);
    assert!((signal.confidence_score - 0.9).abs() < 1e-12);
    assert!(signal.reasoning.contains("100.0%"));
}

#[test]
fn mirrored_bearish_set_produces_symmetric_sell() {
    let bullish: Vec<_> = (0..8)
        .map(|i| {
            record(
                &format!("b-{i}"),
                "ADA",
                SentimentLabel::Bullish,
                0.7,
                0.85,
                50 + i,
            )
        })
        .collect();
    let bearish: Vec<_> = (0..8)
        .map(|i| {
            record(
                &format!("s-{i}"),
                "ADA",
                SentimentLabel::Bearish,
                -0.7,
                0.85,
                50 + i,
            )
        })
        .collect();

    let generator = SignalBatchGenerator::new(config());
    let buy = &generator.generate(&bullish, None)[0];
    let sell = &generator.generate(&bearish, None)[0];

    assert_eq!(buy.signal_type, SignalType::Buy);
    assert_eq!(sell.signal_type, SignalType::Sell);
    assert_eq!(buy.confidence_score, sell.confidence_score);
    assert_eq!(buy.post_count, sell.post_count);
    assert!((buy.sentiment_score + sell.sentiment_score).abs() < 1e-12);
}

#[test]
fn aggregate_of_mismatched_asset_is_empty() {
    let records = vec![record("1", "BTC", SentimentLabel::Bullish, 0.9, 0.9, 10)];
    let agg = aggregate(&records, Some("SOL"));
    assert_eq!(agg.post_count, 0);
    assert_eq!(agg.weighted_sentiment, 0.0);
    assert_eq!(agg.avg_confidence, 0.0);
}

#[tokio::test]
async fn keyword_classified_posts_flow_into_signals() {
    let analyzer = KeywordAnalyzer::new();
    let now = Utc::now();

    let mut records = Vec::new();
    for i in 0..5 {
        let post = RawPost {
            id: format!("p{i}"),
            channel: "Bitcoin".to_string(),
            title: "Bitcoin rally, moon soon".to_string(),
            body: "BTC bullish breakout".to_string(),
            engagement_score: 200,
            comment_count: 40,
            url: None,
            created_at: now,
        };
        let analysis = analyzer.classify(&post).await.unwrap();
        records.push(SentimentRecord::from_analysis(&post, &analysis).unwrap());
    }

    let signals = SignalBatchGenerator::new(config()).generate(&records, None);
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].asset, "BTC");
    assert_eq!(signals[0].signal_type, SignalType::Buy);
}
