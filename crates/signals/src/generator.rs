//! Batch signal generation across the assets mentioned in a record set.

use std::collections::BTreeSet;

use crate::aggregator::aggregate;
use crate::classifier::SignalClassifier;
use senti_bot_core::{Signal, SignalConfig, SentimentRecord};

/// Runs aggregation and classification for every candidate asset.
///
/// Assets are classified independently; output is ordered by ticker so
/// repeated runs over the same records produce identical sequences.
#[derive(Debug, Clone, Copy)]
pub struct SignalBatchGenerator {
    classifier: SignalClassifier,
}

impl SignalBatchGenerator {
    #[must_use]
    pub const fn new(config: SignalConfig) -> Self {
        Self {
            classifier: SignalClassifier::new(config),
        }
    }

    /// Generates signals for the target assets, or for every asset mentioned
    /// in the records when no targets are given.
    #[must_use]
    pub fn generate(
        &self,
        records: &[SentimentRecord],
        target_assets: Option<&BTreeSet<String>>,
    ) -> Vec<Signal> {
        let candidates: BTreeSet<String> = match target_assets {
            Some(assets) => assets.iter().map(|a| a.to_uppercase()).collect(),
            None => records
                .iter()
                .flat_map(|r| r.mentioned_assets.iter().cloned())
                .collect(),
        };

        let mut signals = Vec::new();
        for asset in &candidates {
            let agg = aggregate(records, Some(asset));
            if let Some(signal) = self.classifier.classify(&agg) {
                tracing::debug!(
                    asset = %signal.asset,
                    signal_type = signal.signal_type.as_str(),
                    confidence = signal.confidence_score,
                    "generated signal"
                );
                signals.push(signal);
            }
        }
        signals
    }
}
