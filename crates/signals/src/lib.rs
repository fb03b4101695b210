//! Sentiment aggregation and trading signal generation.
//!
//! The signal path is pure and synchronous: classified posts are reduced to
//! per-asset aggregate sentiment, fixed thresholds turn aggregates into
//! BUY/SELL signals. Around that core live the async collaborators: content
//! collectors, sentiment analyzers, and the scan pipeline that wires them to
//! persistence.

pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod collector;
pub mod generator;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod testutil;

pub use aggregator::{aggregate, AggregateSentiment};
pub use classifier::SignalClassifier;
pub use generator::SignalBatchGenerator;
pub use pipeline::{ScanPipeline, ScanReport};
