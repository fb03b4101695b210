//! Sentiment analyzers: implementations of the classifier collaborator.

mod keyword;
mod llm;

pub use keyword::KeywordAnalyzer;
pub use llm::{LlmAnalyzer, LlmAnalyzerConfig};
