//! LLM-backed sentiment analyzer.
//!
//! Sends each post to an Anthropic-style messages API and parses a strict
//! JSON verdict out of the reply. Failures surface to the caller; a post
//! that cannot be classified is the caller's decision to skip, not a
//! silently neutral record.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeSet;
use std::time::Duration;

use senti_bot_core::{RawPost, SentimentAnalysis, SentimentClassifier, SentimentLabel};

/// Configuration for the LLM analyzer.
#[derive(Debug, Clone)]
pub struct LlmAnalyzerConfig {
    /// API base URL.
    pub api_url: String,
    /// API key sent as `x-api-key`.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl LlmAnalyzerConfig {
    /// Creates a config with the given API key and default endpoint/model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: "https://api.anthropic.com".to_string(),
            api_key: api_key.into(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Sentiment classifier backed by a messages-API LLM.
pub struct LlmAnalyzer {
    client: reqwest::Client,
    config: LlmAnalyzerConfig,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

/// JSON verdict shape the model is prompted to emit.
#[derive(Debug, Deserialize)]
struct Verdict {
    sentiment: String,
    sentiment_score: f64,
    confidence: f64,
    #[serde(default)]
    mentioned_assets: Vec<String>,
    #[serde(default)]
    key_themes: Vec<String>,
    #[serde(default)]
    reasoning: String,
}

impl LlmAnalyzer {
    /// Creates an analyzer with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: LlmAnalyzerConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn prompt(post: &RawPost) -> String {
        format!(
            "Analyze this social media post about cryptocurrency and provide sentiment analysis.\n\n\
             Post Title: {}\n\n\
             Post Content: {}\n\n\
             Post Engagement: Score={}, Comments={}\n\n\
             Respond with a JSON object containing:\n\
             1. sentiment: \"bullish\", \"bearish\", or \"neutral\"\n\
             2. sentiment_score: a float from -1.0 (very bearish) to 1.0 (very bullish)\n\
             3. confidence: float from 0.0 to 1.0 indicating how confident you are\n\
             4. mentioned_assets: list of crypto tickers mentioned (e.g., [\"BTC\", \"ETH\"])\n\
             5. key_themes: list of main themes/topics discussed\n\
             6. reasoning: brief explanation of your sentiment analysis\n\n\
             Only respond with valid JSON, no other text.",
            post.title, post.body, post.engagement_score, post.comment_count
        )
    }

    fn parse_verdict(text: &str) -> Result<SentimentAnalysis> {
        let verdict: Verdict =
            serde_json::from_str(text.trim()).context("classifier reply was not valid JSON")?;

        let label = SentimentLabel::parse(&verdict.sentiment)
            .ok_or_else(|| anyhow!("unknown sentiment label {:?}", verdict.sentiment))?;

        Ok(SentimentAnalysis {
            label,
            score: verdict.sentiment_score,
            confidence: verdict.confidence,
            mentioned_assets: verdict
                .mentioned_assets
                .into_iter()
                .map(|a| a.to_uppercase())
                .collect::<BTreeSet<_>>(),
            themes: verdict.key_themes.into_iter().collect(),
            reasoning: verdict.reasoning,
        })
    }
}

#[async_trait]
impl SentimentClassifier for LlmAnalyzer {
    async fn classify(&self, post: &RawPost) -> Result<SentimentAnalysis> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": 1024,
            "messages": [{"role": "user", "content": Self::prompt(post)}],
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.api_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "classifier API returned status {} for post {}",
                response.status(),
                post.id
            ));
        }

        let reply: MessagesResponse = response.json().await?;
        let text = reply
            .content
            .first()
            .map(|block| block.text.as_str())
            .ok_or_else(|| anyhow!("classifier reply had no content for post {}", post.id))?;

        Self::parse_verdict(text)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_verdict() {
        let text = r#"{
            "sentiment": "bullish",
            "sentiment_score": 0.8,
            "confidence": 0.9,
            "mentioned_assets": ["btc", "ETH"],
            "key_themes": ["etf"],
            "reasoning": "ETF inflows"
        }"#;
        let verdict = LlmAnalyzer::parse_verdict(text).unwrap();
        assert_eq!(verdict.label, SentimentLabel::Bullish);
        assert!(verdict.mentioned_assets.contains("BTC"));
        assert!(verdict.mentioned_assets.contains("ETH"));
    }

    #[test]
    fn rejects_non_json_reply() {
        assert!(LlmAnalyzer::parse_verdict("Sure! Here's my analysis...").is_err());
    }

    #[test]
    fn rejects_unknown_label() {
        let text = r#"{"sentiment": "sideways", "sentiment_score": 0.0, "confidence": 0.5}"#;
        assert!(LlmAnalyzer::parse_verdict(text).is_err());
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let text = r#"{"sentiment": "neutral", "sentiment_score": 0.0, "confidence": 0.5}"#;
        let verdict = LlmAnalyzer::parse_verdict(text).unwrap();
        assert!(verdict.mentioned_assets.is_empty());
        assert!(verdict.themes.is_empty());
    }
}
