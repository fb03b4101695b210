use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sizing::SizingConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub reddit: RedditConfig,
    pub classifier: ClassifierConfig,
    pub signal: SignalConfig,
    pub sizing: SizingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// Subreddits scanned for posts.
    pub channels: Vec<String>,
    /// Maximum posts fetched per channel per scan.
    pub max_posts_per_scan: usize,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// "llm" or "keyword".
    pub provider: String,
    pub api_url: String,
    pub model: String,
    /// Maximum posts classified per scan, to bound API cost.
    pub max_posts_per_batch: usize,
}

/// Signal generation thresholds. Immutable once constructed; passed into
/// each component explicitly rather than shared as a mutable default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Minimum average and final confidence for a signal.
    pub min_confidence: f64,
    /// Minimum number of posts behind a signal.
    pub min_posts: usize,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            min_posts: 3,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/senti_bot".to_string(),
                max_connections: 10,
            },
            reddit: RedditConfig {
                channels: vec![
                    "CryptoCurrency".to_string(),
                    "Bitcoin".to_string(),
                    "ethereum".to_string(),
                ],
                max_posts_per_scan: 50,
                user_agent: "senti-bot/0.1".to_string(),
            },
            classifier: ClassifierConfig {
                provider: "keyword".to_string(),
                api_url: "https://api.anthropic.com".to_string(),
                model: "claude-3-5-sonnet-20241022".to_string(),
                max_posts_per_batch: 20,
            },
            signal: SignalConfig::default(),
            sizing: SizingConfig {
                account_balance: Decimal::from(10_000),
                max_position_pct: 0.1,
                confidence_baseline: 0.6,
            },
        }
    }
}
