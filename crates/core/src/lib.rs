pub mod config;
pub mod config_loader;
pub mod error;
pub mod position;
pub mod record;
pub mod signal;
pub mod sizing;
pub mod traits;

pub use config::{
    AppConfig, ClassifierConfig, DatabaseConfig, RedditConfig, ServerConfig, SignalConfig,
};
pub use config_loader::ConfigLoader;
pub use error::CoreError;
pub use position::{PaperPosition, PerformanceStats, PositionStatus};
pub use record::{RawPost, SentimentAnalysis, SentimentLabel, SentimentRecord};
pub use signal::{Signal, SignalType};
pub use sizing::{size_position, SizingConfig};
pub use traits::{ContentSource, SentimentClassifier};
