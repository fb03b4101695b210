//! Content sources that produce raw posts for classification.

mod reddit;
mod static_posts;

pub use reddit::{RedditCollector, RedditCollectorConfig};
pub use static_posts::StaticCollector;
