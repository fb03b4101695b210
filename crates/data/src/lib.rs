pub mod database;
pub mod models;
pub mod repositories;

pub use database::DatabaseClient;
pub use models::{AnalyzedPostRow, PaperTradeRow, SignalRow};
pub use repositories::{PaperTradeRepository, PostRepository, SignalRepository};
