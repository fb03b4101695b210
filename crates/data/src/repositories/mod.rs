//! Repositories, one per table.

mod paper_trade_repo;
mod post_repo;
mod signal_repo;

pub use paper_trade_repo::PaperTradeRepository;
pub use post_repo::PostRepository;
pub use signal_repo::SignalRepository;
