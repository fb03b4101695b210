pub mod tracker;

pub use tracker::PaperPositionTracker;
