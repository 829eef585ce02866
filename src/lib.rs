/// Bible Recap Seed Toolkit - Rust Implementation
///
/// Command-line utilities that build the reading-plan seed dataset for a
/// Bible-reading application from The Bible Recap YouTube playlist.

pub mod config;
pub mod fetcher;
pub mod plan;
pub mod scrape;

// Re-export main types for easy access
pub use crate::config::{Config, ConfigBuilder};
pub use crate::fetcher::{PlaylistFetcher, VideoEntry};
pub use crate::plan::{DayRecord, Passage, PlanData, PlanParser, ReadingDay};
pub use crate::scrape::PageScraper;
