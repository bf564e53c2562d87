//! Result acquisition from third-party results sites.
//!
//! - HTTP fetching with a rotating User-Agent (`fetcher`)
//! - per-site table extraction (`extract`)
//! - primary/fallback orchestration under a deadline (`orchestrator`)

pub mod extract;
pub mod fetcher;
pub mod orchestrator;

pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use orchestrator::{ScrapeError, Scraper, Source};
