//! `xoso-check` library crate.
//!
//! The binary (`xoso`) is a thin wrapper around this library so that:
//!
//! - scraping, extraction and matching are testable without spawning processes
//! - the store and fetcher sit behind traits and can be swapped in tests

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scrape;
pub mod store;
