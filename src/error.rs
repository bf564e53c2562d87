//! CLI-facing error: a message plus the process exit code it maps to.
//!
//! Library modules return their own `thiserror` enums; they are converted here
//! at the application boundary.

use crate::scrape::{FetchError, ScrapeError};
use crate::store::StoreError;

/// Exit codes, shared by every command.
pub mod exit {
    pub const INTERNAL: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const NO_RESULTS: u8 = 3;
    pub const SCRAPE_FAILED: u8 = 4;
    pub const SCRAPE_TIMEOUT: u8 = 5;
    pub const STORE: u8 = 6;
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(exit::INVALID_INPUT, message)
    }

    pub fn no_results(message: impl Into<String>) -> Self {
        Self::new(exit::NO_RESULTS, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        let code = match err {
            ScrapeError::Failed { .. } => exit::SCRAPE_FAILED,
            ScrapeError::Timeout(_) => exit::SCRAPE_TIMEOUT,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::new(exit::STORE, err.to_string())
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::new(exit::SCRAPE_FAILED, format!("Failed to set up HTTP client: {err}"))
    }
}
