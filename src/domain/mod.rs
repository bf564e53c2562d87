//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - prize tiers and their static configuration (`PrizeCategory`, `PRIZE_CONFIGS`)
//! - scraped rows and match outputs (`PrizeRecord`, `MatchResult`, `MatchOutcome`)
//! - the southern station catalog (`station`)
//! - draw date parsing (`date`)
//! - accent and case folding for label and station matching (`normalize`)

pub mod date;
pub mod normalize;
pub mod station;
pub mod types;

pub use date::*;
pub use station::Station;
pub use types::*;
