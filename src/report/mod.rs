//! Terminal output: prize amounts, check summaries, result tables, station lists.

mod format;

pub use format::{
    format_check_summary, format_cleanup, format_prize_amount, format_results_table, format_stations,
};
