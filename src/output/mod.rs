//! Terminal output formatting
//!
//! Colored summaries for command results.

pub mod display;
pub mod formatters;

pub use display::{
    print_jumble_summary, print_latest, print_publish_summary, print_render_result,
    print_scrape_report, print_scrape_summary,
};
