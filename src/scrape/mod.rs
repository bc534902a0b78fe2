//! Scraping puzzle pages into candidates

pub mod batch;
pub mod fetch;
pub mod nyt;
pub mod sbsolver;

pub use batch::{FetchResult, fetch_candidates, fetch_one};
pub use fetch::{HttpFetcher, PageFetcher};

use scraper::Selector;

/// Compile a selector from a literal in this module
///
/// # Panics
/// Panics if `css` is not a valid selector, which only a typo in the
/// literal can cause.
pub(crate) fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("selector literal is valid CSS")
}
