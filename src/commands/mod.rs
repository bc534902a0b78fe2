//! Command implementations

pub mod jumble;
pub mod latest;
pub mod publish;
pub mod render;
pub mod scrape;

pub use jumble::run_jumble;
pub use latest::{LatestPuzzle, latest_puzzle, play_link};
pub use publish::run_publish;
pub use render::{RenderResult, run_render};
pub use scrape::{
    ScrapeOptions, ScrapeReport, ScrapeSummary, run_backfill, run_harvest, run_scrape,
};
