//! Printable HTML for jumbled puzzles

pub mod html;
pub mod index;

pub use html::{JumblePage, long_date, page_file_name, render_page};
pub use index::link_page;
