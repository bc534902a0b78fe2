//! Jumbled (scrambled) puzzles for public display

pub mod scramble;
pub mod transform;

pub use scramble::{RandomShuffle, Scrambler, Shuffle};
pub use transform::{JumbleSummary, jumble_archive};
