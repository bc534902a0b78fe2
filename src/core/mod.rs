//! Core domain types for puzzles
//!
//! Pure data and derivations: no I/O, no randomness beyond id generation.

mod letters;
mod puzzle;

pub use letters::{LetterSet, MAX_OTHER_LETTERS, common_letter};
pub use puzzle::{Candidate, PuzzleId, PuzzleRecord, WordEntry};
