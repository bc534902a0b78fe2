//! Puzzle records
//!
//! A [`Candidate`] is what a scraper hands over; a [`PuzzleRecord`] is what the
//! archive stores once the candidate has been validated and its letter
//! metadata derived.

use super::letters::LetterSet;
use crate::error::RecordError;
use chrono::NaiveDate;
use std::fmt;
use uuid::Uuid;

/// Stable opaque puzzle identifier
///
/// Generated ids are UUID v4 strings; ids loaded from an archive are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleId(String);

impl PuzzleId {
    /// Generate a fresh identifier
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PuzzleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One answer word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    /// Uppercase text; the scrambled form in a jumbled archive
    pub text: String,
    /// Stored for display, never re-validated
    pub length: usize,
    /// Source word, only set in a jumbled archive
    pub original: Option<String>,
}

impl WordEntry {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into().to_uppercase();
        let length = text.chars().count();
        Self {
            text,
            length,
            original: None,
        }
    }
}

/// A scraped puzzle, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub date: NaiveDate,
    pub url: String,
    pub words: Vec<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(date: NaiveDate, url: impl Into<String>, words: Vec<String>) -> Self {
        Self {
            date,
            url: url.into(),
            words,
        }
    }
}

/// One archived puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRecord {
    pub date: NaiveDate,
    pub url: String,
    pub puzzle_id: Option<PuzzleId>,
    pub letters: Option<LetterSet>,
    pub words: Vec<WordEntry>,
    /// Words starting with each of `letters`, in letter order
    pub letter_counts: Vec<u32>,
    pub jumbled: bool,
}

impl PuzzleRecord {
    /// Validate a candidate and derive its letter metadata
    ///
    /// Words are trimmed and uppercased; blank words are dropped. The record has
    /// no id yet, one is assigned when the archive accepts it.
    ///
    /// # Errors
    /// Returns `RecordError::NoWords` if no non-blank word remains.
    pub fn from_candidate(candidate: Candidate) -> Result<Self, RecordError> {
        let words: Vec<WordEntry> = candidate
            .words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(WordEntry::new)
            .collect();

        if words.is_empty() {
            return Err(RecordError::NoWords {
                date: candidate.date,
            });
        }

        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        let letters = LetterSet::derive(&texts);
        let letter_counts = letters
            .as_ref()
            .map(|set| set.initial_counts(&texts))
            .unwrap_or_default();

        Ok(Self {
            date: candidate.date,
            url: candidate.url,
            puzzle_id: None,
            letters,
            words,
            letter_counts,
            jumbled: false,
        })
    }

    /// Word texts in stored order
    pub fn word_texts(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.text.as_str())
    }

    /// Assign an id if the record has none, returning the record's id
    pub fn ensure_id(&mut self) -> &PuzzleId {
        self.puzzle_id.get_or_insert_with(PuzzleId::generate)
    }
}
