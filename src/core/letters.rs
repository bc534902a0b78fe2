//! Letter-set derivation
//!
//! A puzzle is identified by its letters: the common letter shared by every
//! answer, followed by up to six other letters in alphabetical order.

use crate::error::RecordError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Maximum number of letters after the common one
pub const MAX_OTHER_LETTERS: usize = 6;

/// Ordered letters of a puzzle, common letter first
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LetterSet {
    letters: Vec<char>,
}

impl LetterSet {
    /// Derive the letter set of a word list
    ///
    /// Returns `None` when no letter is shared by every fully-alphabetic word,
    /// or when there is no such word at all.
    ///
    /// # Examples
    /// ```
    /// use bee_jumble::core::LetterSet;
    ///
    /// let letters = LetterSet::derive(&["eye", "obey"]).unwrap();
    /// assert_eq!(letters.to_string(), "EBOY");
    ///
    /// assert!(LetterSet::derive(&["cat", "dog"]).is_none());
    /// ```
    #[must_use]
    pub fn derive<S: AsRef<str>>(words: &[S]) -> Option<Self> {
        let words: Vec<String> = words.iter().map(|w| w.as_ref().to_uppercase()).collect();
        let common = common_letter(&words)?;

        // Words left out of the intersection still contribute their letters here
        let others: BTreeSet<char> = words
            .iter()
            .flat_map(|w| w.chars())
            .filter(|&c| c.is_alphabetic() && c != common)
            .collect();

        let mut letters = Vec::with_capacity(1 + MAX_OTHER_LETTERS);
        letters.push(common);
        letters.extend(others.into_iter().take(MAX_OTHER_LETTERS));
        Some(Self { letters })
    }

    /// The letter every answer contains
    #[inline]
    #[must_use]
    pub fn common(&self) -> char {
        self.letters[0]
    }

    /// Letters after the common one
    #[inline]
    #[must_use]
    pub fn others(&self) -> &[char] {
        &self.letters[1..]
    }

    /// All letters, common letter first
    #[inline]
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of words starting with each letter, in letter order
    #[must_use]
    pub fn initial_counts<S: AsRef<str>>(&self, words: &[S]) -> Vec<u32> {
        self.letters
            .iter()
            .map(|&letter| {
                words
                    .iter()
                    .filter(|w| w.as_ref().chars().next() == Some(letter))
                    .count() as u32
            })
            .collect()
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Parses a stored `letters` attribute verbatim
impl FromStr for LetterSet {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.chars().collect();
        if letters.is_empty() {
            return Err(RecordError::EmptyLetters);
        }
        Ok(Self { letters })
    }
}

/// Alphabetically smallest letter present in every fully-alphabetic word
///
/// Expects uppercased words.
#[must_use]
pub fn common_letter(words: &[String]) -> Option<char> {
    let mut sets = words
        .iter()
        .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
        .map(|w| w.chars().collect::<BTreeSet<char>>());

    let first = sets.next()?;
    let shared = sets.fold(first, |acc, set| acc.intersection(&set).copied().collect());
    shared.first().copied()
}
