//! Word scrambling
//!
//! Randomness comes through the [`Shuffle`] trait: production code shuffles
//! with the thread RNG, tests plug in seeded or non-permuting sources.

use crate::config::SCRAMBLE_ATTEMPTS;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

/// Source of letter permutations
pub trait Shuffle {
    /// Permute `letters` in place
    fn shuffle(&mut self, letters: &mut [char]);
}

/// Shuffle backed by a `rand` generator
pub struct RandomShuffle<R> {
    rng: R,
}

impl RandomShuffle<ThreadRng> {
    /// Unseeded shuffle; scrambles differ from run to run
    #[must_use]
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RandomShuffle<R> {
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffle for RandomShuffle<R> {
    fn shuffle(&mut self, letters: &mut [char]) {
        letters.shuffle(&mut self.rng);
    }
}

/// Scrambles the words of one puzzle at a time
pub struct Scrambler<S> {
    source: S,
    max_attempts: usize,
}

impl<S: Shuffle> Scrambler<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            max_attempts: SCRAMBLE_ATTEMPTS,
        }
    }

    /// Override the shuffle bound
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Scramble a batch of words, output in input order
    ///
    /// Each scramble avoids every input word and every scramble already
    /// produced in the batch. After `max_attempts` shuffles without such a
    /// permutation the word is reversed instead, even if the reversal
    /// collides (e.g. `"AA"`). Words of zero or one character come back as-is.
    pub fn scramble_batch(&mut self, words: &[String]) -> Vec<String> {
        let originals: FxHashSet<&str> = words.iter().map(String::as_str).collect();
        let mut emitted: FxHashSet<String> = FxHashSet::default();
        let mut scrambled = Vec::with_capacity(words.len());

        for word in words {
            let result = self.scramble_word(word, &originals, &emitted);
            emitted.insert(result.clone());
            scrambled.push(result);
        }
        scrambled
    }

    fn scramble_word(
        &mut self,
        word: &str,
        originals: &FxHashSet<&str>,
        emitted: &FxHashSet<String>,
    ) -> String {
        let mut letters: Vec<char> = word.chars().collect();
        if letters.len() <= 1 {
            return word.to_string();
        }

        for _ in 0..self.max_attempts {
            self.source.shuffle(&mut letters);
            let candidate: String = letters.iter().collect();
            if candidate != word
                && !originals.contains(candidate.as_str())
                && !emitted.contains(&candidate)
            {
                return candidate;
            }
        }

        word.chars().rev().collect()
    }
}
