//! Puzzle archive
//!
//! The archive is an ordered, date-keyed collection of puzzle records. The
//! [`store`] module persists it as XML; the [`merge`] module decides what may
//! be added to it.

pub mod merge;
pub mod store;

pub use merge::{MergeOutcome, Merger};
pub use store::ArchiveStore;

use crate::core::PuzzleRecord;
use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

/// Records keyed by date, always in ascending date order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    records: BTreeMap<NaiveDate, PuzzleRecord>,
}

impl Archive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an archive, keeping the first record seen for each date
    ///
    /// Returns the archive and the number of duplicate records dropped.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = PuzzleRecord>) -> (Self, usize) {
        let mut archive = Self::new();
        let mut dropped = 0;
        for record in records {
            if !archive.insert_new(record) {
                dropped += 1;
            }
        }
        (archive, dropped)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.records.contains_key(&date)
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&PuzzleRecord> {
        self.records.get(&date)
    }

    /// Records in ascending date order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PuzzleRecord> {
        self.records.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PuzzleRecord> {
        self.records.values_mut()
    }

    /// Latest record strictly before `date`
    #[must_use]
    pub fn predecessor(&self, date: NaiveDate) -> Option<&PuzzleRecord> {
        self.records.range(..date).next_back().map(|(_, record)| record)
    }

    /// Most recent record
    #[must_use]
    pub fn latest(&self) -> Option<&PuzzleRecord> {
        self.records.values().next_back()
    }

    /// Source URLs of every record
    #[must_use]
    pub fn urls(&self) -> FxHashSet<&str> {
        self.records.values().map(|r| r.url.as_str()).collect()
    }

    /// Assign ids to records stored without one
    ///
    /// Returns the number of records patched.
    pub fn backfill_ids(&mut self) -> usize {
        let mut patched = 0;
        for record in self.records.values_mut() {
            if record.puzzle_id.is_none() {
                record.ensure_id();
                patched += 1;
            }
        }
        patched
    }

    /// Insert a record unless its date is taken; never overwrites
    pub(crate) fn insert_new(&mut self, record: PuzzleRecord) -> bool {
        if self.records.contains_key(&record.date) {
            return false;
        }
        self.records.insert(record.date, record);
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::{Candidate, PuzzleRecord};
    use chrono::NaiveDate;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn record(day: &str, words: &[&str]) -> PuzzleRecord {
        PuzzleRecord::from_candidate(Candidate::new(
            date(day),
            format!("https://example.test/{day}"),
            words.iter().map(ToString::to_string).collect(),
        ))
        .unwrap()
    }
}
