//! Merge engine
//!
//! Decides whether a new puzzle belongs in the archive. A candidate is turned
//! away when its date is already archived, or when it has exactly the letters
//! of the puzzle right before it (a "no-op day").

use super::{Archive, ArchiveStore};
use crate::core::{PuzzleId, PuzzleRecord};
use crate::error::ArchiveError;
use tracing::{debug, info};

/// What happened to a record offered to the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Inserted under this id
    Accepted(PuzzleId),
    /// A puzzle with this date is already archived
    RejectedDuplicateDate,
    /// Same letters as the chronologically preceding puzzle
    RejectedSameLettersAsPrevious,
}

impl MergeOutcome {
    #[inline]
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

impl Archive {
    /// Offer a record to the archive
    ///
    /// Existing records are never overwritten. An accepted record keeps its id
    /// if it already has one, otherwise a fresh id is generated.
    pub fn try_add(&mut self, mut record: PuzzleRecord) -> MergeOutcome {
        if self.contains(record.date) {
            return MergeOutcome::RejectedDuplicateDate;
        }

        if let Some(letters) = &record.letters
            && let Some(previous) = self.predecessor(record.date)
            && previous.letters.as_ref() == Some(letters)
        {
            return MergeOutcome::RejectedSameLettersAsPrevious;
        }

        let id = record.ensure_id().clone();
        self.insert_new(record);
        MergeOutcome::Accepted(id)
    }
}

/// An archive bound to its file, persisting every accepted insert
pub struct Merger {
    store: ArchiveStore,
    archive: Archive,
}

impl Merger {
    /// Load the archive behind `store`
    ///
    /// # Errors
    /// Fails if the file exists but cannot be read. The file is left untouched;
    /// nothing is written through a merger that failed to open.
    pub fn open(store: ArchiveStore) -> Result<Self, ArchiveError> {
        let archive = store.load()?;
        debug!(
            "opened {} with {} puzzle(s)",
            store.path().display(),
            archive.len()
        );
        Ok(Self { store, archive })
    }

    #[must_use]
    pub const fn archive(&self) -> &Archive {
        &self.archive
    }

    #[must_use]
    pub const fn store(&self) -> &ArchiveStore {
        &self.store
    }

    /// Offer a record and save immediately if it was accepted
    ///
    /// # Errors
    /// Returns an error if the archive could not be written.
    pub fn try_add(&mut self, record: PuzzleRecord) -> Result<MergeOutcome, ArchiveError> {
        let date = record.date;
        let outcome = self.archive.try_add(record);
        match &outcome {
            MergeOutcome::Accepted(id) => {
                self.store.save(&self.archive)?;
                info!("added puzzle {date} ({id})");
            }
            MergeOutcome::RejectedDuplicateDate => debug!("{date} already archived"),
            MergeOutcome::RejectedSameLettersAsPrevious => {
                info!("skipping {date}: same letters as the previous puzzle");
            }
        }
        Ok(outcome)
    }

    /// Assign ids to records stored without one, saving if any were patched
    ///
    /// # Errors
    /// Returns an error if the archive could not be written.
    pub fn backfill_ids(&mut self) -> Result<usize, ArchiveError> {
        let patched = self.archive.backfill_ids();
        if patched > 0 {
            self.store.save(&self.archive)?;
            info!("patched {patched} puzzle(s) with a missing id");
        }
        Ok(patched)
    }

    #[must_use]
    pub fn into_archive(self) -> Archive {
        self.archive
    }
}
