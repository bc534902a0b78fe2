//! Jumble command: refresh the public archive from the scraped one

use crate::archive::ArchiveStore;
use crate::error::ArchiveError;
use crate::jumble::{JumbleSummary, Scrambler, Shuffle, jumble_archive};
use tracing::info;

/// Load both archives, jumble what is new and save the target
///
/// A missing target starts empty. A corrupt one aborts the run untouched.
///
/// # Errors
/// Returns `ArchiveError::Missing` if the source archive does not exist, or
/// any load/save error of either archive.
pub fn run_jumble<S: Shuffle>(
    source: &ArchiveStore,
    target: &ArchiveStore,
    scrambler: &mut Scrambler<S>,
) -> Result<JumbleSummary, ArchiveError> {
    if !source.exists() {
        return Err(ArchiveError::Missing {
            path: source.path().to_path_buf(),
        });
    }

    let source_archive = source.load()?;
    let mut target_archive = target.load()?;

    let summary = jumble_archive(&source_archive, &mut target_archive, scrambler);
    target.save(&target_archive)?;
    info!(
        "jumbled {} new puzzles into {}",
        summary.jumbled,
        target.path().display()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Archive;
    use crate::archive::test_support::{date, record};
    use crate::jumble::RandomShuffle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::fs;
    use tempfile::tempdir;

    fn scrambler() -> Scrambler<RandomShuffle<StdRng>> {
        Scrambler::new(RandomShuffle::new(StdRng::seed_from_u64(3)))
    }

    #[test]
    fn writes_jumbled_archive() {
        let dir = tempdir().unwrap();
        let source = ArchiveStore::new(dir.path().join("bees.xml"));
        let target = ArchiveStore::new(dir.path().join("jumbledbees.xml"));

        let (archive, _) = Archive::from_records([record("2025-04-01", &["OBEY", "BEE"])]);
        source.save(&archive).unwrap();

        let summary = run_jumble(&source, &target, &mut scrambler()).unwrap();
        assert_eq!(summary.added, 1);

        let jumbled = target.load().unwrap();
        let puzzle = jumbled.get(date("2025-04-01")).unwrap();
        assert!(puzzle.jumbled);
        assert!(puzzle.words.iter().all(|w| w.original.is_some()));
    }

    #[test]
    fn missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let source = ArchiveStore::new(dir.path().join("bees.xml"));
        let target = ArchiveStore::new(dir.path().join("jumbledbees.xml"));

        let err = run_jumble(&source, &target, &mut scrambler()).unwrap_err();
        assert!(matches!(err, ArchiveError::Missing { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn corrupt_target_is_left_alone() {
        let dir = tempdir().unwrap();
        let source = ArchiveStore::new(dir.path().join("bees.xml"));
        let target = ArchiveStore::new(dir.path().join("jumbledbees.xml"));
        source
            .save(&Archive::from_records([record("2025-04-01", &["BEE"])]).0)
            .unwrap();
        fs::write(target.path(), "<spelling_bees><puzzle").unwrap();

        let err = run_jumble(&source, &target, &mut scrambler()).unwrap_err();
        assert!(matches!(err, ArchiveError::Corrupt { .. }));
        assert_eq!(fs::read_to_string(target.path()).unwrap(), "<spelling_bees><puzzle");
    }
}
