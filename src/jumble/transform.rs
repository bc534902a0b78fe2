//! Archive-to-archive jumbling
//!
//! Keeps the public jumbled archive in step with the source archive: new
//! puzzles are copied over and scrambled, puzzles already jumbled are left
//! alone apart from backfilling missing `original_word` values.

use super::scramble::{Scrambler, Shuffle};
use crate::archive::Archive;
use crate::core::PuzzleRecord;
use tracing::debug;

/// Counts from one jumble pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumbleSummary {
    /// Puzzles copied from the source archive
    pub added: usize,
    /// Puzzles scrambled in this pass
    pub jumbled: usize,
    /// Words that got a missing `original_word` filled in
    pub patched_originals: usize,
    /// Puzzles in the jumbled archive afterwards
    pub total: usize,
}

/// Bring `target` up to date with `source`
pub fn jumble_archive<S: Shuffle>(
    source: &Archive,
    target: &mut Archive,
    scrambler: &mut Scrambler<S>,
) -> JumbleSummary {
    let mut summary = JumbleSummary::default();

    for record in source.iter() {
        if target.insert_new(record.clone()) {
            summary.added += 1;
        }
    }

    for record in target.iter_mut() {
        let originals: Vec<String> = source
            .get(record.date)
            .map(|src| src.word_texts().map(str::to_string).collect())
            .unwrap_or_default();

        if record.jumbled {
            summary.patched_originals += backfill_originals(record, &originals);
        } else {
            jumble_record(record, &originals, scrambler);
            summary.jumbled += 1;
        }
    }

    summary.total = target.len();
    summary
}

/// Original of the word at `idx`: the source word at the same position, or
/// the word's own text when the source has none
fn original_at(record: &PuzzleRecord, originals: &[String], idx: usize) -> String {
    originals
        .get(idx)
        .cloned()
        .unwrap_or_else(|| record.words[idx].text.clone())
}

fn jumble_record<S: Shuffle>(
    record: &mut PuzzleRecord,
    originals: &[String],
    scrambler: &mut Scrambler<S>,
) {
    let sources: Vec<String> = (0..record.words.len())
        .map(|idx| original_at(record, originals, idx))
        .collect();
    let scrambled = scrambler.scramble_batch(&sources);

    for ((word, original), text) in record.words.iter_mut().zip(sources).zip(scrambled) {
        word.text = text;
        word.original = Some(original);
    }

    record.words.sort_by(|a, b| {
        a.length
            .cmp(&b.length)
            .then_with(|| a.text.to_lowercase().cmp(&b.text.to_lowercase()))
    });
    record.jumbled = true;
    debug!("jumbled {}", record.date);
}

fn backfill_originals(record: &mut PuzzleRecord, originals: &[String]) -> usize {
    let missing: Vec<usize> = record
        .words
        .iter()
        .enumerate()
        .filter(|(_, word)| word.original.is_none())
        .map(|(idx, _)| idx)
        .collect();

    for &idx in &missing {
        let original = original_at(record, originals, idx);
        record.words[idx].original = Some(original);
    }
    missing.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::test_support::{date, record};
    use crate::jumble::scramble::RandomShuffle;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scrambler() -> Scrambler<RandomShuffle<StdRng>> {
        Scrambler::new(RandomShuffle::new(StdRng::seed_from_u64(11)))
    }

    fn source() -> Archive {
        Archive::from_records([
            record("2025-04-01", &["OBEY", "BEE"]),
            record("2025-04-02", &["CAT", "TACT", "ACT"]),
        ])
        .0
    }

    #[test]
    fn copies_and_jumbles_new_puzzles() {
        let source = source();
        let mut target = Archive::new();

        let summary = jumble_archive(&source, &mut target, &mut scrambler());
        assert_eq!(
            summary,
            JumbleSummary {
                added: 2,
                jumbled: 2,
                patched_originals: 0,
                total: 2,
            }
        );

        for record in target.iter() {
            assert!(record.jumbled);
            let src = source.get(record.date).unwrap();
            assert_eq!(record.puzzle_id, src.puzzle_id);
            assert_eq!(record.letters, src.letters);

            let mut originals: Vec<&str> =
                record.words.iter().map(|w| w.original.as_deref().unwrap()).collect();
            let mut expected: Vec<&str> = src.word_texts().collect();
            originals.sort_unstable();
            expected.sort_unstable();
            assert_eq!(originals, expected);

            for word in &record.words {
                assert_ne!(Some(word.text.as_str()), word.original.as_deref());
            }
        }
    }

    #[test]
    fn jumbled_words_are_sorted_by_length_then_text() {
        let source = source();
        let mut target = Archive::new();
        jumble_archive(&source, &mut target, &mut scrambler());

        let record = target.get(date("2025-04-02")).unwrap();
        let keys: Vec<(usize, String)> = record
            .words
            .iter()
            .map(|w| (w.length, w.text.to_lowercase()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(record.words.last().unwrap().length, 4);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let source = source();
        let mut target = Archive::new();
        jumble_archive(&source, &mut target, &mut scrambler());
        let first = target.clone();

        let summary = jumble_archive(&source, &mut target, &mut scrambler());
        assert_eq!(summary.added, 0);
        assert_eq!(summary.jumbled, 0);
        assert_eq!(summary.patched_originals, 0);
        assert_eq!(target, first);
    }

    #[test]
    fn only_new_puzzles_are_jumbled() {
        let mut source = source();
        let mut target = Archive::new();
        jumble_archive(&source, &mut target, &mut scrambler());

        source.try_add(record("2025-04-03", &["HONEY", "HONE"]));
        let summary = jumble_archive(&source, &mut target, &mut scrambler());

        assert_eq!(summary.added, 1);
        assert_eq!(summary.jumbled, 1);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn backfills_missing_originals_without_rescrambling() {
        let source = source();
        let mut stale = record("2025-04-01", &["EYOB", "EEB"]);
        stale.jumbled = true;
        let mut target = Archive::from_records([stale]).0;

        let summary = jumble_archive(&source, &mut target, &mut scrambler());
        assert_eq!(summary.patched_originals, 2);

        let patched = target.get(date("2025-04-01")).unwrap();
        assert_eq!(patched.word_texts().collect::<Vec<_>>(), ["EYOB", "EEB"]);
        assert_eq!(patched.words[0].original.as_deref(), Some("OBEY"));
        assert_eq!(patched.words[1].original.as_deref(), Some("BEE"));
    }

    #[test]
    fn puzzles_missing_from_source_use_their_own_words() {
        let orphan = record("2025-03-01", &["HIVE"]);
        let mut target = Archive::from_records([orphan]).0;

        jumble_archive(&Archive::new(), &mut target, &mut scrambler());

        let word = &target.get(date("2025-03-01")).unwrap().words[0];
        assert_eq!(word.original.as_deref(), Some("HIVE"));
        assert_ne!(word.text, "HIVE");
    }
}
