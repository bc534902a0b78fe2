//! Latest puzzle lookup

use crate::archive::Archive;
use crate::config::PLAY_URL;
use crate::core::PuzzleId;
use chrono::NaiveDate;

/// Newest puzzle that can be played online
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestPuzzle {
    pub id: PuzzleId,
    pub date: NaiveDate,
    pub link: String,
}

/// Play link for a puzzle id
#[must_use]
pub fn play_link(id: &PuzzleId) -> String {
    format!("{PLAY_URL}?puzzleid={id}")
}

/// Newest record that carries a puzzle id
#[must_use]
pub fn latest_puzzle(archive: &Archive) -> Option<LatestPuzzle> {
    archive.iter().rev().find_map(|record| {
        record.puzzle_id.as_ref().map(|id| LatestPuzzle {
            id: id.clone(),
            date: record.date,
            link: play_link(id),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::test_support::{date, record};

    #[test]
    fn picks_newest_record_with_an_id() {
        let mut older = record("2025-04-01", &["BEE"]);
        older.puzzle_id = Some(PuzzleId::from("abc".to_string()));
        let newer = record("2025-04-02", &["HIVE"]);
        let (archive, _) = Archive::from_records([newer, older]);

        let latest = latest_puzzle(&archive).unwrap();
        assert_eq!(latest.date, date("2025-04-01"));
        assert_eq!(latest.id.as_str(), "abc");
        assert_eq!(
            latest.link,
            "https://tii.ezv.temporary.site/beejumble?puzzleid=abc"
        );
    }

    #[test]
    fn none_without_ids() {
        assert!(latest_puzzle(&Archive::new()).is_none());
        let (archive, _) = Archive::from_records([record("2025-04-01", &["BEE"])]);
        assert!(latest_puzzle(&archive).is_none());
    }
}
