//! Error taxonomy
//!
//! Per-candidate failures (`FetchError`, `ParseError`, `RecordError`) are soft:
//! the batch skips the candidate and keeps going. `ArchiveError` aborts the
//! write path for the run. `PublishError` is reported per uploaded file.

use chrono::NaiveDate;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Network-level failure while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A fetched page did not have the expected shape
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{url}: no puzzle date on page")]
    MissingDate { url: String },
    #[error("{url}: unreadable puzzle date '{text}'")]
    BadDate { url: String, text: String },
    #[error("{url}: no answer words on page")]
    NoWords { url: String },
    #[error("{url}: no embedded game data")]
    MissingGameData { url: String },
    #[error("{url}: malformed game data: {reason}")]
    GameData { url: String, reason: String },
}

/// Either half of getting a candidate puzzle off the network
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A candidate could not be turned into a puzzle record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("puzzle for {date} has no words")]
    NoWords { date: NaiveDate },
    #[error("letter set is empty")]
    EmptyLetters,
}

/// Failure loading or persisting an archive file
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },
    #[error("archive {} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("archive {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode archive {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },
}

/// Failure handing a file to the upload collaborator
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("connection to {host} failed: {reason}")]
    Connect { host: String, reason: String },
    #[error("upload of {name} failed: {reason}")]
    Upload { name: String, reason: String },
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_error_mentions_path() {
        let err = ArchiveError::Corrupt {
            path: PathBuf::from("bees.xml"),
            reason: "unexpected end of document".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "archive bees.xml is corrupt: unexpected end of document"
        );
    }

    #[test]
    fn candidate_error_is_transparent() {
        let err = CandidateError::from(FetchError::Status {
            url: "https://example.test/s/1".to_string(),
            status: 404,
        });
        assert_eq!(err.to_string(), "https://example.test/s/1 returned HTTP 404");
    }
}
