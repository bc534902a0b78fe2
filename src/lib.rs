//! Bee Jumble
//!
//! Keeps an XML archive of daily Spelling Bee answer sets scraped from
//! sbsolver.com and the NYT, and derives a public "jumbled" copy in which
//! every answer is scrambled.
//!
//! # Quick Start
//!
//! ```rust
//! use bee_jumble::archive::{Archive, MergeOutcome};
//! use bee_jumble::core::{Candidate, PuzzleRecord};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
//! let candidate = Candidate::new(date, "https://www.sbsolver.com/s/2520", vec!["eye".into(), "obey".into()]);
//! let record = PuzzleRecord::from_candidate(candidate).unwrap();
//! assert_eq!(record.letters.as_ref().unwrap().to_string(), "EBOY");
//!
//! let mut archive = Archive::new();
//! assert!(matches!(archive.try_add(record), MergeOutcome::Accepted(_)));
//! ```

// Sites, file names and tuning constants
pub mod config;

// Error types
pub mod error;

// Puzzle records and letter sets
pub mod core;

// Archive persistence and merge rules
pub mod archive;

// Scrambling for the public archive
pub mod jumble;

// Page fetching and parsing
pub mod scrape;

// Printable HTML pages
pub mod render;

// FTP publishing
pub mod publish;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
