//! Scrape commands
//!
//! Every variant follows the same shape: work out which pages are worth
//! fetching, fetch them on the worker pool, then merge the candidates into
//! the archive one at a time in date order.

use crate::archive::{MergeOutcome, Merger};
use crate::core::{Candidate, PuzzleRecord};
use crate::error::{ArchiveError, ParseError};
use crate::scrape::{FetchResult, PageFetcher, fetch_candidates, fetch_one, nyt, sbsolver};
use anyhow::Result;
use chrono::{Days, NaiveDate};
use rustc_hash::FxHashSet;
use tracing::{info, warn};

/// Per-source tally of a scrape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub accepted: usize,
    pub duplicate_date: usize,
    pub same_letters: usize,
    /// Fetch, parse or record failures
    pub failed: usize,
    /// Pages not fetched because the archive already has them
    pub skipped_known: usize,
}

impl ScrapeSummary {
    /// Count one merge decision
    pub fn record(&mut self, outcome: &MergeOutcome) {
        match outcome {
            MergeOutcome::Accepted(_) => self.accepted += 1,
            MergeOutcome::RejectedDuplicateDate => self.duplicate_date += 1,
            MergeOutcome::RejectedSameLettersAsPrevious => self.same_letters += 1,
        }
    }

    /// Candidates that reached the merge engine
    #[must_use]
    pub const fn merged(&self) -> usize {
        self.accepted + self.duplicate_date + self.same_letters
    }
}

/// Result of a `scrape` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    pub sources: Vec<(&'static str, ScrapeSummary)>,
    /// Records that were given a puzzle id after the merge
    pub patched_ids: usize,
    /// Records in the archive afterwards
    pub total: usize,
}

/// What `scrape` should cover
#[derive(Debug, Clone, Copy)]
pub struct ScrapeOptions {
    pub today: NaiveDate,
    pub workers: usize,
    pub sbsolver: bool,
    pub nyt: bool,
}

/// sbsolver's current month plus today's NYT puzzle
///
/// # Errors
/// Returns an error if the worker pool cannot start or the archive cannot
/// be saved. Failed pages are counted, not returned.
pub fn run_scrape<F: PageFetcher>(
    merger: &mut Merger,
    fetcher: &F,
    options: &ScrapeOptions,
) -> Result<ScrapeReport> {
    let mut report = ScrapeReport::default();

    if options.sbsolver {
        let ids = sbsolver::month_ids(options.today);
        let summary = scrape_sbsolver_ids(merger, fetcher, &ids, options.workers)?;
        report.sources.push(("sbsolver", summary));
    }

    if options.nyt {
        let summary = scrape_nyt_today(merger, fetcher, options.today)?;
        report.sources.push(("nyt", summary));
    }

    report.patched_ids = merger.backfill_ids()?;
    report.total = merger.archive().len();
    Ok(report)
}

/// sbsolver pages for an inclusive id range, in either direction
///
/// # Errors
/// Returns an error if the worker pool cannot start or the archive cannot
/// be saved.
pub fn run_backfill<F: PageFetcher>(
    merger: &mut Merger,
    fetcher: &F,
    from_id: i64,
    to_id: i64,
    workers: usize,
) -> Result<ScrapeSummary> {
    let ids: Vec<i64> = if from_id <= to_id {
        (from_id..=to_id).collect()
    } else {
        (to_id..=from_id).rev().collect()
    };
    let summary = scrape_sbsolver_ids(merger, fetcher, &ids, workers)?;
    merger.backfill_ids()?;
    Ok(summary)
}

/// NYT dated pages for the last `days` days, today included
///
/// # Errors
/// Returns an error if the worker pool cannot start or the archive cannot
/// be saved.
pub fn run_harvest<F: PageFetcher>(
    merger: &mut Merger,
    fetcher: &F,
    today: NaiveDate,
    days: u32,
    workers: usize,
) -> Result<ScrapeSummary> {
    let mut skipped_known = 0;
    let urls: Vec<String> = (0..u64::from(days))
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .filter(|&date| {
            let known = merger.archive().contains(date);
            skipped_known += usize::from(known);
            !known
        })
        .map(nyt::dated_url)
        .collect();

    let parse = |url: &str, body: &str| {
        nyt::parse_page(url, body, nyt::date_from_url(url).unwrap_or(today))
    };
    let results = fetch_candidates(fetcher, &urls, workers, parse)?;

    let mut summary = merge_results(merger, results)?;
    summary.skipped_known = skipped_known;
    merger.backfill_ids()?;
    Ok(summary)
}

fn scrape_sbsolver_ids<F: PageFetcher>(
    merger: &mut Merger,
    fetcher: &F,
    ids: &[i64],
    workers: usize,
) -> Result<ScrapeSummary> {
    let known: FxHashSet<i64> = merger
        .archive()
        .urls()
        .into_iter()
        .filter_map(sbsolver::id_from_url)
        .collect();
    let urls: Vec<String> = ids
        .iter()
        .filter(|&&id| !known.contains(&id))
        .map(|&id| sbsolver::puzzle_url(id))
        .collect();
    info!(
        "sbsolver: {} pages to fetch, {} already archived",
        urls.len(),
        ids.len() - urls.len()
    );

    let results = fetch_candidates(fetcher, &urls, workers, sbsolver::parse_page)?;
    let mut summary = merge_results(merger, results)?;
    summary.skipped_known = ids.len() - urls.len();
    Ok(summary)
}

fn scrape_nyt_today<F: PageFetcher>(
    merger: &mut Merger,
    fetcher: &F,
    today: NaiveDate,
) -> Result<ScrapeSummary, ArchiveError> {
    if merger.archive().contains(today) {
        info!("nyt: {today} already archived");
        return Ok(ScrapeSummary {
            skipped_known: 1,
            ..ScrapeSummary::default()
        });
    }

    let url = nyt::today_url();
    let parse = |url: &str, body: &str| -> Result<Candidate, ParseError> {
        nyt::parse_page(url, body, today)
    };
    let result = fetch_one(fetcher, &url, parse);
    merge_results(merger, vec![(url, result)])
}

/// Merge fetched candidates oldest first, so each is checked against the
/// puzzle before it
fn merge_results(
    merger: &mut Merger,
    results: Vec<FetchResult>,
) -> Result<ScrapeSummary, ArchiveError> {
    let mut summary = ScrapeSummary::default();
    let mut records = Vec::with_capacity(results.len());

    for (url, result) in results {
        let record = result.map_err(|err| err.to_string()).and_then(|candidate| {
            PuzzleRecord::from_candidate(candidate).map_err(|err| err.to_string())
        });
        match record {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!("skipping {url}: {reason}");
                summary.failed += 1;
            }
        }
    }

    records.sort_by_key(|record| record.date);
    for record in records {
        let outcome = merger.try_add(record)?;
        summary.record(&outcome);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveStore;
    use crate::archive::test_support::date;
    use crate::scrape::fetch::fake::CannedFetcher;
    use tempfile::tempdir;

    fn sbsolver_page(day: &str, words: &[&str]) -> String {
        let rows: String = words
            .iter()
            .map(|w| format!("<tr><td class=\"bee-hover\">{w}</td></tr>"))
            .collect();
        format!(
            "<span class=\"bee-date\">Spelling Bee for {day}</span>\
             <table class=\"bee-set\">{rows}</table>"
        )
    }

    fn nyt_page(print_date: &str, words: &[&str]) -> String {
        let answers: Vec<String> = words.iter().map(|w| format!("\"{w}\"")).collect();
        format!(
            "<script>window.gameData = {{\"today\":{{\"printDate\":\"{print_date}\",\
             \"answers\":[{}]}}}}</script>",
            answers.join(",")
        )
    }

    fn open(dir: &tempfile::TempDir) -> Merger {
        Merger::open(ArchiveStore::new(dir.path().join("bees.xml"))).unwrap()
    }

    #[test]
    fn scrape_merges_month_in_date_order() {
        let dir = tempdir().unwrap();
        let mut merger = open(&dir);
        let fetcher = CannedFetcher::default()
            .with(sbsolver::puzzle_url(2520), sbsolver_page("April 1, 2025", &["eye", "obey"]))
            .with(sbsolver::puzzle_url(2521), sbsolver_page("April 2, 2025", &["bye", "eye", "obey"]))
            .with(sbsolver::puzzle_url(2522), sbsolver_page("April 3, 2025", &["hive", "hie"]))
            .with(nyt::today_url(), nyt_page("2025-04-03", &["hive", "hie"]));

        let options = ScrapeOptions {
            today: date("2025-04-03"),
            workers: 3,
            sbsolver: true,
            nyt: true,
        };
        let report = run_scrape(&mut merger, &fetcher, &options).unwrap();

        let (_, sb) = report.sources[0];
        // April 2 repeats April 1's letters (EBOY) and is skipped
        assert_eq!(sb.accepted, 2);
        assert_eq!(sb.same_letters, 1);
        assert_eq!(report.sources[1].1.skipped_known, 1);
        assert_eq!(report.total, 2);

        let reloaded = ArchiveStore::new(dir.path().join("bees.xml")).load().unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.iter().all(|r| r.puzzle_id.is_some()));
    }

    #[test]
    fn failed_pages_are_counted_and_skipped() {
        let dir = tempdir().unwrap();
        let mut merger = open(&dir);
        let fetcher = CannedFetcher::default()
            .with(sbsolver::puzzle_url(2520), sbsolver_page("April 1, 2025", &["bee"]))
            .with(sbsolver::puzzle_url(2521), "<html>maintenance</html>");

        let options = ScrapeOptions {
            today: date("2025-04-03"),
            workers: 2,
            sbsolver: true,
            nyt: false,
        };
        let report = run_scrape(&mut merger, &fetcher, &options).unwrap();

        let (name, sb) = report.sources[0];
        assert_eq!(name, "sbsolver");
        assert_eq!(sb.accepted, 1);
        // 2521 does not parse, 2522 is not served
        assert_eq!(sb.failed, 2);
        assert_eq!(report.sources.len(), 1);
    }

    #[test]
    fn known_ids_are_not_refetched() {
        let dir = tempdir().unwrap();
        let mut merger = open(&dir);
        let fetcher = CannedFetcher::default()
            .with(sbsolver::puzzle_url(2520), sbsolver_page("April 1, 2025", &["bee"]));

        let first = run_backfill(&mut merger, &fetcher, 2520, 2520, 1).unwrap();
        assert_eq!(first.accepted, 1);

        let second = run_backfill(&mut merger, &fetcher, 2520, 2520, 1).unwrap();
        assert_eq!(second.skipped_known, 1);
        assert_eq!(second.merged(), 0);
    }

    #[test]
    fn backfill_accepts_reversed_range() {
        let dir = tempdir().unwrap();
        let mut merger = open(&dir);
        let fetcher = CannedFetcher::default()
            .with(sbsolver::puzzle_url(2520), sbsolver_page("April 1, 2025", &["bee"]))
            .with(sbsolver::puzzle_url(2521), sbsolver_page("April 2, 2025", &["hive"]));

        let summary = run_backfill(&mut merger, &fetcher, 2521, 2520, 2).unwrap();
        assert_eq!(summary.accepted, 2);
        assert_eq!(merger.archive().len(), 2);
    }

    #[test]
    fn harvest_walks_back_and_skips_known_days() {
        let dir = tempdir().unwrap();
        let mut merger = open(&dir);
        let fetcher = CannedFetcher::default()
            .with(nyt::dated_url(date("2025-04-02")), nyt_page("2025-04-02", &["bee"]))
            .with(nyt::dated_url(date("2025-04-03")), nyt_page("2025-04-03", &["hive"]));

        let first = run_harvest(&mut merger, &fetcher, date("2025-04-03"), 3, 2).unwrap();
        assert_eq!(first.accepted, 2);
        // 2025-04-01 is not served
        assert_eq!(first.failed, 1);

        let second = run_harvest(&mut merger, &fetcher, date("2025-04-03"), 3, 2).unwrap();
        assert_eq!(second.skipped_known, 2);
        assert_eq!(second.accepted, 0);
    }

    #[test]
    fn duplicate_dates_within_a_batch_keep_the_first() {
        let dir = tempdir().unwrap();
        let mut merger = open(&dir);
        let fetcher = CannedFetcher::default()
            .with(sbsolver::puzzle_url(2520), sbsolver_page("April 1, 2025", &["bee"]))
            .with(sbsolver::puzzle_url(2521), sbsolver_page("April 1, 2025", &["hive"]));

        let summary = run_backfill(&mut merger, &fetcher, 2520, 2521, 2).unwrap();
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.duplicate_date, 1);
    }
}
