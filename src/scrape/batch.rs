//! Bounded concurrent fetching
//!
//! Fetch and parse run on a dedicated rayon pool of `workers` threads.
//! Results come back in input order with the URL attached. Merging happens
//! afterwards, on the caller's thread.

use super::fetch::PageFetcher;
use crate::core::Candidate;
use crate::error::{CandidateError, ParseError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

/// Outcome for one URL
pub type FetchResult = (String, Result<Candidate, CandidateError>);

/// Fetch and parse one page
///
/// # Errors
/// Returns `CandidateError` if the fetch or the parse fails.
pub fn fetch_one<F, P>(fetcher: &F, url: &str, parse: P) -> Result<Candidate, CandidateError>
where
    F: PageFetcher + ?Sized,
    P: Fn(&str, &str) -> Result<Candidate, ParseError>,
{
    let body = fetcher.fetch(url)?;
    Ok(parse(url, &body)?)
}

/// Fetch and parse every URL with at most `workers` requests in flight
///
/// # Errors
/// Returns an error only if the worker pool cannot be created. Per-URL
/// failures are reported in the returned list.
pub fn fetch_candidates<F, P>(
    fetcher: &F,
    urls: &[String],
    workers: usize,
    parse: P,
) -> Result<Vec<FetchResult>, ThreadPoolBuildError>
where
    F: PageFetcher + ?Sized,
    P: Fn(&str, &str) -> Result<Candidate, ParseError> + Sync,
{
    if urls.is_empty() {
        return Ok(Vec::new());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()?;
    debug!("fetching {} pages on {} workers", urls.len(), workers.max(1));

    let progress = progress_bar(urls.len() as u64);
    let results = pool.install(|| {
        urls.par_iter()
            .map(|url| {
                let result = fetch_one(fetcher, url, &parse);
                progress.inc(1);
                (url.clone(), result)
            })
            .collect()
    });
    progress.finish_and_clear();

    Ok(results)
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::fetch::fake::CannedFetcher;
    use crate::scrape::sbsolver;

    fn page(day: &str, words: &[&str]) -> String {
        let rows: String = words
            .iter()
            .map(|w| format!("<tr><td class=\"bee-hover\">{w}</td></tr>"))
            .collect();
        format!(
            "<span class=\"bee-date\">Spelling Bee for {day}</span>\
             <table class=\"bee-set\">{rows}</table>"
        )
    }

    #[test]
    fn results_keep_input_order_and_urls() {
        let fetcher = CannedFetcher::default()
            .with("a", page("April 1, 2025", &["bee"]))
            .with("c", page("April 3, 2025", &["hive"]));
        let urls: Vec<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();

        let results = fetch_candidates(&fetcher, &urls, 2, sbsolver::parse_page).unwrap();

        let seen: Vec<&str> = results.iter().map(|(url, _)| url.as_str()).collect();
        assert_eq!(seen, ["a", "b", "c"]);
        assert_eq!(results[0].1.as_ref().unwrap().words, ["BEE"]);
        assert!(matches!(results[1].1, Err(CandidateError::Fetch(_))));
        assert_eq!(results[2].1.as_ref().unwrap().words, ["HIVE"]);
    }

    #[test]
    fn parse_failures_are_reported_per_url() {
        let fetcher = CannedFetcher::default().with("a", "<html></html>");
        let results =
            fetch_candidates(&fetcher, &["a".to_string()], 1, sbsolver::parse_page).unwrap();
        assert!(matches!(results[0].1, Err(CandidateError::Parse(_))));
    }

    #[test]
    fn no_urls_means_no_work() {
        let fetcher = CannedFetcher::default();
        let results = fetch_candidates(&fetcher, &[], 4, sbsolver::parse_page).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn zero_workers_still_runs() {
        let fetcher = CannedFetcher::default().with("a", page("April 1, 2025", &["bee"]));
        let results =
            fetch_candidates(&fetcher, &["a".to_string()], 0, sbsolver::parse_page).unwrap();
        assert!(results[0].1.is_ok());
    }
}
