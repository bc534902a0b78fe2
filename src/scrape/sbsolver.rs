//! sbsolver.com puzzle pages
//!
//! Pages are addressed by a sequential id, one per day. The date sits in
//! `span.bee-date` ("Spelling Bee for April 1, 2025") and each answer in a
//! `td.bee-hover` cell of `table.bee-set`.

use super::selector;
use crate::config::{SBSOLVER_BASE_URL, SBSOLVER_REFERENCE_DATE, SBSOLVER_REFERENCE_ID};
use crate::core::Candidate;
use crate::error::ParseError;
use chrono::{Datelike, NaiveDate};
use scraper::Html;

const DATE_PREFIX: &str = "Spelling Bee for";
const DATE_FORMAT: &str = "%B %d, %Y";

/// Page URL for a puzzle id
#[must_use]
pub fn puzzle_url(id: i64) -> String {
    format!("{SBSOLVER_BASE_URL}{id}")
}

/// Puzzle id published on `date`
#[must_use]
pub fn id_for_date(date: NaiveDate) -> i64 {
    SBSOLVER_REFERENCE_ID + (date - SBSOLVER_REFERENCE_DATE).num_days()
}

/// Ids from `today` back to the first of its month, newest first
#[must_use]
pub fn month_ids(today: NaiveDate) -> Vec<i64> {
    let latest = id_for_date(today);
    let first = latest - i64::from(today.day0());
    (first..=latest).rev().collect()
}

/// Puzzle id in an sbsolver URL (`.../s/<id>`)
#[must_use]
pub fn id_from_url(url: &str) -> Option<i64> {
    let start = url.find("/s/")? + 3;
    let digits: String = url[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Extract the puzzle on an sbsolver page
///
/// # Errors
/// Returns `ParseError` if the page has no readable date or no answers.
pub fn parse_page(url: &str, html: &str) -> Result<Candidate, ParseError> {
    let document = Html::parse_document(html);

    let raw_date = document
        .select(&selector("span.bee-date"))
        .next()
        .map(|span| span.text().collect::<String>())
        .ok_or_else(|| ParseError::MissingDate {
            url: url.to_string(),
        })?;
    let date_text = raw_date
        .replace(DATE_PREFIX, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        ParseError::BadDate {
            url: url.to_string(),
            text: date_text.clone(),
        }
    })?;

    let cell = selector("td.bee-hover");
    let words: Vec<String> = document
        .select(&selector("table.bee-set tr"))
        .filter_map(|row| row.select(&cell).next())
        .map(|td| td.text().collect::<String>().trim().to_uppercase())
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        return Err(ParseError::NoWords {
            url: url.to_string(),
        });
    }

    Ok(Candidate::new(date, url, words))
}
