//! NYT Spelling Bee page
//!
//! The answers are not in the markup. They are embedded as a JSON object
//! assigned to `window.gameData` in an inline script.

use super::selector;
use crate::config::NYT_URL;
use crate::core::Candidate;
use crate::error::ParseError;
use chrono::NaiveDate;
use scraper::Html;
use serde::Deserialize;

const GAME_DATA_MARKER: &str = "window.gameData";

#[derive(Debug, Deserialize)]
struct GameData {
    today: GameDay,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameDay {
    #[serde(default)]
    print_date: Option<String>,
    #[serde(default)]
    answers: Vec<String>,
}

/// Today's puzzle page
#[must_use]
pub fn today_url() -> String {
    NYT_URL.to_string()
}

/// Page for the puzzle of a given day
#[must_use]
pub fn dated_url(date: NaiveDate) -> String {
    format!("{NYT_URL}/{}", date.format("%Y-%m-%d"))
}

/// Date in a dated puzzle URL, if it has one
#[must_use]
pub fn date_from_url(url: &str) -> Option<NaiveDate> {
    let tail = url.trim_end_matches('/').rsplit('/').next()?;
    NaiveDate::parse_from_str(tail, "%Y-%m-%d").ok()
}

/// Extract today's puzzle from an NYT page
///
/// The date comes from the game data's `printDate`; `fallback` is used
/// when that is absent or unreadable.
///
/// # Errors
/// Returns `ParseError` if no game data script is present, the JSON does
/// not decode, or it lists no answers.
pub fn parse_page(url: &str, html: &str, fallback: NaiveDate) -> Result<Candidate, ParseError> {
    let document = Html::parse_document(html);
    let script = document
        .select(&selector("script"))
        .map(|el| el.text().collect::<String>())
        .find(|text| text.contains(GAME_DATA_MARKER))
        .ok_or_else(|| ParseError::MissingGameData {
            url: url.to_string(),
        })?;

    let data = decode_game_data(&script).map_err(|reason| ParseError::GameData {
        url: url.to_string(),
        reason,
    })?;

    let date = data
        .today
        .print_date
        .as_deref()
        .and_then(|text| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
        .unwrap_or(fallback);

    let words: Vec<String> = data
        .today
        .answers
        .iter()
        .map(|word| word.trim().to_uppercase())
        .filter(|word| !word.is_empty())
        .collect();

    if words.is_empty() {
        return Err(ParseError::NoWords {
            url: url.to_string(),
        });
    }

    Ok(Candidate::new(date, url, words))
}

/// Decode the first JSON object following the marker
///
/// The assignment is usually followed by more script, so only one value is
/// read from the stream.
fn decode_game_data(script: &str) -> Result<GameData, String> {
    let after_marker = script
        .find(GAME_DATA_MARKER)
        .map(|pos| &script[pos + GAME_DATA_MARKER.len()..])
        .ok_or("marker not found")?;
    let start = after_marker.find('{').ok_or("no JSON object after marker")?;

    serde_json::Deserializer::from_str(&after_marker[start..])
        .into_iter::<GameData>()
        .next()
        .ok_or_else(|| "empty JSON payload".to_string())?
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn page(script: &str) -> String {
        format!(
            "<html><head><script>var x = 1;</script></head>\
             <body><script type=\"text/javascript\">{script}</script></body></html>"
        )
    }

    #[test]
    fn reads_answers_and_print_date() {
        let html = page(
            r#"window.gameData = {"today":{"printDate":"2025-04-02","centerLetter":"e",
               "outerLetters":["b","o","y"],"answers":["obey","bee"]},
               "yesterday":{"answers":["nope"]}};window.other = {"a":1};"#,
        );
        let candidate = parse_page(NYT_URL, &html, date("2000-01-01")).unwrap();
        assert_eq!(candidate.date, date("2025-04-02"));
        assert_eq!(candidate.words, ["OBEY", "BEE"]);
        assert_eq!(candidate.url, NYT_URL);
    }

    #[test]
    fn falls_back_to_given_date() {
        let html = page(r#"window.gameData = {"today":{"answers":["hive"]}}"#);
        let candidate = parse_page(NYT_URL, &html, date("2025-04-03")).unwrap();
        assert_eq!(candidate.date, date("2025-04-03"));
    }

    #[test]
    fn missing_script_is_an_error() {
        let err = parse_page(NYT_URL, &page("var y = 2;"), date("2025-04-03")).unwrap_err();
        assert!(matches!(err, ParseError::MissingGameData { .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let html = page("window.gameData = {\"today\": [1, 2");
        let err = parse_page(NYT_URL, &html, date("2025-04-03")).unwrap_err();
        assert!(matches!(err, ParseError::GameData { .. }));
    }

    #[test]
    fn empty_answers_are_an_error() {
        let html = page(r#"window.gameData = {"today":{"answers":[]}}"#);
        let err = parse_page(NYT_URL, &html, date("2025-04-03")).unwrap_err();
        assert!(matches!(err, ParseError::NoWords { .. }));
    }

    #[test]
    fn dated_urls_carry_their_date() {
        let url = dated_url(date("2025-04-02"));
        assert!(url.ends_with("/2025-04-02"));
        assert_eq!(date_from_url(&url), Some(date("2025-04-02")));
        assert_eq!(date_from_url(&today_url()), None);
    }
}
