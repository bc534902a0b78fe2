//! Printable puzzle page
//!
//! Scrambled words are laid out three to a row, each followed by one blank
//! per letter for the solver to fill in.

use crate::config::PAGE_FILE_SUFFIX;
use crate::core::PuzzleRecord;
use chrono::NaiveDate;
use quick_xml::escape::escape;
use std::fmt;

const COLUMNS: usize = 3;

const STYLE: &str = r#"
  @font-face { font-family: "FrankRuhl"; src: url("FrankRuhl.ttf") format("truetype"); }
  body { font-family: "FrankRuhl", sans-serif; font-size: 24px; }
  table { width: 100%; table-layout: fixed; }
  .beebutton {
    width: 50%; margin-top: 10px; padding: 15px 0;
    background-color: #FFD700; color: #333; font-size: 18px;
    border: 2px solid black; border-radius: 5px; cursor: pointer;
    text-align: center; font-weight: bold; text-decoration: none;
    font-family: "Interstate-Bold", sans-serif; display: inline-block;
  }
  .beebutton:hover { background-color: #FFC107; }
  .print-button-container { display: flex; justify-content: center; margin-bottom: 10px; }
  h4 { text-align: center; font-size: 20px; margin: 0; line-height: 1.2; }
  .title-spacer { margin-bottom: 20px; }
  @media print { .beebutton { display: none; } body { -webkit-print-color-adjust: exact; } }
  @page { size: letter landscape; margin: 10mm; }
  td { vertical-align: top; padding: 5px; }
  td > table { width: 100%; border-spacing: 0; }
  td > table td { border: none; }
  td > table td:nth-child(1) { font-size: 16px; text-align: center; white-space: nowrap; }
  td > table td:nth-child(2) { font-size: 24px; text-align: left; white-space: nowrap; }
"#;

/// File name of the page for `date`, e.g. `20250401BEEJUMBLE.html`
#[must_use]
pub fn page_file_name(date: NaiveDate) -> String {
    format!("{}{PAGE_FILE_SUFFIX}", date.format("%Y%m%d"))
}

/// Long form used in headers and index buttons, e.g. "Tuesday, April 01, 2025"
#[must_use]
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}

/// HTML document for one puzzle
pub struct JumblePage<'a> {
    record: &'a PuzzleRecord,
}

impl<'a> JumblePage<'a> {
    #[must_use]
    pub const fn new(record: &'a PuzzleRecord) -> Self {
        Self { record }
    }
}

impl fmt::Display for JumblePage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.record.date;
        writeln!(f, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">")?;
        writeln!(
            f,
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(f, "<style>{STYLE}</style>")?;
        writeln!(f, "<title>{}</title>\n</head>\n<body>", date.format("%m-%d-%a BeeJumble"))?;
        writeln!(
            f,
            "<div class=\"print-button-container\">\
             <a href=\"javascript:window.print()\" class=\"beebutton\">Print</a></div>\n<p></p>"
        )?;
        writeln!(
            f,
            "<h4 style=\"text-align: center;\">BeeJumble for {}<br>Brought to you by \
             <a href=\"https://thegamebureau.com/beebox\" target=\"_blank\">thegamebureau.com</a></h4>",
            long_date(date)
        )?;
        writeln!(f, "<div class=\"title-spacer\"></div>\n<table>")?;

        for row in self.record.words.chunks(COLUMNS) {
            writeln!(f, "<tr>")?;
            for word in row {
                writeln!(f, "<td>\n<table>\n<tr>")?;
                writeln!(f, "<td>{}</td>", escape(word.text.as_str()))?;
                writeln!(f, "<td>{}</td>", "_ ".repeat(word.length))?;
                writeln!(f, "</tr>\n</table>\n</td>")?;
            }
            for _ in row.len()..COLUMNS {
                writeln!(f, "<td></td>")?;
            }
            writeln!(f, "</tr>")?;
        }

        write!(f, "</table>\n</body>\n</html>")
    }
}

/// Render the page for a puzzle
#[must_use]
pub fn render_page(record: &PuzzleRecord) -> String {
    JumblePage::new(record).to_string()
}
