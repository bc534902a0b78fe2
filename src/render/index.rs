//! Landing page links to rendered puzzles

use super::html::long_date;
use crate::config::ARCHIVE_PAGE_URL;
use chrono::NaiveDate;

/// Add a button for the page `file_name` to an index document
///
/// The button goes right after the first `</h3>`, or before `</body>` when
/// there is no heading. Returns `None` if the index already links the page.
#[must_use]
pub fn link_page(index: &str, file_name: &str, date: NaiveDate) -> Option<String> {
    let href = format!("{ARCHIVE_PAGE_URL}{file_name}");
    if index.contains(&format!("href=\"{href}\"")) {
        return None;
    }

    let button = format!(
        "\n<a href=\"{href}\" class=\"beebutton\">{}</a>\n",
        long_date(date)
    );
    let at = index
        .find("</h3>")
        .map(|pos| pos + "</h3>".len())
        .or_else(|| index.rfind("</body>"))
        .unwrap_or(index.len());

    let mut linked = String::with_capacity(index.len() + button.len());
    linked.push_str(&index[..at]);
    linked.push_str(&button);
    linked.push_str(&index[at..]);
    Some(linked)
}
