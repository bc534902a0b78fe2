//! Render command: write a printable page for a jumbled puzzle

use crate::archive::ArchiveStore;
use crate::render::{link_page, page_file_name, render_page};
use anyhow::{Context, Result, ensure};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the page went and whether the index now links it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub date: NaiveDate,
    pub page: PathBuf,
    pub index_updated: bool,
}

/// Render the puzzle for `date` (the latest one by default) into `out_dir`
///
/// If `index` exists, a button linking the page is added to it.
///
/// # Errors
/// Returns an error if the archive cannot be loaded, holds no matching
/// puzzle, the puzzle is not jumbled yet, or a file cannot be written.
pub fn run_render(
    store: &ArchiveStore,
    date: Option<NaiveDate>,
    out_dir: &Path,
    index: &Path,
) -> Result<RenderResult> {
    let archive = store.load()?;
    let record = match date {
        Some(date) => archive
            .get(date)
            .with_context(|| format!("no puzzle for {date} in {}", store.path().display()))?,
        None => archive
            .latest()
            .with_context(|| format!("{} is empty", store.path().display()))?,
    };
    ensure!(
        record.jumbled,
        "puzzle for {} has not been jumbled yet",
        record.date
    );

    let file_name = page_file_name(record.date);
    fs::create_dir_all(out_dir)
        .with_context(|| format!("cannot create {}", out_dir.display()))?;
    let page = out_dir.join(&file_name);
    fs::write(&page, render_page(record))
        .with_context(|| format!("cannot write {}", page.display()))?;
    info!("rendered {}", page.display());

    let index_updated = if index.exists() {
        let current = fs::read_to_string(index)
            .with_context(|| format!("cannot read {}", index.display()))?;
        match link_page(&current, &file_name, record.date) {
            Some(linked) => {
                fs::write(index, linked)
                    .with_context(|| format!("cannot write {}", index.display()))?;
                true
            }
            None => false,
        }
    } else {
        debug!("{} not found, no link added", index.display());
        false
    };

    Ok(RenderResult {
        date: record.date,
        page,
        index_updated,
    })
}
