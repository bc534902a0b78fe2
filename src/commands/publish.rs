//! Publish command: push artifacts to the web host over FTP

use crate::error::PublishError;
use crate::publish::{FtpSettings, FtpUploader, PublishSummary, publish_files};
use std::path::PathBuf;

/// Connect once and upload every file
///
/// Rendered pages are stored under `page_dir`; see
/// [`remote_path`](crate::publish::remote_path).
///
/// # Errors
/// Returns `PublishError::Connect` if the session cannot be opened. Per-file
/// failures are reported in the summary.
pub fn run_publish(
    settings: &FtpSettings,
    files: &[PathBuf],
    page_dir: &str,
) -> Result<PublishSummary, PublishError> {
    let mut uploader = FtpUploader::connect(settings)?;
    let summary = publish_files(&mut uploader, files, page_dir);
    uploader.quit();
    Ok(summary)
}
