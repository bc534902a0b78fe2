//! Uploading artifacts to the web host
//!
//! The transfer itself sits behind [`Uploader`]; [`publish_files`] reads each
//! local file and hands it over under its bare file name. Rendered puzzle
//! pages go into a page directory instead, where the index links point.

pub mod ftp;

pub use ftp::{FtpSettings, FtpUploader};

use crate::config::PAGE_FILE_SUFFIX;
use crate::error::PublishError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Destination for published files
pub trait Uploader {
    /// Store `bytes` as `remote` on the destination, replacing any existing file
    ///
    /// # Errors
    /// Returns `PublishError` if the transfer fails.
    fn upload(&mut self, remote: &str, bytes: &[u8]) -> Result<(), PublishError>;
}

/// What happened to each file in a publish run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishSummary {
    /// Remote names stored successfully
    pub uploaded: Vec<String>,
    /// Files that were not stored, with the reason
    pub failed: Vec<(String, String)>,
}

impl PublishSummary {
    /// True when every file made it
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remote path for a local file: its final component, under `page_dir` for
/// rendered pages
///
/// An empty `page_dir` keeps pages in the remote root.
#[must_use]
pub fn remote_path(path: &Path, page_dir: &str) -> String {
    let name = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    let page_dir = page_dir.trim_matches('/');
    if name.ends_with(PAGE_FILE_SUFFIX) && !page_dir.is_empty() {
        format!("{page_dir}/{name}")
    } else {
        name
    }
}

/// Upload every file in `files`, continuing past failures
pub fn publish_files<U: Uploader + ?Sized>(
    uploader: &mut U,
    files: &[PathBuf],
    page_dir: &str,
) -> PublishSummary {
    let mut summary = PublishSummary::default();

    for path in files {
        let remote = remote_path(path, page_dir);
        let result = fs::read(path)
            .map_err(|source| PublishError::Read {
                path: path.clone(),
                source,
            })
            .and_then(|bytes| uploader.upload(&remote, &bytes));

        match result {
            Ok(()) => {
                info!("uploaded {}", path.display());
                summary.uploaded.push(remote);
            }
            Err(err) => {
                warn!("{err}");
                summary.failed.push((remote, err.to_string()));
            }
        }
    }

    summary
}
