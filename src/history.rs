//! Last-modified dates from version control.
//!
//! Each article page shows the date its source file last changed. That date
//! comes from the repository history, not the filesystem — an mtime changes
//! on every checkout, a commit date does not.
//!
//! The [`History`] trait is the seam: the production implementation
//! ([`GitHistory`]) shells out to `git log`, and tests substitute a stub so
//! builds can run against plain temp directories.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("cannot run git: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("git log failed for {path}: {stderr}")]
    Command { path: PathBuf, stderr: String },
    #[error("{path} has no version-control history (file untracked?)")]
    Untracked { path: PathBuf },
}

/// Lookup of a human-readable last-modified date for a source file.
pub trait History: Sync {
    fn last_updated(&self, path: &Path) -> Result<String, HistoryError>;
}

/// Production [`History`] backed by the `git` binary.
pub struct GitHistory {
    repo_root: PathBuf,
}

impl GitHistory {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl History for GitHistory {
    /// Date of the last commit touching `path`, formatted like
    /// "August 7, 2026".
    fn last_updated(&self, path: &Path) -> Result<String, HistoryError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo_root)
            .args(["log", "-1", "--format=%ad", "--date=format:%B %-d, %Y", "--"])
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(HistoryError::Command {
                path: path.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let date = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if date.is_empty() {
            return Err(HistoryError::Untracked {
                path: path.to_path_buf(),
            });
        }
        Ok(date)
    }
}
