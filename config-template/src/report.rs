//! Outcome of checking several data files against one template.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, ErrorKind, MatchError};

/// A file that could not be loaded or did not fit the template.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileFailure {
    pub file: PathBuf,
    pub kind: ErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
    /// The structural mismatch, when the file loaded but did not fit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MatchError>,
}

impl FileFailure {
    #[must_use]
    pub fn new(file: PathBuf, error: &Error) -> Self {
        Self {
            file,
            kind: error.kind(),
            message: error.to_string(),
            mismatch: error.as_mismatch().cloned(),
        }
    }

    /// Whether the file loaded but did not fit the template.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        self.mismatch.is_some()
    }

    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: {}", self.file.display(), self.message)
    }
}

/// Result of a `check_files` run.
///
/// Each file is checked fail-fast, so a file contributes at most one failure.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Number of files attempted.
    pub checked_files: usize,
    /// Whether every file loaded and matched.
    pub ok: bool,
    pub failures: Vec<FileFailure>,
}

impl CheckReport {
    #[must_use]
    pub fn passed_files(&self) -> usize {
        self.checked_files - self.failures.len()
    }

    /// Files that loaded but did not fit the template.
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.failures.iter().filter(|f| f.is_mismatch()).count()
    }

    /// Files that could not be loaded at all.
    #[must_use]
    pub fn load_error_count(&self) -> usize {
        self.failures.len() - self.mismatch_count()
    }
}
