//! Error types for template construction, matching and loading.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::DataFormat;
use crate::kind::ValueKind;
use crate::length::LengthRange;
use crate::path::DataPath;
use crate::template::ScalarTag;

/// Why a data tree did not fit a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum MismatchKind {
    /// A value's kind is not among the accepted scalar types.
    TypeMismatch {
        accepted: Vec<ScalarTag>,
        actual: ValueKind,
    },
    /// A mapping template was applied to something that is not a mapping.
    NotAMapping { actual: ValueKind },
    /// A declared field is absent from the mapping.
    MissingKey { key: String },
    /// A sequence template was applied to something that is not a sequence.
    NotASequence { actual: ValueKind },
    /// The sequence has a length outside the configured range.
    LengthOutOfRange { range: LengthRange, len: usize },
}

/// The first place where a data tree diverges from its template.
///
/// `path` points at the offending node; for `MissingKey` it ends with the
/// missing key itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchError {
    pub path: DataPath,
    #[serde(flatten)]
    pub kind: MismatchKind,
}

impl MatchError {
    #[must_use]
    pub fn new(path: DataPath, kind: MismatchKind) -> Self {
        Self { path, kind }
    }

    /// Description of the shape the template asked for.
    #[must_use]
    pub fn expected(&self) -> String {
        match &self.kind {
            MismatchKind::TypeMismatch { accepted, .. } => describe_tags(accepted),
            MismatchKind::NotAMapping { .. } => "mapping".to_owned(),
            MismatchKind::MissingKey { key } => format!("key '{key}'"),
            MismatchKind::NotASequence { .. } => "sequence".to_owned(),
            MismatchKind::LengthOutOfRange { range, .. } => {
                format!("sequence length in {range}")
            }
        }
    }

    /// Description of what the data actually held.
    #[must_use]
    pub fn actual(&self) -> String {
        match &self.kind {
            MismatchKind::TypeMismatch { actual, .. }
            | MismatchKind::NotAMapping { actual }
            | MismatchKind::NotASequence { actual } => actual.to_string(),
            MismatchKind::MissingKey { .. } => "nothing".to_owned(),
            MismatchKind::LengthOutOfRange { len, .. } => format!("length {len}"),
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path,
            self.expected(),
            self.actual()
        )
    }
}

impl std::error::Error for MatchError {}

/// Render accepted tags as `int or float`.
pub fn describe_tags(tags: &[ScalarTag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Root error type: every failure this crate reports is one of these.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed template arguments.
    #[error("invalid template configuration: {0}")]
    InvalidTemplateConfiguration(String),

    /// Malformed sequence length constraint.
    #[error("invalid length range: {0}")]
    InvalidLengthRange(String),

    /// The data does not fit the template.
    #[error(transparent)]
    Mismatch(#[from] MatchError),

    /// A decoder was requested whose cargo feature is not enabled.
    #[error("{format} support is not available; enable the `{feature}` feature of config-template")]
    MissingExtras {
        format: DataFormat,
        feature: &'static str,
    },

    /// The data format could not be determined.
    #[error("unknown data format: {0}")]
    UnknownFormat(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} exceeds the maximum size of {limit} bytes", path.display())]
    FileTooLarge { path: PathBuf, limit: u64 },

    #[error("{} is not valid UTF-8", path.display())]
    InvalidEncoding { path: PathBuf },

    /// The content is not valid in its declared format.
    #[error("{format} parse error: {message}")]
    Decode { format: DataFormat, message: String },
}

/// Flat discriminant of [`Error`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidTemplateConfiguration,
    InvalidLengthRange,
    TypeMismatch,
    NotAMapping,
    MissingKey,
    NotASequence,
    LengthOutOfRange,
    MissingExtras,
    UnknownFormat,
    Io,
    FileTooLarge,
    InvalidEncoding,
    Decode,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTemplateConfiguration(_) => ErrorKind::InvalidTemplateConfiguration,
            Self::InvalidLengthRange(_) => ErrorKind::InvalidLengthRange,
            Self::Mismatch(err) => match err.kind {
                MismatchKind::TypeMismatch { .. } => ErrorKind::TypeMismatch,
                MismatchKind::NotAMapping { .. } => ErrorKind::NotAMapping,
                MismatchKind::MissingKey { .. } => ErrorKind::MissingKey,
                MismatchKind::NotASequence { .. } => ErrorKind::NotASequence,
                MismatchKind::LengthOutOfRange { .. } => ErrorKind::LengthOutOfRange,
            },
            Self::MissingExtras { .. } => ErrorKind::MissingExtras,
            Self::UnknownFormat(_) => ErrorKind::UnknownFormat,
            Self::Io { .. } => ErrorKind::Io,
            Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            Self::InvalidEncoding { .. } => ErrorKind::InvalidEncoding,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// The mismatch, if this error came from matching data against a template.
    #[must_use]
    pub fn as_mismatch(&self) -> Option<&MatchError> {
        match self {
            Self::Mismatch(err) => Some(err),
            _ => None,
        }
    }
}
