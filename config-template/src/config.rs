//! Configuration for loading data files.
//!
//! Templates themselves need no configuration; these options only control how
//! a file on disk becomes a decoded data tree.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// A serialization format the loader can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Json,
    /// Requires the `yaml` feature.
    Yaml,
    /// Requires the `toml` feature.
    Toml,
}

impl DataFormat {
    /// Infer the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    /// Cargo feature that provides the decoder, if any.
    #[must_use]
    pub const fn feature(self) -> Option<&'static str> {
        match self {
            Self::Json => None,
            Self::Yaml => Some("yaml"),
            Self::Toml => Some("toml"),
        }
    }

    /// Whether the decoder was compiled in.
    #[must_use]
    pub const fn is_available(self) -> bool {
        match self {
            Self::Json => true,
            Self::Yaml => cfg!(feature = "yaml"),
            Self::Toml => cfg!(feature = "toml"),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        })
    }
}

impl FromStr for DataFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(Error::UnknownFormat(s.to_owned())),
        }
    }
}

/// Options for reading data files.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct LoadConfig {
    /// Decode every file with this format instead of inferring it from the extension.
    pub format: Option<DataFormat>,
    /// Maximum file size in bytes (default: 10 MiB).
    pub max_file_size: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            format: None,
            max_file_size: 10_485_760,
        }
    }
}

impl LoadConfig {
    /// The format to use for `path`: the forced one, else the inferred one.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownFormat` if no format is forced and the extension
    /// is not recognized.
    pub fn format_for(&self, path: &Path) -> Result<DataFormat, Error> {
        self.format
            .or_else(|| DataFormat::from_path(path))
            .ok_or_else(|| Error::UnknownFormat(path.display().to_string()))
    }
}
