//! # config-template
//!
//! Declare the expected structure of configuration data and check decoded
//! files against it.
//!
//! A [`Template`] is a tree of three node kinds: [`ScalarTemplate`] (a set of
//! accepted scalar types), [`MappingTemplate`] (required keys, extra keys
//! allowed) and [`SequenceTemplate`] (homogeneous elements with an optional
//! length range). Matching walks a `serde_json::Value` and stops at the first
//! mismatch, reporting where it happened and what was expected.
//!
//! ## Quick Start
//!
//! ```rust
//! use config_template::{MappingTemplate, ScalarTag, SequenceTemplate, Template};
//! use serde_json::json;
//!
//! let server = MappingTemplate::builder()
//!     .field("host", ScalarTag::Str)
//!     .field("port", ScalarTag::Int)
//!     .build()
//!     .unwrap();
//! let template: Template = MappingTemplate::builder()
//!     .field("servers", SequenceTemplate::new(server).with_length(1..).unwrap())
//!     .build()
//!     .unwrap()
//!     .into();
//!
//! let data = json!({"servers": [{"host": "a", "port": 80}, {"host": "b", "port": "x"}]});
//! let err = template.matches(&data).unwrap_err();
//! assert_eq!(err.to_string(), "servers[1].port: expected int, got str");
//! ```
//!
//! Files are decoded by [`loader`]; YAML needs the `yaml` feature (on by
//! default) and TOML the `toml` feature.

mod config;
mod error;
mod kind;
mod length;
pub mod loader;
pub mod output;
mod path;
mod report;
mod template;
#[cfg(any(feature = "yaml", feature = "toml"))]
mod tree;

pub use config::{DataFormat, LoadConfig};
pub use error::{Error, ErrorKind, MatchError, MismatchKind};
pub use kind::ValueKind;
pub use length::LengthRange;
pub use path::{DataPath, PathSegment};
pub use report::{CheckReport, FileFailure};
pub use template::{
    MappingTemplate, MappingTemplateBuilder, ScalarTag, ScalarTemplate, SequenceTemplate, Template,
};

use std::path::Path;

use tracing::debug;

/// Load a data file and check it against `template`.
///
/// # Errors
///
/// Returns `Error::Mismatch` if the data does not fit, or a loader error if
/// the file cannot be read or decoded.
pub fn check_file(template: &Template, path: &Path, config: &LoadConfig) -> Result<(), Error> {
    let data = loader::load_file(path, config)?;
    match template.matches(&data) {
        Ok(()) => {
            debug!(file = %path.display(), "data matches template");
            Ok(())
        }
        Err(mismatch) => {
            debug!(file = %path.display(), error = %mismatch, "data does not match template");
            Err(mismatch.into())
        }
    }
}

/// Check several data files against one template.
///
/// Every file is attempted; each contributes at most one failure (its first
/// mismatch or its load error). Never returns early.
#[must_use]
pub fn check_files<I, P>(template: &Template, paths: I, config: &LoadConfig) -> CheckReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut checked_files: usize = 0;
    let mut failures = Vec::new();

    for path in paths {
        let path = path.as_ref();
        checked_files += 1;
        if let Err(e) = check_file(template, path, config) {
            failures.push(FileFailure::new(path.to_path_buf(), &e));
        }
    }

    debug!(
        checked_files,
        failed_files = failures.len(),
        "finished checking data files"
    );
    CheckReport {
        checked_files,
        ok: failures.is_empty(),
        failures,
    }
}
