//! The template model.
//!
//! A template is a tree of three node kinds:
//! - `scalar`: a set of accepted scalar types
//! - `mapping`: required keys, each with a sub-template
//! - `sequence`: one element template plus an optional length range
//!
//! Matching is a single recursive descent that stops at the first mismatch.

mod mapping;
mod scalar;
mod sequence;

pub use mapping::{MappingTemplate, MappingTemplateBuilder};
pub use scalar::{ScalarTag, ScalarTemplate};
pub use sequence::SequenceTemplate;

use serde_json::Value;

use crate::error::MatchError;
use crate::path::DataPath;

/// Any template node.
///
/// Children are owned, so a template tree can never contain a cycle. Once
/// built, a template is immutable and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Scalar(ScalarTemplate),
    Mapping(MappingTemplate),
    Sequence(SequenceTemplate),
}

impl Template {
    /// Check a decoded data tree against this template.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch found, with the path from the root of
    /// `data` to the offending node.
    pub fn matches(&self, data: &Value) -> Result<(), MatchError> {
        self.match_at(data, &mut DataPath::root())
    }

    /// `path` is the location of `data`; it is left extended past that
    /// location when an error is returned.
    fn match_at(&self, data: &Value, path: &mut DataPath) -> Result<(), MatchError> {
        match self {
            Self::Scalar(template) => template.match_at(data, path),
            Self::Mapping(template) => template.match_at(data, path),
            Self::Sequence(template) => template.match_at(data, path),
        }
    }

    /// Short human description of the expected shape, e.g. `sequence of int (length 1..4)`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(template) => template.describe(),
            Self::Mapping(template) => template.describe(),
            Self::Sequence(template) => template.describe(),
        }
    }
}

impl From<ScalarTemplate> for Template {
    fn from(template: ScalarTemplate) -> Self {
        Self::Scalar(template)
    }
}

impl From<MappingTemplate> for Template {
    fn from(template: MappingTemplate) -> Self {
        Self::Mapping(template)
    }
}

impl From<SequenceTemplate> for Template {
    fn from(template: SequenceTemplate) -> Self {
        Self::Sequence(template)
    }
}

impl From<ScalarTag> for Template {
    fn from(tag: ScalarTag) -> Self {
        Self::Scalar(ScalarTemplate::of(tag))
    }
}
