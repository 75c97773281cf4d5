//! Sequence templates: homogeneous elements with an optional length constraint.

use std::ops::RangeBounds;

use serde_json::Value;

use super::Template;
use crate::error::{Error, MatchError, MismatchKind};
use crate::kind::ValueKind;
use crate::length::LengthRange;
use crate::path::{DataPath, PathSegment};

/// Matches a sequence whose length is in range and whose every element fits
/// the element template.
///
/// Strings are scalars, never sequences of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceTemplate {
    element: Box<Template>,
    length: Option<LengthRange>,
}

impl SequenceTemplate {
    /// A sequence of any length.
    #[must_use]
    pub fn new(element: impl Into<Template>) -> Self {
        Self {
            element: Box::new(element.into()),
            length: None,
        }
    }

    /// Restrict the element count, e.g. `with_length(1..4)` or `with_length(..=8)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLengthRange` if the range is reversed.
    pub fn with_length<R: RangeBounds<usize>>(self, range: R) -> Result<Self, Error> {
        let range = LengthRange::from_bounds(&range)?;
        Ok(self.with_length_range(range))
    }

    /// Restrict the element count with a prebuilt (possibly stepped) range.
    #[must_use]
    pub fn with_length_range(mut self, range: LengthRange) -> Self {
        self.length = Some(range);
        self
    }

    #[must_use]
    pub fn element(&self) -> &Template {
        &self.element
    }

    #[must_use]
    pub fn length(&self) -> Option<&LengthRange> {
        self.length.as_ref()
    }

    /// Check a sequence.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch: `NotASequence`, `LengthOutOfRange`, or the
    /// first failing element's mismatch with its index on the path.
    pub fn matches(&self, data: &Value) -> Result<(), MatchError> {
        self.match_at(data, &mut DataPath::root())
    }

    pub(super) fn match_at(&self, data: &Value, path: &mut DataPath) -> Result<(), MatchError> {
        let Value::Array(items) = data else {
            return Err(MatchError::new(
                path.clone(),
                MismatchKind::NotASequence {
                    actual: ValueKind::of(data),
                },
            ));
        };

        if let Some(range) = self.length
            && !range.contains(items.len())
        {
            return Err(MatchError::new(
                path.clone(),
                MismatchKind::LengthOutOfRange {
                    range,
                    len: items.len(),
                },
            ));
        }

        for (index, item) in items.iter().enumerate() {
            path.push(PathSegment::Index(index));
            self.element.match_at(item, path)?;
            path.pop();
        }
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        let element = self.element.describe();
        match &self.length {
            Some(range) if range.is_empty() => {
                format!("sequence of {element} (no length allowed by {range})")
            }
            Some(range) => format!("sequence of {element} (length {range})"),
            None => format!("sequence of {element}"),
        }
    }
}
