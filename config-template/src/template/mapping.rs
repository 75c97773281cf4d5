//! Mapping templates: required keys, each with its own sub-template.

use serde_json::Value;

use super::Template;
use crate::error::{Error, MatchError, MismatchKind};
use crate::kind::ValueKind;
use crate::path::{DataPath, PathSegment};

/// Matches a mapping that has every declared field, each fitting its template.
///
/// Fields are checked in declaration order. Keys present in the data but not
/// declared here are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTemplate {
    fields: Vec<(String, Template)>,
}

impl MappingTemplate {
    /// Build from `(field name, template)` pairs. Any string is a valid field
    /// name, including the empty one.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTemplateConfiguration` if a field name is
    /// declared twice.
    pub fn new<I, K>(fields: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, Template)>,
        K: Into<String>,
    {
        let mut declared: Vec<(String, Template)> = Vec::new();
        for (name, template) in fields {
            let name = name.into();
            if declared.iter().any(|(existing, _)| *existing == name) {
                return Err(Error::InvalidTemplateConfiguration(format!(
                    "field '{name}' is declared more than once"
                )));
            }
            declared.push((name, template));
        }
        Ok(Self { fields: declared })
    }

    #[must_use]
    pub fn builder() -> MappingTemplateBuilder {
        MappingTemplateBuilder::default()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.fields
            .iter()
            .map(|(name, template)| (name.as_str(), template))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, template)| template)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check a mapping.
    ///
    /// # Errors
    ///
    /// Returns the first mismatch: `NotAMapping`, `MissingKey`, or whatever a
    /// field's template reports, with the field name on the path.
    pub fn matches(&self, data: &Value) -> Result<(), MatchError> {
        self.match_at(data, &mut DataPath::root())
    }

    pub(super) fn match_at(&self, data: &Value, path: &mut DataPath) -> Result<(), MatchError> {
        let Value::Object(map) = data else {
            return Err(MatchError::new(
                path.clone(),
                MismatchKind::NotAMapping {
                    actual: ValueKind::of(data),
                },
            ));
        };

        for (name, template) in &self.fields {
            path.push(PathSegment::Key(name.clone()));
            let Some(value) = map.get(name) else {
                return Err(MatchError::new(
                    path.clone(),
                    MismatchKind::MissingKey { key: name.clone() },
                ));
            };
            template.match_at(value, path)?;
            path.pop();
        }
        Ok(())
    }

    pub(super) fn describe(&self) -> String {
        let names: Vec<&str> = self.fields.iter().map(|(name, _)| name.as_str()).collect();
        format!("mapping with keys [{}]", names.join(", "))
    }
}

/// Incremental construction of a [`MappingTemplate`].
#[derive(Debug, Clone, Default)]
pub struct MappingTemplateBuilder {
    fields: Vec<(String, Template)>,
}

impl MappingTemplateBuilder {
    /// Declare a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, template: impl Into<Template>) -> Self {
        self.fields.push((name.into(), template.into()));
        self
    }

    /// Finish the template.
    ///
    /// # Errors
    ///
    /// Same as [`MappingTemplate::new`].
    pub fn build(self) -> Result<MappingTemplate, Error> {
        MappingTemplate::new(self.fields)
    }
}
