//! Leaf templates: a set of accepted scalar types.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, MatchError, MismatchKind, describe_tags};
use crate::kind::ValueKind;
use crate::path::DataPath;

/// A scalar type a template can accept.
///
/// `Number` is the base of `Int` and `Float` and accepts both. No other
/// subtyping applies: `Int` does not accept booleans and `Float` does not
/// accept integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarTag {
    Null,
    Bool,
    Int,
    Float,
    Number,
    Str,
}

impl ScalarTag {
    pub const ALL: [Self; 6] = [
        Self::Null,
        Self::Bool,
        Self::Int,
        Self::Float,
        Self::Number,
        Self::Str,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Number => "number",
            Self::Str => "str",
        }
    }

    /// Whether a value of the given kind is an instance of this tag.
    #[must_use]
    pub const fn accepts(self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (Self::Null, ValueKind::Null)
                | (Self::Bool, ValueKind::Bool)
                | (Self::Int | Self::Number, ValueKind::Int)
                | (Self::Float | Self::Number, ValueKind::Float)
                | (Self::Str, ValueKind::Str)
        )
    }
}

impl fmt::Display for ScalarTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarTag {
    type Err = Error;

    /// Parse a type name. Aliases: `none`, `boolean`, `integer`, `string`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" | "none" => Ok(Self::Null),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "number" => Ok(Self::Number),
            "str" | "string" => Ok(Self::Str),
            other => Err(Error::InvalidTemplateConfiguration(format!(
                "'{other}' is not a scalar type name (expected one of null, bool, int, float, number, str)"
            ))),
        }
    }
}

/// Matches a scalar whose kind is accepted by at least one of its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarTemplate {
    accepted: Vec<ScalarTag>,
}

impl ScalarTemplate {
    /// Build from one or more tags. Duplicates are dropped, order is kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTemplateConfiguration` if no tag is given.
    pub fn new<I>(tags: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = ScalarTag>,
    {
        let mut accepted = Vec::new();
        for tag in tags {
            if !accepted.contains(&tag) {
                accepted.push(tag);
            }
        }
        if accepted.is_empty() {
            return Err(Error::InvalidTemplateConfiguration(
                "a scalar template needs at least one accepted type".to_owned(),
            ));
        }
        Ok(Self { accepted })
    }

    /// A template accepting exactly one tag.
    #[must_use]
    pub fn of(tag: ScalarTag) -> Self {
        Self {
            accepted: vec![tag],
        }
    }

    /// Build from type names such as `["int", "float"]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidTemplateConfiguration` if a name is not a known
    /// scalar type or no name is given.
    pub fn from_names<I, S>(names: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = names
            .into_iter()
            .map(|name| name.as_ref().parse::<ScalarTag>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tags)
    }

    #[must_use]
    pub fn accepted(&self) -> &[ScalarTag] {
        &self.accepted
    }

    /// Check a single value.
    ///
    /// # Errors
    ///
    /// Returns a `TypeMismatch` if the value's kind is not accepted.
    pub fn matches(&self, value: &Value) -> Result<(), MatchError> {
        self.match_at(value, &mut DataPath::root())
    }

    pub(super) fn match_at(&self, value: &Value, path: &mut DataPath) -> Result<(), MatchError> {
        let actual = ValueKind::of(value);
        if self.accepted.iter().any(|tag| tag.accepts(actual)) {
            return Ok(());
        }
        Err(MatchError::new(
            path.clone(),
            MismatchKind::TypeMismatch {
                accepted: self.accepted.clone(),
                actual,
            },
        ))
    }

    pub(super) fn describe(&self) -> String {
        describe_tags(&self.accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creation_with_one_or_more_tags() {
        for tags in [
            vec![ScalarTag::Str],
            vec![ScalarTag::Int, ScalarTag::Float, ScalarTag::Number],
            vec![ScalarTag::Str, ScalarTag::Bool, ScalarTag::Null],
        ] {
            let template = ScalarTemplate::new(tags.clone()).unwrap();
            assert_eq!(template.accepted(), tags.as_slice());
        }
    }

    #[test]
    fn test_creation_without_tags_fails() {
        let err = ScalarTemplate::new([]).unwrap_err();
        assert!(
            matches!(err, Error::InvalidTemplateConfiguration(_)),
            "got: {err:?}"
        );
    }

    #[test]
    fn test_duplicate_tags_collapse() {
        let template =
            ScalarTemplate::new([ScalarTag::Int, ScalarTag::Float, ScalarTag::Int]).unwrap();
        assert_eq!(template.accepted(), &[ScalarTag::Int, ScalarTag::Float]);
    }

    #[test]
    fn test_from_names() {
        let template = ScalarTemplate::from_names(["int", "float"]).unwrap();
        assert_eq!(template.accepted(), &[ScalarTag::Int, ScalarTag::Float]);
    }

    #[test]
    fn test_from_names_rejects_values() {
        for names in [
            vec!["1"],
            vec!["str", "0"],
            vec!["bool", "int", "float", "'str'"],
            vec![""],
        ] {
            let err = ScalarTemplate::from_names(&names).unwrap_err();
            assert!(
                matches!(err, Error::InvalidTemplateConfiguration(_)),
                "{names:?} should be rejected, got: {err:?}"
            );
        }
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in ScalarTag::ALL {
            assert_eq!(tag.name().parse::<ScalarTag>().unwrap(), tag);
        }
    }

    #[test]
    fn test_int_or_float() {
        let template = ScalarTemplate::new([ScalarTag::Int, ScalarTag::Float]).unwrap();
        assert!(template.matches(&json!(5)).is_ok());
        assert!(template.matches(&json!(5.5)).is_ok());

        let err = template.matches(&json!("5")).unwrap_err();
        assert_eq!(
            err.kind,
            MismatchKind::TypeMismatch {
                accepted: vec![ScalarTag::Int, ScalarTag::Float],
                actual: ValueKind::Str,
            }
        );
        assert!(err.path.is_root());
    }

    #[test]
    fn test_number_accepts_int_and_float() {
        let template = ScalarTemplate::of(ScalarTag::Number);
        assert!(template.matches(&json!(1)).is_ok());
        assert!(template.matches(&json!(1.25)).is_ok());
        assert!(template.matches(&json!(true)).is_err());
    }

    #[test]
    fn test_int_rejects_bool_and_float() {
        let template = ScalarTemplate::of(ScalarTag::Int);
        assert!(template.matches(&json!(true)).is_err());
        assert!(template.matches(&json!(1.5)).is_err());
    }

    #[test]
    fn test_float_rejects_int() {
        let template = ScalarTemplate::of(ScalarTag::Float);
        assert!(template.matches(&json!(3)).is_err());
    }

    #[test]
    fn test_containers_are_not_scalars() {
        let template = ScalarTemplate::new(ScalarTag::ALL).unwrap();
        let err = template.matches(&json!([1])).unwrap_err();
        assert!(matches!(
            err.kind,
            MismatchKind::TypeMismatch {
                actual: ValueKind::Sequence,
                ..
            }
        ));
        assert!(template.matches(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_null() {
        let template = ScalarTemplate::new([ScalarTag::Str, ScalarTag::Null]).unwrap();
        assert!(template.matches(&json!(null)).is_ok());
        assert!(template.matches(&json!("x")).is_ok());
        assert!(template.matches(&json!(0)).is_err());
    }
}
