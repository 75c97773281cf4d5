//! Runtime shape of a decoded data node.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// The runtime kind of a node in a decoded data tree.
///
/// Numbers are split by representation: anything the decoder stored as an
/// integer is `Int`, everything else is `Float`. `5.0` is therefore a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    Mapping,
    Sequence,
}

impl ValueKind {
    /// Classify a data node.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Int,
            Value::String(_) => Self::Str,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Mapping => "mapping",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
