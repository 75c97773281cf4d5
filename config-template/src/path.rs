//! Locations inside a decoded data tree.

use std::fmt;

use serde::Serialize;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A key of a mapping.
    Key(String),
    /// A zero-based index into a sequence.
    Index(usize),
}

/// Path from the root of a data tree down to one node.
///
/// Rendered the way a reader would address the node in a config file:
/// `servers[1].port`. The empty path renders as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DataPath(Vec<PathSegment>);

impl DataPath {
    /// The path of the tree root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Descend into a child.
    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    /// Step back up to the parent.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }
}

impl FromIterator<PathSegment> for DataPath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keys that would be ambiguous in dotted notation are written as `["a.b"]`.
fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if needs_quoting(key) => write!(f, "[{key:?}]")?,
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_owned())
    }

    #[test]
    fn test_root_display() {
        assert_eq!(DataPath::root().to_string(), "<root>");
        assert!(DataPath::root().is_root());
    }

    #[test]
    fn test_mixed_path_display() {
        let path: DataPath = [key("servers"), PathSegment::Index(1), key("port")]
            .into_iter()
            .collect();
        assert_eq!(path.to_string(), "servers[1].port");
    }

    #[test]
    fn test_leading_index_display() {
        let path: DataPath = [PathSegment::Index(1)].into_iter().collect();
        assert_eq!(path.to_string(), "[1]");
    }

    #[test]
    fn test_ambiguous_key_is_quoted() {
        let path: DataPath = [key("hosts"), key("db.primary")].into_iter().collect();
        assert_eq!(path.to_string(), r#"hosts["db.primary"]"#);
    }

    #[test]
    fn test_push_pop() {
        let mut path = DataPath::root();
        path.push(key("a"));
        path.push(PathSegment::Index(0));
        assert_eq!(path.pop(), Some(PathSegment::Index(0)));
        assert_eq!(path.to_string(), "a");
    }

    #[test]
    fn test_serializes_as_segment_list() {
        let path: DataPath = [key("servers"), PathSegment::Index(2)].into_iter().collect();
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["servers", 2]));
    }
}
