//! Document model boundary
//!
//! The compiler only needs to ask a handful of questions of a parsed
//! workflow: is this node a scalar, a sequence, or a mapping, and what is
//! under a given key. [`DocumentNode`] is that question set. Any
//! deserializer that can answer it can feed the compiler; the
//! `serde_yaml::Value` implementation below is the one ghx ships with.

use serde_yaml::Value;

/// Shape of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Explicit null or missing value
    Null,
    /// String, number or boolean
    Scalar,
    /// Ordered list
    Sequence,
    /// Ordered key/value mapping
    Mapping,
}

/// Read-only view of a node in a workflow document.
pub trait DocumentNode {
    /// Shape of this node
    fn kind(&self) -> NodeKind;

    /// Plain text of a scalar node. Numbers and booleans render as written
    /// in canonical form; null is not a scalar.
    fn scalar_text(&self) -> Option<String>;

    /// Items of a sequence node, in document order
    fn sequence_items(&self) -> Option<Vec<&Self>>;

    /// Entries of a mapping node, in document order. Entries whose key is
    /// not a scalar are not addressable and are left out.
    fn mapping_entries(&self) -> Option<Vec<(String, &Self)>>;

    /// Child of a mapping node by exact key
    fn child(&self, key: &str) -> Option<&Self> {
        self.mapping_entries()?
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Walk a chain of mapping keys
    fn at_path(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |node, key| node.child(key))
    }

    /// True for explicit nulls
    fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }
}

impl DocumentNode for Value {
    fn kind(&self) -> NodeKind {
        match self {
            Value::Null => NodeKind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
            Value::Sequence(_) => NodeKind::Sequence,
            Value::Mapping(_) => NodeKind::Mapping,
            Value::Tagged(tagged) => tagged.value.kind(),
        }
    }

    fn scalar_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            // Rendered from the parsed value: `3.10` reads as `3.1`
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => tagged.value.scalar_text(),
            _ => None,
        }
    }

    fn sequence_items(&self) -> Option<Vec<&Self>> {
        match self {
            Value::Sequence(seq) => Some(seq.iter().collect()),
            Value::Tagged(tagged) => tagged.value.sequence_items(),
            _ => None,
        }
    }

    fn mapping_entries(&self) -> Option<Vec<(String, &Self)>> {
        match self {
            Value::Mapping(map) => Some(
                map.iter()
                    .filter_map(|(key, value)| key.scalar_text().map(|k| (k, value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => tagged.value.mapping_entries(),
            _ => None,
        }
    }
}
