//! Configuration tree model.
//!
//! A device configuration is one [`ConfigNode`] tree: scalars at the
//! leaves, sequences and mappings above them. Mappings keep insertion
//! order so diagnostics follow the order the user wrote. The schema and
//! type-coercion layer runs before this crate, so every leaf is already
//! well-typed; the accessors here only project, they never coerce
//! strings.

use std::fmt;

use serde::Serialize;

/// A leaf value in the configuration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Explicit null / empty value.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(String),
}

/// A node in the configuration tree.
///
/// The three shapes are a closed enumeration; every traversal in this
/// crate is an explicit `match` over them.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    /// Leaf value.
    Scalar(Scalar),
    /// Ordered sequence of child nodes.
    Sequence(Vec<ConfigNode>),
    /// Mapping from string key to child node, insertion order preserved.
    /// Keys are unique within one mapping.
    Mapping(Vec<(String, ConfigNode)>),
}

impl ConfigNode {
    /// Shorthand for an empty mapping.
    pub const fn empty_mapping() -> Self {
        ConfigNode::Mapping(Vec::new())
    }

    /// View this node as a mapping's entry list.
    pub fn as_mapping(&self) -> Option<&[(String, ConfigNode)]> {
        match self {
            ConfigNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// View this node as a sequence's element list.
    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a key in a mapping node. `None` for other shapes.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_mapping()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// View this node as a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigNode::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// View this node as a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigNode::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// View this node as an integer scalar.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigNode::Scalar(Scalar::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// View this node as a float. Integer scalars widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigNode::Scalar(Scalar::Float(f)) => Some(*f),
            ConfigNode::Scalar(Scalar::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ConfigNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigNode::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => ConfigNode::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => ConfigNode::Scalar(number_to_scalar(
                n.as_i64(),
                n.as_f64(),
            )),
            serde_json::Value::String(s) => ConfigNode::Scalar(Scalar::Str(s)),
            serde_json::Value::Array(items) => {
                ConfigNode::Sequence(items.into_iter().map(ConfigNode::from).collect())
            }
            serde_json::Value::Object(map) => ConfigNode::Mapping(
                map.into_iter().map(|(k, v)| (k, ConfigNode::from(v))).collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for ConfigNode {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Null => ConfigNode::Scalar(Scalar::Null),
            serde_yaml::Value::Bool(b) => ConfigNode::Scalar(Scalar::Bool(b)),
            serde_yaml::Value::Number(n) => ConfigNode::Scalar(number_to_scalar(
                n.as_i64(),
                n.as_f64(),
            )),
            serde_yaml::Value::String(s) => ConfigNode::Scalar(Scalar::Str(s)),
            serde_yaml::Value::Sequence(items) => {
                ConfigNode::Sequence(items.into_iter().map(ConfigNode::from).collect())
            }
            serde_yaml::Value::Mapping(map) => ConfigNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_to_string(&k), ConfigNode::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => ConfigNode::from(tagged.value),
        }
    }
}

fn number_to_scalar(int: Option<i64>, float: Option<f64>) -> Scalar {
    match (int, float) {
        (Some(i), _) => Scalar::Int(i),
        (None, Some(f)) => Scalar::Float(f),
        (None, None) => Scalar::Null,
    }
}

/// Mapping keys are strings after schema validation; non-string YAML keys
/// are rendered through their scalar form so a malformed document still
/// produces a usable diagnostic path.
fn yaml_key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => format!("{other:?}"),
    }
}

// =========================================================================
// Tree paths
// =========================================================================

/// One step of a [`TreePath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PathSegment {
    /// Mapping key.
    Key(String),
    /// Sequence index.
    Index(usize),
}

/// The location of a node within the configuration tree, used for error
/// reporting. Renders as `web_ui.sensors[2].name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TreePath {
    segments: Vec<PathSegment>,
}

impl TreePath {
    /// The path of the tree root (no segments).
    pub const fn root() -> Self {
        Self { segments: Vec::new() }
    }

    /// Extend this path with a mapping key.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_owned()));
        Self { segments }
    }

    /// Extend this path with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
