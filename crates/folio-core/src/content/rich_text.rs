//! Rich-text document tree and plain-text flattening.
//!
//! The CMS stores rich text as loosely shaped JSON. Posts keep that JSON as is
//! ([`RichText`]); [`RichTextNode`] is the reduced tree used for flattening and
//! is built from any `serde_json::Value` without failing:
//! - arrays become containers,
//! - objects with a string `text` become leaves (text wins over children),
//! - objects with `children` take the shape of that value,
//! - everything else is `Empty`.
//!
//! Trees have no depth limit. Conversion, flattening and drop all walk an
//! explicit stack.

use std::mem;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of a rich-text tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RichTextNode {
    /// Literal text, kept verbatim.
    Leaf(String),
    /// Ordered children.
    Container(Vec<RichTextNode>),
    /// Absent or unrecognised node.
    #[default]
    Empty,
}

impl RichTextNode {
    pub fn text(s: impl Into<String>) -> Self {
        RichTextNode::Leaf(s.into())
    }

    pub fn container(children: impl IntoIterator<Item = RichTextNode>) -> Self {
        RichTextNode::Container(children.into_iter().collect())
    }

    /// Children of a container; other variants have none.
    pub fn children(&self) -> &[RichTextNode] {
        match self {
            RichTextNode::Container(children) => children,
            _ => &[],
        }
    }
}

impl Drop for RichTextNode {
    fn drop(&mut self) {
        let RichTextNode::Container(children) = self else {
            return;
        };
        if children.iter().all(|c| c.children().is_empty()) {
            return;
        }
        let mut pending = mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let RichTextNode::Container(grandchildren) = &mut node {
                pending.append(grandchildren);
            }
        }
    }
}

/// What a single JSON value turns into before its children are visited.
enum Shape {
    Node(RichTextNode),
    Children(Vec<Value>),
}

fn shape_of(mut v: Value) -> Shape {
    loop {
        match v {
            Value::Array(items) => return Shape::Children(items),
            Value::Object(mut map) => {
                if let Some(Value::String(text)) = map.remove("text") {
                    return Shape::Node(RichTextNode::Leaf(text));
                }
                match map.remove("children") {
                    Some(children) => v = children,
                    None => return Shape::Node(RichTextNode::Empty),
                }
            }
            _ => return Shape::Node(RichTextNode::Empty),
        }
    }
}

impl From<Value> for RichTextNode {
    fn from(v: Value) -> Self {
        let mut stack: Vec<(std::vec::IntoIter<Value>, Vec<RichTextNode>)> = Vec::new();
        let mut pending = Some(v);
        loop {
            if let Some(v) = pending.take() {
                match shape_of(v) {
                    Shape::Children(items) => stack.push((items.into_iter(), Vec::new())),
                    Shape::Node(node) => match stack.last_mut() {
                        Some((_, built)) => built.push(node),
                        None => return node,
                    },
                }
            }

            let Some((items, _)) = stack.last_mut() else {
                return RichTextNode::Empty;
            };
            if let Some(child) = items.next() {
                pending = Some(child);
                continue;
            }
            let Some((_, built)) = stack.pop() else {
                return RichTextNode::Empty;
            };
            let node = RichTextNode::Container(built);
            match stack.last_mut() {
                Some((_, parent)) => parent.push(node),
                None => return node,
            }
        }
    }
}

fn leaf_value(text: String) -> Value {
    let mut map = Map::new();
    map.insert("text".into(), Value::String(text));
    Value::Object(map)
}

fn container_value(children: Vec<Value>) -> Value {
    let mut map = Map::new();
    map.insert("children".into(), Value::Array(children));
    Value::Object(map)
}

impl From<RichTextNode> for Value {
    fn from(node: RichTextNode) -> Self {
        let mut stack: Vec<(std::vec::IntoIter<RichTextNode>, Vec<Value>)> = Vec::new();
        let mut pending = Some(node);
        loop {
            if let Some(mut node) = pending.take() {
                let value = match &mut node {
                    RichTextNode::Leaf(text) => Some(leaf_value(mem::take(text))),
                    RichTextNode::Empty => Some(Value::Null),
                    RichTextNode::Container(children) => {
                        stack.push((mem::take(children).into_iter(), Vec::new()));
                        None
                    }
                };
                if let Some(value) = value {
                    match stack.last_mut() {
                        Some((_, built)) => built.push(value),
                        None => return value,
                    }
                }
            }

            let Some((items, _)) = stack.last_mut() else {
                return Value::Null;
            };
            if let Some(child) = items.next() {
                pending = Some(child);
                continue;
            }
            let Some((_, built)) = stack.pop() else {
                return Value::Null;
            };
            let value = container_value(built);
            match stack.last_mut() {
                Some((_, parent)) => parent.push(value),
                None => return value,
            }
        }
    }
}

/// Rich-text field value as stored on a post (`{ "root": { ... } }`).
///
/// The document is kept verbatim so node types, formats and block fields
/// survive storage and are served back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(Value);

impl RichText {
    /// Document whose root is the given reduced tree.
    pub fn with_root(root: RichTextNode) -> Self {
        let mut map = Map::new();
        map.insert("root".into(), Value::from(root));
        Self(Value::Object(map))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The document root, if present and not null.
    pub fn root(&self) -> Option<&Value> {
        self.0.get("root").filter(|r| !r.is_null())
    }

    /// Plain text of the root's children. A root without children is blank.
    pub fn root_children_text(&self) -> Option<String> {
        let root = self.root()?;
        Some(match root.get("children") {
            Some(children) => extract_plain_text(&RichTextNode::from(children.clone())),
            None => String::new(),
        })
    }
}

impl From<Value> for RichText {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

/// Flatten a node into plain text.
///
/// Depth-first and order preserving. Leaves are returned untouched; siblings
/// are joined by a single space after dropping empty results.
pub fn extract_plain_text(node: &RichTextNode) -> String {
    extract_plain_text_seq(std::slice::from_ref(node))
}

/// Flatten a sequence of sibling nodes.
///
/// A container's text is the space-joined text of its non-empty leaves, so
/// the walk only has to emit those leaves in order.
pub fn extract_plain_text_seq(nodes: &[RichTextNode]) -> String {
    let mut out = String::new();
    let mut stack = vec![nodes.iter()];
    while let Some(iter) = stack.last_mut() {
        let Some(node) = iter.next() else {
            stack.pop();
            continue;
        };
        match node {
            RichTextNode::Leaf(text) if !text.is_empty() => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(text);
            }
            RichTextNode::Container(children) => stack.push(children.iter()),
            _ => {}
        }
    }
    out
}
