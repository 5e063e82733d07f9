//! The node graph handed to the serializer.
//!
//! This module provides [`Node`], a cheap clonable handle to a scalar, sequence, or
//! mapping. Every node receives a [`NodeId`] when it is built. Cloning a handle shares
//! the node, and the serializer turns repeated references to one id into an anchor and
//! aliases. Two nodes built separately never share an id, even when their contents are
//! equal.
//!
//! ## Usage Patterns
//!
//! ### Creating Nodes
//!
//! ```rust
//! use serde_yaml_emit::{Node, ScalarStyle, FlowStyle};
//!
//! let text = Node::from("hello");
//! let count = Node::from(42);
//! let poem = Node::from("roses\nviolets\n").with_style(ScalarStyle::Literal);
//! let point = Node::seq(vec![Node::from(1), Node::from(2)]).with_flow_style(FlowStyle::Flow);
//! let doc = Node::map(vec![(Node::from("text"), text), (Node::from("point"), point)]);
//! assert_eq!(doc.entries().map(|e| e.len()), Some(2));
//! ```
//!
//! ### Sharing Nodes
//!
//! ```rust
//! use serde_yaml_emit::{node_to_string, Node};
//!
//! let shared = Node::seq(vec![Node::from("x"), Node::from("y")]);
//! let doc = Node::map(vec![
//!     (Node::from("first"), shared.clone()),
//!     (Node::from("second"), shared),
//! ]);
//! assert_eq!(
//!     node_to_string(&doc).unwrap(),
//!     "first: &id1\n  - x\n  - y\nsecond: *id1\n"
//! );
//! ```

use crate::resolver::tags;
use chrono::{DateTime, SecondsFormat, Utc};
use num_bigint::BigInt;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_NODE_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of a node, assigned once when the node is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three node shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

/// Caller preference for collection layout.
///
/// `Auto` lets the emitter decide: block style unless already inside a flow collection,
/// in canonical mode, or the collection is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlowStyle {
    #[default]
    Auto,
    Flow,
    Block,
}

/// Scalar presentation styles.
///
/// A requested style is a preference. The emitter falls back to a style that can
/// represent the text when the requested one cannot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl ScalarStyle {
    /// Returns the indicator character that introduces this style, if any.
    #[must_use]
    pub const fn indicator(&self) -> Option<char> {
        match self {
            ScalarStyle::Plain => None,
            ScalarStyle::SingleQuoted => Some('\''),
            ScalarStyle::DoubleQuoted => Some('"'),
            ScalarStyle::Literal => Some('|'),
            ScalarStyle::Folded => Some('>'),
        }
    }
}

/// Contents of a node.
#[derive(Clone, Debug)]
pub enum NodeValue {
    Scalar {
        value: String,
        style: Option<ScalarStyle>,
    },
    Sequence {
        items: Vec<Node>,
        flow_style: FlowStyle,
    },
    Mapping {
        entries: Vec<(Node, Node)>,
        flow_style: FlowStyle,
    },
}

#[derive(Clone, Debug)]
struct NodeData {
    id: NodeId,
    tag: String,
    anchor: Option<String>,
    value: NodeValue,
}

/// A shared handle to a node in the graph.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{Node, NodeKind};
///
/// let a = Node::from("same");
/// let b = Node::from("same");
/// let a2 = a.clone();
///
/// assert!(a.is_same(&a2));
/// assert!(!a.is_same(&b));
/// assert_eq!(a.kind(), NodeKind::Scalar);
/// assert_eq!(a.tag(), "tag:yaml.org,2002:str");
/// ```
#[derive(Clone, Debug)]
pub struct Node(Rc<NodeData>);

impl Node {
    fn build(tag: String, value: NodeValue) -> Self {
        Node(Rc::new(NodeData {
            id: NodeId::next(),
            tag,
            anchor: None,
            value,
        }))
    }

    /// Applies `f` to this node's data. A handle that is shared elsewhere is copied into a
    /// new node with a fresh id first, so other holders keep seeing the original.
    fn modify(mut self, f: impl FnOnce(&mut NodeData)) -> Self {
        match Rc::get_mut(&mut self.0) {
            Some(data) => {
                f(data);
                self
            }
            None => {
                let mut data = (*self.0).clone();
                data.id = NodeId::next();
                f(&mut data);
                Node(Rc::new(data))
            }
        }
    }

    /// Creates a scalar with an explicit tag.
    #[must_use]
    pub fn scalar(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::build(
            tag.into(),
            NodeValue::Scalar {
                value: value.into(),
                style: None,
            },
        )
    }

    /// Creates a string scalar.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Node::scalar(tags::STR, value)
    }

    /// Creates a null scalar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::Node;
    ///
    /// assert_eq!(Node::null().as_str(), Some("null"));
    /// ```
    #[must_use]
    pub fn null() -> Self {
        Node::scalar(tags::NULL, "null")
    }

    /// Creates a sequence with an explicit tag.
    #[must_use]
    pub fn sequence(tag: impl Into<String>, items: Vec<Node>) -> Self {
        Node::build(
            tag.into(),
            NodeValue::Sequence {
                items,
                flow_style: FlowStyle::Auto,
            },
        )
    }

    /// Creates a sequence with the default sequence tag.
    #[must_use]
    pub fn seq(items: Vec<Node>) -> Self {
        Node::sequence(tags::SEQ, items)
    }

    /// Creates a mapping with an explicit tag.
    #[must_use]
    pub fn mapping(tag: impl Into<String>, entries: Vec<(Node, Node)>) -> Self {
        Node::build(
            tag.into(),
            NodeValue::Mapping {
                entries,
                flow_style: FlowStyle::Auto,
            },
        )
    }

    /// Creates a mapping with the default mapping tag.
    #[must_use]
    pub fn map(entries: Vec<(Node, Node)>) -> Self {
        Node::mapping(tags::MAP, entries)
    }

    /// Requests a scalar style. Has no effect on collections.
    #[must_use]
    pub fn with_style(self, style: ScalarStyle) -> Self {
        self.modify(|data| {
            if let NodeValue::Scalar { style: s, .. } = &mut data.value {
                *s = Some(style);
            }
        })
    }

    /// Requests a collection layout. Has no effect on scalars.
    #[must_use]
    pub fn with_flow_style(self, flow_style: FlowStyle) -> Self {
        self.modify(|data| match &mut data.value {
            NodeValue::Sequence { flow_style: f, .. } | NodeValue::Mapping { flow_style: f, .. } => {
                *f = flow_style;
            }
            NodeValue::Scalar { .. } => {}
        })
    }

    /// Gives the node an anchor name of the caller's choosing.
    ///
    /// A named node is always emitted with its anchor, even when it appears only once.
    /// The name is validated when the node is emitted.
    #[must_use]
    pub fn with_anchor(self, anchor: &str) -> Self {
        let anchor = anchor.to_string();
        self.modify(|data| data.anchor = Some(anchor))
    }

    /// Replaces the node's tag.
    #[must_use]
    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.modify(|data| data.tag = tag)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.0.anchor.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &NodeValue {
        &self.0.value
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self.0.value {
            NodeValue::Scalar { .. } => NodeKind::Scalar,
            NodeValue::Sequence { .. } => NodeKind::Sequence,
            NodeValue::Mapping { .. } => NodeKind::Mapping,
        }
    }

    /// Returns `true` if both handles refer to the same node.
    #[inline]
    #[must_use]
    pub fn is_same(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// If the node is a scalar, returns its text. Otherwise returns `None`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.0.value {
            NodeValue::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    /// If the node is a sequence, returns its items. Otherwise returns `None`.
    #[must_use]
    pub fn items(&self) -> Option<&[Node]> {
        match &self.0.value {
            NodeValue::Sequence { items, .. } => Some(items),
            _ => None,
        }
    }

    /// If the node is a mapping, returns its entries. Otherwise returns `None`.
    #[must_use]
    pub fn entries(&self) -> Option<&[(Node, Node)]> {
        match &self.0.value {
            NodeValue::Mapping { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Looks up a mapping value by the text of a scalar key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::Node;
    ///
    /// let map = Node::map(vec![(Node::from("name"), Node::from("Alice"))]);
    /// assert_eq!(map.get("name").and_then(|n| n.as_str()), Some("Alice"));
    /// assert!(map.get("age").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }
}

/// Text for a float scalar: `.inf`, `-.inf`, `.NaN`, or decimal notation that always
/// carries a fractional part.
pub(crate) fn format_float(v: f64) -> String {
    if v.is_nan() {
        ".NaN".to_string()
    } else if v.is_infinite() {
        let text = if v > 0.0 { ".inf" } else { "-.inf" };
        text.to_string()
    } else {
        let s = v.to_string();
        if s.contains(['.', 'e', 'E']) {
            s
        } else {
            format!("{s}.0")
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::string(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::string(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::scalar(tags::BOOL, if value { "true" } else { "false" })
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::scalar(tags::INT, value.to_string())
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::scalar(tags::FLOAT, format_float(f64::from(value)))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::scalar(tags::FLOAT, format_float(value))
    }
}

impl From<BigInt> for Node {
    fn from(value: BigInt) -> Self {
        Node::scalar(tags::INT, value.to_string())
    }
}

impl From<DateTime<Utc>> for Node {
    fn from(value: DateTime<Utc>) -> Self {
        Node::scalar(
            tags::TIMESTAMP,
            value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::seq(items)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Node::null, Into::into)
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node::seq(iter.into_iter().collect())
    }
}

impl FromIterator<(Node, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (Node, Node)>>(iter: I) -> Self {
        Node::map(iter.into_iter().collect())
    }
}
