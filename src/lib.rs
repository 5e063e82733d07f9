//! # serde_yaml_emit
//!
//! A YAML document writer: node graphs and Serde values in, YAML text out.
//!
//! ## Pipeline
//!
//! Output is produced in three layers, each usable on its own:
//!
//! - **[`Serializer`]**: walks a [`Node`] graph, gives nodes that are reached more than
//!   once an anchor (`&id1`) and replaces later occurrences with an alias (`*id1`),
//!   attaches comments from a [`CommentStore`], and turns the graph into [`Event`]s
//! - **[`Emitter`]**: a pushdown state machine that consumes events with a small
//!   lookahead, picks a presentation for every collection and scalar, and writes text
//! - **[`analyzer`]**: classifies scalar text so the emitter only picks styles that read
//!   back as the same string
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_yaml_emit = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Serializing a struct
//!
//! ```rust
//! use serde::Serialize;
//! use serde_yaml_emit::to_string;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     tags: vec!["admin".to_string(), "user".to_string()],
//! };
//!
//! let yaml = to_string(&user).unwrap();
//! assert_eq!(yaml, "id: 123\nname: Alice\ntags:\n  - admin\n  - user\n");
//! ```
//!
//! ### Shared nodes
//!
//! Cloning a [`Node`] shares it. The shared node is written once and aliased afterwards:
//!
//! ```rust
//! use serde_yaml_emit::{node, node_to_string};
//!
//! let defaults = node!({"retries": 3});
//! let doc = node!({"dev": (defaults.clone()), "prod": defaults});
//! assert_eq!(
//!     node_to_string(&doc).unwrap(),
//!     "dev: &id1\n  retries: 3\nprod: *id1\n"
//! );
//! ```
//!
//! ### Comments
//!
//! ```rust
//! use serde::Serialize;
//! use serde_yaml_emit::{to_string_with_comments, CommentStore, EmitterOptions};
//!
//! #[derive(Serialize)]
//! struct Db { host: &'static str, port: u16 }
//!
//! #[derive(Serialize)]
//! struct Config { db: Db }
//!
//! let mut comments = CommentStore::new();
//! comments.insert_dotted("db.port", "Default port");
//!
//! let config = Config { db: Db { host: "localhost", port: 5432 } };
//! let yaml = to_string_with_comments(&config, &comments, EmitterOptions::new()).unwrap();
//! assert_eq!(yaml, "db:\n  host: localhost\n  # Default port\n  port: 5432\n");
//! ```
//!
//! ## Guarantees
//!
//! - Plain scalars are only written when they would resolve back to the same tag
//! - Each comment path is written at most once per document
//! - Anchor names are generated per document, starting again at `id1`
//! - No `unsafe` code
//!
//! ## Demos
//!
//! See the `demos/` directory: `simple.rs`, `anchors.rs`, `comments.rs` and
//! `custom_options.rs`. Run one with `cargo run --example <name>`.

pub mod analyzer;
mod chars;
pub mod comments;
pub mod emitter;
pub mod error;
pub mod event;
pub mod macros;
pub mod node;
pub mod options;
pub mod resolver;
pub mod ser;
pub mod serializer;
mod writer;

pub use comments::CommentStore;
pub use emitter::Emitter;
pub use error::{Error, Result};
pub use event::{Event, ImplicitTuple};
pub use node::{FlowStyle, Node, NodeId, NodeKind, NodeValue, ScalarStyle};
pub use options::{EmitterOptions, LineBreak, Version};
pub use resolver::{DefaultResolver, Resolver};
pub use ser::{to_node, NodeSerializer};
pub use serializer::Serializer;

use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a YAML string.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g., a map key that fails).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EmitterOptions::default())
}

/// Serialize any `T: Serialize` to a YAML string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{to_string_with_options, EmitterOptions};
///
/// let options = EmitterOptions::new().with_explicit_start(true);
/// let yaml = to_string_with_options(&vec![1, 2], options).unwrap();
/// assert_eq!(yaml, "---\n- 1\n- 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the options describe an
/// unsupported document (e.g., a `%YAML 2.0` directive).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EmitterOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let node = to_node(value)?;
    node_to_string_with_options(&node, options)
}

/// Serialize any `T: Serialize` to a YAML string, attaching `comments` by key path.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_comments<T>(
    value: &T,
    comments: &CommentStore,
    options: EmitterOptions,
) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let node = to_node(value)?;
    let mut serializer =
        Serializer::new(Vec::new(), options).with_comments(comments.clone());
    write_document(&mut serializer, &node)?;
    into_string(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a writer in YAML format.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("key", "value");
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &map).unwrap();
/// assert_eq!(buffer, b"key: value\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EmitterOptions::default())
}

/// Serialize any `T: Serialize` to a writer in YAML format with custom options.
///
/// Nothing reaches the writer until the document is complete.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(writer: W, value: &T, options: EmitterOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let node = to_node(value)?;
    let mut serializer = Serializer::new(writer, options);
    write_document(&mut serializer, &node)
}

/// Write one node graph as a single-document YAML string.
///
/// # Errors
///
/// Returns [`Error::Format`] when a node carries a malformed anchor or tag.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn node_to_string(node: &Node) -> Result<String> {
    node_to_string_with_options(node, EmitterOptions::default())
}

/// Write one node graph as a single-document YAML string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{node_to_string_with_options, EmitterOptions, Node};
///
/// let node = Node::seq(vec![Node::from(1), Node::from("two")]);
/// let yaml = node_to_string_with_options(&node, EmitterOptions::canonical()).unwrap();
/// assert_eq!(yaml, "---\n!!seq [\n  !!int \"1\",\n  !!str \"two\",\n]\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Format`] when a node carries a malformed anchor or tag.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn node_to_string_with_options(node: &Node, options: EmitterOptions) -> Result<String> {
    let mut serializer = Serializer::new(Vec::new(), options);
    write_document(&mut serializer, node)?;
    into_string(serializer.into_inner())
}

/// Feed a raw event stream straight to an [`Emitter`] and collect the text.
///
/// The stream must be complete: `StreamStart`, documents, then `StreamEnd`.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{emit_events, EmitterOptions, Event, FlowStyle};
///
/// let events = vec![
///     Event::StreamStart,
///     Event::document_start(),
///     Event::sequence_start(FlowStyle::Flow),
///     Event::plain_scalar("a"),
///     Event::plain_scalar("b"),
///     Event::SequenceEnd,
///     Event::DocumentEnd { explicit: false },
///     Event::StreamEnd,
/// ];
/// assert_eq!(emit_events(events, EmitterOptions::new()).unwrap(), "[a, b]\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::ProtocolViolation`] when the events are out of order.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn emit_events<I>(events: I, options: EmitterOptions) -> Result<String>
where
    I: IntoIterator<Item = Event>,
{
    let mut emitter = Emitter::new(Vec::new(), options);
    for event in events {
        emitter.emit(event)?;
    }
    into_string(emitter.into_inner())
}

fn write_document<W, R>(serializer: &mut Serializer<W, R>, node: &Node) -> Result<()>
where
    W: io::Write,
    R: Resolver,
{
    serializer.open()?;
    serializer.serialize(node)?;
    serializer.close()
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::custom(format!("emitted invalid UTF-8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_point() {
        let point = Point { x: 1, y: 2 };
        assert_eq!(to_string(&point).unwrap(), "x: 1\ny: 2\n");
    }

    #[test]
    fn test_serialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let yaml = to_string(&user).unwrap();
        assert_eq!(
            yaml,
            "id: 123\nname: Alice\nactive: true\ntags:\n  - admin\n  - user\n"
        );
    }

    #[test]
    fn test_top_level_scalar() {
        assert_eq!(to_string("hello").unwrap(), "hello\n");
        assert_eq!(to_string(&42).unwrap(), "42\n");
        assert_eq!(to_string(&()).unwrap(), "null\n");
    }

    #[test]
    fn test_empty_collections() {
        let empty: Vec<i32> = Vec::new();
        assert_eq!(to_string(&empty).unwrap(), "[]\n");
        assert_eq!(to_string(&BTreeMap::<String, i32>::new()).unwrap(), "{}\n");
    }

    #[test]
    fn test_to_writer() {
        let point = Point { x: 1, y: 2 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        assert_eq!(buffer, b"x: 1\ny: 2\n");
    }

    #[test]
    fn test_to_writer_with_options() {
        let options = EmitterOptions::new().with_explicit_start(true).with_explicit_end(true);
        let mut buffer = Vec::new();
        to_writer_with_options(&mut buffer, &vec!["a"], options).unwrap();
        assert_eq!(buffer, b"---\n- a\n...\n");
    }

    #[test]
    fn test_to_string_with_comments_root_header() {
        let mut comments = CommentStore::new();
        comments.insert_dotted("", "Generated file");
        comments.insert_dotted("b", "second");

        let mut map = BTreeMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        let yaml = to_string_with_comments(&map, &comments, EmitterOptions::new()).unwrap();
        assert_eq!(yaml, "# Generated file\na: 1\n# second\nb: 2\n");
    }

    #[test]
    fn test_emit_events_rejects_bad_stream() {
        let err = emit_events(vec![Event::StreamEnd], EmitterOptions::new()).unwrap_err();
        assert!(matches!(err, Error::ProtocolViolation { .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let options = EmitterOptions::new().with_version(Version::new(2, 0));
        let err = to_string_with_options(&1, options).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
