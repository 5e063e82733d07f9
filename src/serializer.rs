//! Node graph to event stream.
//!
//! The [`Serializer`] walks a node graph once per document. A pre-pass marks every node
//! reached more than once. During emission the first occurrence of a marked node carries
//! a generated anchor (`id1`, `id2`, ...) and every later occurrence becomes an alias.
//! Repetition is decided by [`NodeId`], never by comparing contents.
//!
//! ## Examples
//!
//! ```rust
//! use serde_yaml_emit::{EmitterOptions, Node, Serializer};
//!
//! let mut out = Vec::new();
//! let mut serializer = Serializer::new(&mut out, EmitterOptions::new());
//! serializer.open().unwrap();
//! serializer.serialize(&Node::from("first")).unwrap();
//! serializer.serialize(&Node::from("second")).unwrap();
//! serializer.close().unwrap();
//! drop(serializer);
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "first\n--- second\n");
//! ```

use crate::comments::CommentStore;
use crate::emitter::Emitter;
use crate::error::{Error, Result};
use crate::event::{Event, ImplicitTuple};
use crate::node::{Node, NodeId, NodeKind, NodeValue};
use crate::options::{EmitterOptions, Version};
use crate::resolver::{DefaultResolver, Resolver};
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};
use std::io;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Fresh,
    Open,
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum AnchorState {
    /// Reached once so far.
    Once,
    /// Reached more than once; a name is generated when the node is first emitted.
    Pending,
    Assigned(String),
}

/// Turns node graphs into events and feeds them to an [`Emitter`].
///
/// One serializer writes one stream: [`open`](Self::open) it, call
/// [`serialize`](Self::serialize) once per document, then [`close`](Self::close) it.
pub struct Serializer<W: io::Write, R: Resolver = DefaultResolver> {
    emitter: Emitter<W>,
    resolver: R,
    comments: CommentStore,
    explicit_start: bool,
    explicit_end: bool,
    version: Option<Version>,
    tags: IndexMap<String, String>,
    stage: Stage,
    anchors: HashMap<NodeId, AnchorState>,
    /// Caller-chosen anchor names in the current document.
    reserved: HashSet<String>,
    serialized: HashSet<NodeId>,
    last_anchor_id: usize,
    path: Vec<String>,
    consumed: HashSet<Vec<String>>,
    /// Document comment still waiting for the first scalar.
    header: Option<String>,
}

impl<W: io::Write> Serializer<W, DefaultResolver> {
    #[must_use]
    pub fn new(sink: W, options: EmitterOptions) -> Self {
        Serializer::with_resolver(sink, options, DefaultResolver)
    }
}

impl<W: io::Write, R: Resolver> Serializer<W, R> {
    /// Creates a serializer that decides implicit tags with `resolver`.
    #[must_use]
    pub fn with_resolver(sink: W, options: EmitterOptions, resolver: R) -> Self {
        Serializer {
            explicit_start: options.explicit_start,
            explicit_end: options.explicit_end,
            version: options.version,
            tags: options.tags.clone(),
            emitter: Emitter::new(sink, options),
            resolver,
            comments: CommentStore::new(),
            stage: Stage::Fresh,
            anchors: HashMap::new(),
            reserved: HashSet::new(),
            serialized: HashSet::new(),
            last_anchor_id: 0,
            path: Vec::new(),
            consumed: HashSet::new(),
            header: None,
        }
    }

    /// Attaches comments to the documents written by this serializer.
    #[must_use]
    pub fn with_comments(mut self, comments: CommentStore) -> Self {
        self.comments = comments;
        self
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }

    /// Starts the stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtocolState`] if the serializer was already opened.
    pub fn open(&mut self) -> Result<()> {
        match self.stage {
            Stage::Fresh => {
                self.emitter.emit(Event::StreamStart)?;
                self.stage = Stage::Open;
                Ok(())
            }
            Stage::Open => Err(Error::protocol_state("serializer is already opened")),
            Stage::Closed => Err(Error::protocol_state("serializer is closed")),
        }
    }

    /// Ends the stream and flushes the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtocolState`] if the serializer is not open.
    pub fn close(&mut self) -> Result<()> {
        match self.stage {
            Stage::Open => {
                self.emitter.emit(Event::StreamEnd)?;
                self.stage = Stage::Closed;
                Ok(())
            }
            Stage::Fresh => Err(Error::protocol_state("serializer is not opened")),
            Stage::Closed => Err(Error::protocol_state("serializer is already closed")),
        }
    }

    /// Writes `root` as one document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtocolState`] outside `open`/`close`, [`Error::Format`] for a
    /// malformed anchor or tag, and [`Error::Io`] when the sink fails.
    pub fn serialize(&mut self, root: &Node) -> Result<()> {
        match self.stage {
            Stage::Open => {}
            Stage::Fresh => return Err(Error::protocol_state("serializer is not opened")),
            Stage::Closed => return Err(Error::protocol_state("serializer is closed")),
        }

        self.emitter.emit(Event::DocumentStart {
            explicit: self.explicit_start,
            version: self.version,
            tags: self.tags.clone(),
        })?;
        self.anchor_node(root);
        self.header = self.comments.get(&[]).map(str::to_string);
        self.consumed.insert(Vec::new());

        let result = self.serialize_node(root);
        let anchors = self.last_anchor_id;
        self.reset_document();
        result?;

        debug!(anchors, "document serialized");
        self.emitter.emit(Event::DocumentEnd {
            explicit: self.explicit_end,
        })
    }

    fn reset_document(&mut self) {
        self.anchors.clear();
        self.reserved.clear();
        self.serialized.clear();
        self.last_anchor_id = 0;
        self.path.clear();
        self.consumed.clear();
        self.header = None;
    }

    /// Marks nodes reached more than once.
    fn anchor_node(&mut self, node: &Node) {
        if let Some(name) = node.anchor() {
            self.reserved.insert(name.to_string());
        }
        if let Some(state) = self.anchors.get_mut(&node.id()) {
            if *state == AnchorState::Once {
                *state = AnchorState::Pending;
            }
            return;
        }
        self.anchors.insert(node.id(), AnchorState::Once);
        match node.value() {
            NodeValue::Scalar { .. } => {}
            NodeValue::Sequence { items, .. } => {
                for item in items {
                    self.anchor_node(item);
                }
            }
            NodeValue::Mapping { entries, .. } => {
                for (key, value) in entries {
                    self.anchor_node(key);
                    self.anchor_node(value);
                }
            }
        }
    }

    fn generate_anchor(&mut self) -> String {
        loop {
            self.last_anchor_id += 1;
            let name = format!("id{}", self.last_anchor_id);
            if !self.reserved.contains(&name) {
                return name;
            }
        }
    }

    /// Anchor to write for `node`, naming a pending node on first use.
    fn anchor_for(&mut self, node: &Node) -> Option<String> {
        if let Some(name) = node.anchor() {
            return Some(name.to_string());
        }
        match self.anchors.get(&node.id()) {
            Some(AnchorState::Assigned(name)) => Some(name.clone()),
            Some(AnchorState::Pending) => {
                let name = self.generate_anchor();
                trace!(anchor = %name, node = %node.id(), "assigned anchor");
                self.anchors
                    .insert(node.id(), AnchorState::Assigned(name.clone()));
                Some(name)
            }
            _ => None,
        }
    }

    /// Comment for the node at the current path, plus the document comment if this is
    /// the first scalar.
    fn take_comment(&mut self) -> Option<String> {
        let header = self.header.take();
        let own = if self.consumed.contains(&self.path) {
            None
        } else {
            let own = self.comments.get(&self.path).map(str::to_string);
            if own.is_some() {
                self.consumed.insert(self.path.clone());
            }
            own
        };
        match (header, own) {
            (Some(header), Some(own)) => Some(format!("{header}\n{own}")),
            (header, own) => header.or(own),
        }
    }

    fn serialize_node(&mut self, node: &Node) -> Result<()> {
        if self.serialized.contains(&node.id()) {
            let anchor = self
                .anchor_for(node)
                .ok_or_else(|| Error::format("repeated node has no anchor"))?;
            let comment = self.take_comment();
            return self.emitter.emit(Event::Alias { anchor, comment });
        }
        self.serialized.insert(node.id());
        let anchor = self.anchor_for(node);
        let tag = node.tag().to_string();

        match node.value() {
            NodeValue::Scalar { value, style } => {
                let detected = self.resolver.resolve(NodeKind::Scalar, value, true);
                let default = self.resolver.resolve(NodeKind::Scalar, value, false);
                let implicit = ImplicitTuple::new(tag == detected, tag == default);
                let comment = self.take_comment();
                self.emitter.emit(Event::Scalar {
                    anchor,
                    tag: Some(tag),
                    implicit,
                    value: value.clone(),
                    style: *style,
                    comment,
                })
            }
            NodeValue::Sequence { items, flow_style } => {
                let implicit = tag == self.resolver.resolve(NodeKind::Sequence, "", true);
                self.emitter.emit(Event::SequenceStart {
                    anchor,
                    tag: Some(tag),
                    implicit,
                    flow_style: *flow_style,
                })?;
                for item in items {
                    self.serialize_node(item)?;
                }
                self.emitter.emit(Event::SequenceEnd)
            }
            NodeValue::Mapping {
                entries,
                flow_style,
            } => {
                let implicit = tag == self.resolver.resolve(NodeKind::Mapping, "", true);
                self.emitter.emit(Event::MappingStart {
                    anchor,
                    tag: Some(tag),
                    implicit,
                    flow_style: *flow_style,
                })?;
                for (key, value) in entries {
                    // Entries under a non-scalar key are addressed by an empty component.
                    self.path.push(key.as_str().unwrap_or_default().to_string());
                    let result = self
                        .serialize_node(key)
                        .and_then(|()| self.serialize_node(value));
                    self.path.pop();
                    result?;
                }
                self.emitter.emit(Event::MappingEnd)
            }
        }
    }
}
