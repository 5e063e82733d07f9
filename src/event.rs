//! Events passed from the serializer to the emitter.
//!
//! A well-formed stream has the shape
//!
//! ```text
//! StreamStart (DocumentStart node DocumentEnd)* StreamEnd
//! node := Alias | Scalar | SequenceStart node* SequenceEnd
//!       | MappingStart (node node)* MappingEnd
//! ```
//!
//! Events can also be fed to [`crate::Emitter`] directly, which is how callers produce
//! output the serializer does not generate, such as multi-document streams with mixed
//! markers.

use crate::node::{FlowStyle, ScalarStyle};
use crate::options::Version;
use indexmap::IndexMap;

/// Whether a scalar's tag can be left off.
///
/// The first flag applies when the scalar is written plain, the second when it is written
/// in any quoted or block style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImplicitTuple {
    pub plain: bool,
    pub quoted: bool,
}

impl ImplicitTuple {
    #[must_use]
    pub const fn new(plain: bool, quoted: bool) -> Self {
        ImplicitTuple { plain, quoted }
    }

    /// Both forms may omit the tag.
    pub const ALL: ImplicitTuple = ImplicitTuple::new(true, true);

    /// The tag must always be written.
    pub const NONE: ImplicitTuple = ImplicitTuple::new(false, false);
}

/// A single emitter event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    StreamStart,
    StreamEnd,
    DocumentStart {
        explicit: bool,
        version: Option<Version>,
        /// Tag directives for this document, handle to prefix.
        tags: IndexMap<String, String>,
    },
    DocumentEnd {
        explicit: bool,
    },
    Alias {
        anchor: String,
        /// Comment text written on the lines above the alias.
        comment: Option<String>,
    },
    Scalar {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: ImplicitTuple,
        value: String,
        style: Option<ScalarStyle>,
        /// Comment text written on the lines above the scalar, one entry per `\n`.
        comment: Option<String>,
    },
    SequenceStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        flow_style: FlowStyle,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        flow_style: FlowStyle,
    },
    MappingEnd,
}

impl Event {
    /// Implicit document start with no directives.
    #[must_use]
    pub fn document_start() -> Self {
        Event::DocumentStart {
            explicit: false,
            version: None,
            tags: IndexMap::new(),
        }
    }

    /// Plain string scalar with no anchor, tag, or comment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::{emit_events, EmitterOptions, Event};
    ///
    /// let events = vec![
    ///     Event::StreamStart,
    ///     Event::document_start(),
    ///     Event::plain_scalar("hello"),
    ///     Event::DocumentEnd { explicit: false },
    ///     Event::StreamEnd,
    /// ];
    /// assert_eq!(emit_events(events, EmitterOptions::new()).unwrap(), "hello\n");
    /// ```
    #[must_use]
    pub fn plain_scalar(value: &str) -> Self {
        Event::Scalar {
            anchor: None,
            tag: None,
            implicit: ImplicitTuple::ALL,
            value: value.to_string(),
            style: None,
            comment: None,
        }
    }

    /// Alias to `anchor` with no comment.
    #[must_use]
    pub fn alias(anchor: &str) -> Self {
        Event::Alias {
            anchor: anchor.to_string(),
            comment: None,
        }
    }

    /// Block-or-flow sequence start with no anchor or tag.
    #[must_use]
    pub fn sequence_start(flow_style: FlowStyle) -> Self {
        Event::SequenceStart {
            anchor: None,
            tag: None,
            implicit: true,
            flow_style,
        }
    }

    /// Block-or-flow mapping start with no anchor or tag.
    #[must_use]
    pub fn mapping_start(flow_style: FlowStyle) -> Self {
        Event::MappingStart {
            anchor: None,
            tag: None,
            implicit: true,
            flow_style,
        }
    }

    /// Name of the event kind, used in protocol violation messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::StreamStart => "StreamStart",
            Event::StreamEnd => "StreamEnd",
            Event::DocumentStart { .. } => "DocumentStart",
            Event::DocumentEnd { .. } => "DocumentEnd",
            Event::Alias { .. } => "Alias",
            Event::Scalar { .. } => "Scalar",
            Event::SequenceStart { .. } => "SequenceStart",
            Event::SequenceEnd => "SequenceEnd",
            Event::MappingStart { .. } => "MappingStart",
            Event::MappingEnd => "MappingEnd",
        }
    }

    pub(crate) fn anchor(&self) -> Option<&str> {
        match self {
            Event::Alias { anchor, .. } => Some(anchor),
            Event::Scalar { anchor, .. }
            | Event::SequenceStart { anchor, .. }
            | Event::MappingStart { anchor, .. } => anchor.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn tag(&self) -> Option<&str> {
        match self {
            Event::Scalar { tag, .. }
            | Event::SequenceStart { tag, .. }
            | Event::MappingStart { tag, .. } => tag.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn is_collection_start(&self) -> bool {
        matches!(self, Event::SequenceStart { .. } | Event::MappingStart { .. })
    }

    pub(crate) fn comment(&self) -> Option<&str> {
        match self {
            Event::Alias { comment, .. } | Event::Scalar { comment, .. } => comment.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn is_node(&self) -> bool {
        matches!(self, Event::Alias { .. } | Event::Scalar { .. }) || self.is_collection_start()
    }
}
