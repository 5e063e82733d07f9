//! The event-driven emitter.
//!
//! [`Emitter`] is a pushdown state machine. Each call to [`Emitter::emit`] queues one
//! event; queued events are processed as soon as enough lookahead is buffered to decide
//! the layout of the event at the front of the queue:
//!
//! - a document start waits for the first event of the document (empty-document check),
//! - a sequence start waits for up to two more events (empty-sequence check),
//! - a mapping start waits for up to three more events (simple-key check).
//!
//! Buffering stops early once the queued events close the collection being examined.
//!
//! ## Examples
//!
//! ```rust
//! use serde_yaml_emit::{Emitter, EmitterOptions, Event, FlowStyle};
//!
//! let mut out = Vec::new();
//! let mut emitter = Emitter::new(&mut out, EmitterOptions::new());
//! for event in [
//!     Event::StreamStart,
//!     Event::document_start(),
//!     Event::sequence_start(FlowStyle::Flow),
//!     Event::plain_scalar("a"),
//!     Event::plain_scalar("b"),
//!     Event::SequenceEnd,
//!     Event::DocumentEnd { explicit: false },
//!     Event::StreamEnd,
//! ] {
//!     emitter.emit(event).unwrap();
//! }
//! assert_eq!(String::from_utf8(out).unwrap(), "[a, b]\n");
//! ```

use crate::analyzer::{analyze, choose_scalar_style, ScalarAnalysis, StyleContext};
use crate::comments::render_comment_lines;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::node::{FlowStyle, ScalarStyle};
use crate::options::{EmitterOptions, Version};
use crate::writer::Writer;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use tracing::{debug, trace};

/// Scalars longer than this are never written as simple keys.
const MAX_SIMPLE_KEY_LENGTH: usize = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    StreamStart,
    FirstDocumentStart,
    DocumentStart,
    DocumentRoot,
    DocumentEnd,
    FirstFlowSequenceItem,
    FlowSequenceItem,
    FirstFlowMappingKey,
    FlowMappingKey,
    FlowMappingSimpleValue,
    FlowMappingValue,
    FirstBlockSequenceItem,
    BlockSequenceItem,
    FirstBlockMappingKey,
    BlockMappingKey,
    BlockMappingSimpleValue,
    BlockMappingValue,
    Nothing,
}

/// Scratch state for the event being processed. Dropped when the event is done.
struct EventContext {
    event: Event,
    root: bool,
    mapping: bool,
    simple_key: bool,
    analysis: Option<ScalarAnalysis>,
    style: Option<ScalarStyle>,
    prepared_anchor: Option<String>,
    prepared_tag: Option<String>,
}

impl EventContext {
    fn new(event: Event) -> Self {
        EventContext {
            event,
            root: false,
            mapping: false,
            simple_key: false,
            analysis: None,
            style: None,
            prepared_anchor: None,
            prepared_tag: None,
        }
    }
}

/// Writes YAML text for a stream of [`Event`]s.
pub struct Emitter<W: io::Write> {
    writer: Writer<W>,
    options: EmitterOptions,
    best_indent: usize,
    best_width: usize,
    state: State,
    states: Vec<State>,
    events: VecDeque<Event>,
    indents: Vec<Option<usize>>,
    indent: Option<usize>,
    flow_level: usize,
    /// Tag prefix to handle, for the current document.
    tag_prefixes: BTreeMap<String, String>,
}

fn default_tag_prefixes() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("!".to_string(), "!".to_string()),
        ("tag:yaml.org,2002:".to_string(), "!!".to_string()),
    ])
}

impl<W: io::Write> Emitter<W> {
    #[must_use]
    pub fn new(sink: W, options: EmitterOptions) -> Self {
        Emitter {
            writer: Writer::new(sink, &options),
            best_indent: options.best_indent(),
            best_width: options.best_width(),
            options,
            state: State::StreamStart,
            states: Vec::new(),
            events: VecDeque::new(),
            indents: Vec::new(),
            indent: None,
            flow_level: 0,
            tag_prefixes: default_tag_prefixes(),
        }
    }

    /// Returns the sink. Output of events still waiting for lookahead is lost.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Queues `event` and processes every queued event whose layout can now be decided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProtocolViolation`] when the event does not fit the stream
    /// grammar, [`Error::Format`] for a malformed anchor, tag, or directive, and
    /// [`Error::Io`] when the sink fails.
    pub fn emit(&mut self, event: Event) -> Result<()> {
        self.events.push_back(event);
        while !self.need_more_events() {
            let Some(event) = self.events.pop_front() else {
                break;
            };
            trace!(event = event.kind_name(), state = ?self.state, "emit");
            let mut cx = EventContext::new(event);
            self.dispatch(&mut cx)?;
        }
        Ok(())
    }

    fn need_more_events(&self) -> bool {
        match self.events.front() {
            None => true,
            Some(Event::DocumentStart { .. }) => self.need_events(1),
            Some(Event::SequenceStart { .. }) => self.need_events(2),
            Some(Event::MappingStart { .. }) => self.need_events(3),
            Some(_) => false,
        }
    }

    fn need_events(&self, count: usize) -> bool {
        let mut level: i32 = 0;
        for event in self.events.iter().skip(1) {
            match event {
                Event::DocumentStart { .. } | Event::SequenceStart { .. } | Event::MappingStart { .. } => {
                    level += 1;
                }
                Event::DocumentEnd { .. } | Event::SequenceEnd | Event::MappingEnd => level -= 1,
                Event::StreamEnd => level = -1,
                _ => {}
            }
            if level < 0 {
                return false;
            }
        }
        self.events.len() < count + 1
    }

    fn dispatch(&mut self, cx: &mut EventContext) -> Result<()> {
        match self.state {
            State::StreamStart => self.expect_stream_start(cx),
            State::FirstDocumentStart => self.expect_document_start(cx, true),
            State::DocumentStart => self.expect_document_start(cx, false),
            State::DocumentRoot => self.expect_document_root(cx),
            State::DocumentEnd => self.expect_document_end(cx),
            State::FirstFlowSequenceItem => self.expect_flow_sequence_item(cx, true),
            State::FlowSequenceItem => self.expect_flow_sequence_item(cx, false),
            State::FirstFlowMappingKey => self.expect_flow_mapping_key(cx, true),
            State::FlowMappingKey => self.expect_flow_mapping_key(cx, false),
            State::FlowMappingSimpleValue => self.expect_flow_mapping_simple_value(cx),
            State::FlowMappingValue => self.expect_flow_mapping_value(cx),
            State::FirstBlockSequenceItem => self.expect_block_sequence_item(cx, true),
            State::BlockSequenceItem => self.expect_block_sequence_item(cx, false),
            State::FirstBlockMappingKey => self.expect_block_mapping_key(cx, true),
            State::BlockMappingKey => self.expect_block_mapping_key(cx, false),
            State::BlockMappingSimpleValue => self.expect_block_mapping_simple_value(cx),
            State::BlockMappingValue => self.expect_block_mapping_value(cx),
            State::Nothing => Err(Error::protocol_violation("nothing", cx.event.kind_name())),
        }
    }

    fn pop_state(&mut self) -> Result<()> {
        self.state = self
            .states
            .pop()
            .ok_or_else(|| Error::protocol_violation("an open node", "an unbalanced stream"))?;
        Ok(())
    }

    fn pop_indent(&mut self) {
        self.indent = self.indents.pop().flatten();
    }

    fn increase_indent(&mut self, flow: bool, indentless: bool) {
        self.indents.push(self.indent);
        self.indent = match self.indent {
            None if flow => Some(self.best_indent),
            None => Some(0),
            Some(indent) if indentless => Some(indent),
            Some(indent) => Some(indent + self.best_indent),
        };
    }

    fn write_indent(&mut self) -> Result<()> {
        self.writer.write_indent(self.indent.unwrap_or(0))
    }

    // Stream and document handlers.

    fn expect_stream_start(&mut self, cx: &mut EventContext) -> Result<()> {
        match cx.event {
            Event::StreamStart => {
                self.state = State::FirstDocumentStart;
                Ok(())
            }
            ref other => Err(Error::protocol_violation("StreamStart", other.kind_name())),
        }
    }

    fn expect_document_start(&mut self, cx: &mut EventContext, first: bool) -> Result<()> {
        match &cx.event {
            Event::DocumentStart {
                explicit,
                version,
                tags,
            } => {
                debug!(first, explicit, directives = tags.len(), "document start");
                if (version.is_some() || !tags.is_empty()) && self.writer.open_ended {
                    self.writer.write_indicator("...", true, false, false)?;
                    self.write_indent()?;
                }
                if let Some(version) = version {
                    let text = prepare_version(*version)?;
                    self.writer.write_version_directive(&text)?;
                }
                self.tag_prefixes = default_tag_prefixes();
                let mut handles: Vec<&String> = tags.keys().collect();
                handles.sort();
                for handle in handles {
                    let prefix = &tags[handle];
                    self.tag_prefixes.insert(prefix.clone(), handle.clone());
                    let handle_text = prepare_tag_handle(handle)?;
                    let prefix_text = prepare_tag_prefix(prefix)?;
                    self.writer.write_tag_directive(&handle_text, &prefix_text)?;
                }
                let implicit = first
                    && !explicit
                    && !self.options.canonical
                    && version.is_none()
                    && tags.is_empty()
                    && !self.check_empty_document();
                if !implicit {
                    self.write_indent()?;
                    self.writer.write_indicator("---", true, false, false)?;
                    if self.options.canonical {
                        self.write_indent()?;
                    }
                }
                self.state = State::DocumentRoot;
                Ok(())
            }
            Event::StreamEnd => {
                self.writer.flush()?;
                self.state = State::Nothing;
                Ok(())
            }
            other => Err(Error::protocol_violation("DocumentStart", other.kind_name())),
        }
    }

    fn expect_document_end(&mut self, cx: &mut EventContext) -> Result<()> {
        match cx.event {
            Event::DocumentEnd { explicit } => {
                self.write_indent()?;
                if explicit {
                    self.writer.write_indicator("...", true, false, false)?;
                    self.write_indent()?;
                }
                self.state = State::DocumentStart;
                Ok(())
            }
            ref other => Err(Error::protocol_violation("DocumentEnd", other.kind_name())),
        }
    }

    fn expect_document_root(&mut self, cx: &mut EventContext) -> Result<()> {
        self.states.push(State::DocumentEnd);
        self.write_comment(cx)?;
        self.expect_node(cx, true, false, false)
    }

    // Node handlers.

    fn expect_node(
        &mut self,
        cx: &mut EventContext,
        root: bool,
        mapping: bool,
        simple_key: bool,
    ) -> Result<()> {
        cx.root = root;
        cx.mapping = mapping;
        cx.simple_key = simple_key;

        if matches!(cx.event, Event::Alias { .. }) {
            return self.expect_alias(cx);
        }
        if !cx.event.is_node() {
            return Err(Error::protocol_violation("a node", cx.event.kind_name()));
        }

        self.process_anchor(cx, "&")?;
        self.process_tag(cx)?;

        let (is_sequence, flow_style) = match cx.event {
            Event::Scalar { .. } => return self.expect_scalar(cx),
            Event::SequenceStart { flow_style, .. } => (true, flow_style),
            Event::MappingStart { flow_style, .. } => (false, flow_style),
            _ => return Err(Error::protocol_violation("a node", cx.event.kind_name())),
        };
        let flow = self.flow_level > 0
            || self.options.canonical
            || flow_style == FlowStyle::Flow
            || self.check_empty_collection(cx);
        match (is_sequence, flow) {
            (true, true) => self.expect_flow_collection("[", State::FirstFlowSequenceItem),
            (false, true) => self.expect_flow_collection("{", State::FirstFlowMappingKey),
            (true, false) => {
                let indentless =
                    cx.mapping && !self.writer.indention && self.options.indentless_sequences;
                self.increase_indent(false, indentless);
                self.state = State::FirstBlockSequenceItem;
                Ok(())
            }
            (false, false) => {
                self.increase_indent(false, false);
                self.state = State::FirstBlockMappingKey;
                Ok(())
            }
        }
    }

    fn expect_alias(&mut self, cx: &mut EventContext) -> Result<()> {
        self.process_anchor(cx, "*")?;
        self.pop_state()
    }

    fn expect_scalar(&mut self, cx: &mut EventContext) -> Result<()> {
        self.increase_indent(true, false);
        self.process_scalar(cx)?;
        self.pop_indent();
        self.pop_state()
    }

    // Flow collection handlers.

    fn expect_flow_collection(&mut self, indicator: &str, next: State) -> Result<()> {
        self.writer.write_indicator(indicator, true, true, false)?;
        self.flow_level += 1;
        self.increase_indent(true, false);
        self.state = next;
        Ok(())
    }

    fn wants_flow_break(&self) -> bool {
        self.options.canonical
            || (self.writer.column > self.best_width && self.options.split_lines)
            || self.options.pretty_flow
    }

    fn close_flow_collection(&mut self, indicator: &str, first: bool) -> Result<()> {
        self.pop_indent();
        self.flow_level -= 1;
        if !first {
            if self.options.canonical {
                self.writer.write_indicator(",", false, false, false)?;
                self.write_indent()?;
            } else if self.options.pretty_flow {
                self.write_indent()?;
            }
        }
        self.writer.write_indicator(indicator, false, false, false)?;
        self.pop_state()
    }

    fn expect_flow_sequence_item(&mut self, cx: &mut EventContext, first: bool) -> Result<()> {
        if matches!(cx.event, Event::SequenceEnd) {
            return self.close_flow_collection("]", first);
        }
        if !first {
            self.writer.write_indicator(",", false, false, false)?;
        }
        if self.wants_flow_break() {
            self.write_indent()?;
        }
        self.states.push(State::FlowSequenceItem);
        self.expect_node(cx, false, false, false)
    }

    fn expect_flow_mapping_key(&mut self, cx: &mut EventContext, first: bool) -> Result<()> {
        if matches!(cx.event, Event::MappingEnd) {
            return self.close_flow_collection("}", first);
        }
        if !first {
            self.writer.write_indicator(",", false, false, false)?;
        }
        if self.wants_flow_break() {
            self.write_indent()?;
        }
        if !self.options.canonical && self.check_simple_key(cx)? {
            self.states.push(State::FlowMappingSimpleValue);
            self.expect_node(cx, false, true, true)
        } else {
            self.writer.write_indicator("?", true, false, false)?;
            self.states.push(State::FlowMappingValue);
            self.expect_node(cx, false, true, false)
        }
    }

    fn expect_flow_mapping_simple_value(&mut self, cx: &mut EventContext) -> Result<()> {
        self.writer.write_indicator(":", false, false, false)?;
        self.states.push(State::FlowMappingKey);
        self.expect_node(cx, false, true, false)
    }

    fn expect_flow_mapping_value(&mut self, cx: &mut EventContext) -> Result<()> {
        if self.options.canonical || self.writer.column > self.best_width || self.options.pretty_flow {
            self.write_indent()?;
        }
        self.writer.write_indicator(":", true, false, false)?;
        self.states.push(State::FlowMappingKey);
        self.expect_node(cx, false, true, false)
    }

    // Block collection handlers.

    fn expect_block_sequence_item(&mut self, cx: &mut EventContext, first: bool) -> Result<()> {
        if !first && matches!(cx.event, Event::SequenceEnd) {
            self.pop_indent();
            return self.pop_state();
        }
        self.write_comment(cx)?;
        self.write_indent()?;
        self.writer.write_indicator("-", true, false, true)?;
        self.states.push(State::BlockSequenceItem);
        self.expect_node(cx, false, false, false)
    }

    fn expect_block_mapping_key(&mut self, cx: &mut EventContext, first: bool) -> Result<()> {
        if !first && matches!(cx.event, Event::MappingEnd) {
            self.pop_indent();
            return self.pop_state();
        }
        self.write_comment(cx)?;
        self.write_indent()?;
        if self.check_simple_key(cx)? {
            self.states.push(State::BlockMappingSimpleValue);
            self.expect_node(cx, false, true, true)
        } else {
            self.writer.write_indicator("?", true, false, true)?;
            self.states.push(State::BlockMappingValue);
            self.expect_node(cx, false, true, false)
        }
    }

    fn expect_block_mapping_simple_value(&mut self, cx: &mut EventContext) -> Result<()> {
        self.writer.write_indicator(":", false, false, false)?;
        self.states.push(State::BlockMappingKey);
        self.expect_node(cx, false, true, false)
    }

    fn expect_block_mapping_value(&mut self, cx: &mut EventContext) -> Result<()> {
        self.write_indent()?;
        self.writer.write_indicator(":", true, false, true)?;
        self.states.push(State::BlockMappingKey);
        self.expect_node(cx, false, true, false)
    }

    // Lookahead checks.

    fn check_empty_document(&self) -> bool {
        matches!(
            self.events.front(),
            Some(Event::Scalar { anchor: None, tag: None, value, .. }) if value.is_empty()
        )
    }

    fn check_empty_collection(&self, cx: &EventContext) -> bool {
        matches!(
            (&cx.event, self.events.front()),
            (Event::SequenceStart { .. }, Some(Event::SequenceEnd))
                | (Event::MappingStart { .. }, Some(Event::MappingEnd))
        )
    }

    fn check_simple_key(&self, cx: &mut EventContext) -> Result<bool> {
        let mut length = 0;
        if let Some(anchor) = cx.event.anchor() {
            if cx.prepared_anchor.is_none() {
                cx.prepared_anchor = Some(prepare_anchor(anchor)?);
            }
            length += cx.prepared_anchor.as_deref().map_or(0, str::len);
        }
        if let Some(tag) = cx.event.tag() {
            if cx.prepared_tag.is_none() {
                cx.prepared_tag = Some(self.prepare_tag(tag)?);
            }
            length += cx.prepared_tag.as_deref().map_or(0, str::len);
        }
        if let Event::Scalar { value, .. } = &cx.event {
            let analysis = *cx
                .analysis
                .get_or_insert_with(|| analyze(value, self.options.allow_unicode));
            length += value.chars().count();
            return Ok(length < MAX_SIMPLE_KEY_LENGTH
                && !analysis.is_empty
                && !analysis.has_line_breaks);
        }
        Ok(length < MAX_SIMPLE_KEY_LENGTH
            && (matches!(cx.event, Event::Alias { .. }) || self.check_empty_collection(cx)))
    }

    // Anchors, tags, and scalars.

    fn process_anchor(&mut self, cx: &mut EventContext, indicator: &str) -> Result<()> {
        let Some(anchor) = cx.event.anchor() else {
            cx.prepared_anchor = None;
            return Ok(());
        };
        let prepared = match cx.prepared_anchor.take() {
            Some(prepared) => prepared,
            None => prepare_anchor(anchor)?,
        };
        self.writer
            .write_indicator(&format!("{indicator}{prepared}"), true, false, false)
    }

    fn style_context(&self, cx: &EventContext) -> StyleContext {
        StyleContext {
            in_flow: self.flow_level > 0,
            simple_key: cx.simple_key,
            canonical: self.options.canonical,
        }
    }

    fn process_tag(&mut self, cx: &mut EventContext) -> Result<()> {
        let mut tag = cx.event.tag().map(str::to_string);
        match &cx.event {
            Event::Scalar {
                implicit,
                value,
                style,
                ..
            } => {
                let analysis = *cx
                    .analysis
                    .get_or_insert_with(|| analyze(value, self.options.allow_unicode));
                let chosen = match cx.style {
                    Some(chosen) => chosen,
                    None => {
                        let chosen = choose_scalar_style(
                            &analysis,
                            *style,
                            implicit.plain,
                            self.style_context(cx),
                        );
                        cx.style = Some(chosen);
                        chosen
                    }
                };
                let omit = if chosen == ScalarStyle::Plain {
                    implicit.plain
                } else {
                    implicit.quoted
                };
                if (!self.options.canonical || tag.is_none()) && omit {
                    cx.prepared_tag = None;
                    return Ok(());
                }
                if implicit.plain && tag.is_none() {
                    tag = Some("!".to_string());
                    cx.prepared_tag = None;
                }
            }
            Event::SequenceStart { implicit, .. } | Event::MappingStart { implicit, .. } => {
                if (!self.options.canonical || tag.is_none()) && *implicit {
                    cx.prepared_tag = None;
                    return Ok(());
                }
            }
            other => return Err(Error::protocol_violation("a node", other.kind_name())),
        }

        let tag = tag.ok_or_else(|| Error::format("tag is not specified"))?;
        let prepared = match cx.prepared_tag.take() {
            Some(prepared) => prepared,
            None => self.prepare_tag(&tag)?,
        };
        if !prepared.is_empty() {
            self.writer.write_indicator(&prepared, true, false, false)?;
        }
        Ok(())
    }

    fn process_scalar(&mut self, cx: &mut EventContext) -> Result<()> {
        let Event::Scalar {
            value,
            style,
            implicit,
            ..
        } = &cx.event
        else {
            return Err(Error::protocol_violation("Scalar", cx.event.kind_name()));
        };
        let analysis = *cx
            .analysis
            .get_or_insert_with(|| analyze(value, self.options.allow_unicode));
        let chosen = match cx.style {
            Some(chosen) => chosen,
            None => choose_scalar_style(&analysis, *style, implicit.plain, self.style_context(cx)),
        };
        let split = !cx.simple_key && self.options.split_lines;
        let indent = self.indent.unwrap_or(0);
        match chosen {
            ScalarStyle::DoubleQuoted => self.writer.write_double_quoted(value, indent, split),
            ScalarStyle::SingleQuoted => self.writer.write_single_quoted(value, indent, split),
            ScalarStyle::Folded => self.writer.write_folded(value, indent),
            ScalarStyle::Literal => self.writer.write_literal(value, indent),
            ScalarStyle::Plain => self.writer.write_plain(value, indent, split, cx.root),
        }
    }

    /// Writes the comment carried by a scalar or alias on the lines above it.
    fn write_comment(&mut self, cx: &EventContext) -> Result<()> {
        if let Some(comment) = cx.event.comment() {
            let lines = render_comment_lines(comment, &self.options);
            self.writer.write_comment(&lines, self.indent.unwrap_or(0))?;
        }
        Ok(())
    }

    fn prepare_tag(&self, tag: &str) -> Result<String> {
        if tag.is_empty() {
            return Err(Error::format("tag must not be empty"));
        }
        if tag == "!" {
            return Ok(tag.to_string());
        }
        let mut handle: Option<&str> = None;
        let mut suffix = tag;
        for (prefix, prefix_handle) in &self.tag_prefixes {
            if tag.starts_with(prefix.as_str()) && (prefix == "!" || prefix.len() < tag.len()) {
                handle = Some(prefix_handle.as_str());
                suffix = &tag[prefix.len()..];
            }
        }
        let suffix_text = percent_encode(suffix, |ch| {
            ch.is_ascii_alphanumeric()
                || "-;/?:@&=+$,_.~*'()[]".contains(ch)
                || (ch == '!' && handle != Some("!"))
        });
        Ok(match handle {
            Some(handle) => format!("{handle}{suffix_text}"),
            None => format!("!<{suffix_text}>"),
        })
    }
}

fn percent_encode(text: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if keep(ch) {
            out.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

fn prepare_version(version: Version) -> Result<String> {
    if version.major != 1 {
        return Err(Error::format(format!(
            "unsupported YAML version: {}.{}",
            version.major, version.minor
        )));
    }
    Ok(format!("{}.{}", version.major, version.minor))
}

fn is_anchor_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn prepare_anchor(anchor: &str) -> Result<String> {
    if anchor.is_empty() {
        return Err(Error::format("anchor must not be empty"));
    }
    if let Some(ch) = anchor.chars().find(|&ch| !is_anchor_char(ch)) {
        return Err(Error::format(format!(
            "invalid character {ch:?} in the anchor: {anchor:?}"
        )));
    }
    Ok(anchor.to_string())
}

fn prepare_tag_handle(handle: &str) -> Result<String> {
    if handle.is_empty() {
        return Err(Error::format("tag handle must not be empty"));
    }
    if !handle.starts_with('!') || !handle.ends_with('!') {
        return Err(Error::format(format!(
            "tag handle must start and end with '!': {handle:?}"
        )));
    }
    let inner = handle.get(1..handle.len().saturating_sub(1)).unwrap_or("");
    if let Some(ch) = inner.chars().find(|&ch| !is_anchor_char(ch)) {
        return Err(Error::format(format!(
            "invalid character {ch:?} in the tag handle: {handle:?}"
        )));
    }
    Ok(handle.to_string())
}

fn prepare_tag_prefix(prefix: &str) -> Result<String> {
    if prefix.is_empty() {
        return Err(Error::format("tag prefix must not be empty"));
    }
    let (head, rest) = match prefix.strip_prefix('!') {
        Some(rest) => ("!", rest),
        None => ("", prefix),
    };
    let encoded = percent_encode(rest, |ch| {
        ch.is_ascii_alphanumeric() || "-;/?!:@&=+$,_.~*'()[]".contains(ch)
    });
    Ok(format!("{head}{encoded}"))
}
