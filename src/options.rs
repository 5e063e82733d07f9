//! Configuration options for YAML emission.
//!
//! This module provides types to customize the emitted text:
//!
//! - [`EmitterOptions`]: Main configuration struct
//! - [`LineBreak`]: Line terminator written between output lines
//! - [`Version`]: Value of an optional `%YAML` directive
//!
//! ## Examples
//!
//! ```rust
//! use serde_yaml_emit::{to_string_with_options, EmitterOptions, LineBreak};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! // Explicit document markers and 4-space indentation
//! let options = EmitterOptions::new()
//!     .with_explicit_start(true)
//!     .with_indent(4);
//! let yaml = to_string_with_options(&data, options).unwrap();
//! assert_eq!(yaml, "---\nx: 1\ny: 2\n");
//!
//! // Windows line endings
//! let options = EmitterOptions::new().with_line_break(LineBreak::Windows);
//! let yaml = to_string_with_options(&data, options).unwrap();
//! assert_eq!(yaml, "x: 1\r\ny: 2\r\n");
//! ```

use indexmap::IndexMap;

/// Line terminator written by the emitter.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::LineBreak;
///
/// assert_eq!(LineBreak::Unix.as_str(), "\n");
/// assert_eq!(LineBreak::Windows.as_str(), "\r\n");
/// assert_eq!(LineBreak::Mac.as_str(), "\r");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineBreak {
    #[default]
    Unix,
    Windows,
    Mac,
}

impl LineBreak {
    /// Returns the string representation of this line break.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineBreak::Unix => "\n",
            LineBreak::Windows => "\r\n",
            LineBreak::Mac => "\r",
        }
    }
}

/// A `%YAML major.minor` directive value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    /// YAML 1.1, the version whose implicit typing rules the default resolver follows.
    pub const V1_1: Version = Version { major: 1, minor: 1 };

    /// YAML 1.2.
    pub const V1_2: Version = Version { major: 1, minor: 2 };

    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Version { major, minor }
    }
}

/// Configuration options for YAML emission.
///
/// Controls layout (indentation, wrapping, flow vs block), scalar escaping, document
/// markers and directives, and how long comments are decorated.
///
/// # Examples
///
/// ```rust
/// use serde_yaml_emit::{EmitterOptions, Version};
///
/// // Default block-style options
/// let options = EmitterOptions::new();
///
/// // Canonical output: explicit tags, double-quoted scalars, flow collections
/// let options = EmitterOptions::canonical();
///
/// // Custom configuration
/// let options = EmitterOptions::new()
///     .with_width(40)
///     .with_allow_unicode(false)
///     .with_version(Version::V1_1);
/// ```
#[derive(Clone, Debug)]
pub struct EmitterOptions {
    pub canonical: bool,
    pub pretty_flow: bool,
    pub allow_unicode: bool,
    pub indent: usize,
    pub width: usize,
    pub split_lines: bool,
    /// Write a block sequence that is a mapping value at its key's indentation
    /// (`key:\n- item`) instead of one level deeper (`key:\n  - item`).
    pub indentless_sequences: bool,
    pub line_break: LineBreak,
    pub explicit_start: bool,
    pub explicit_end: bool,
    pub version: Option<Version>,
    /// Tag directives, handle to prefix.
    pub tags: IndexMap<String, String>,
    /// Minimum number of lines that turns a comment into a bordered block. Zero disables
    /// borders.
    pub long_comment_threshold: usize,
    pub long_comment_border: String,
    pub long_comment_right_border: Option<String>,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        EmitterOptions {
            canonical: false,
            pretty_flow: false,
            allow_unicode: true,
            indent: 2,
            width: 80,
            split_lines: true,
            indentless_sequences: false,
            line_break: LineBreak::default(),
            explicit_start: false,
            explicit_end: false,
            version: None,
            tags: IndexMap::new(),
            long_comment_threshold: 0,
            long_comment_border: "#".to_string(),
            long_comment_right_border: None,
        }
    }
}

impl EmitterOptions {
    /// Creates default options (block style, 2-space indent, 80-column wrapping).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::EmitterOptions;
    ///
    /// let options = EmitterOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert_eq!(options.width, 80);
    /// assert!(!options.canonical);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for canonical output.
    ///
    /// Every scalar is double-quoted, every tag is written, and every collection uses
    /// flow style with one entry per line.
    #[must_use]
    pub fn canonical() -> Self {
        EmitterOptions {
            canonical: true,
            ..Default::default()
        }
    }

    /// Creates options that break flow collections over several indented lines.
    #[must_use]
    pub fn pretty_flow() -> Self {
        EmitterOptions {
            pretty_flow: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    #[must_use]
    pub fn with_pretty_flow(mut self, pretty_flow: bool) -> Self {
        self.pretty_flow = pretty_flow;
        self
    }

    /// Allows non-ASCII printable characters to be written as-is.
    ///
    /// When disabled, such characters force double-quoted style and are escaped.
    #[must_use]
    pub fn with_allow_unicode(mut self, allow_unicode: bool) -> Self {
        self.allow_unicode = allow_unicode;
        self
    }

    /// Sets the block indentation width.
    ///
    /// Values outside `2..=9` fall back to 2 when the emitter is built.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::EmitterOptions;
    ///
    /// let options = EmitterOptions::new().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the preferred wrap column.
    ///
    /// Widths not greater than twice the indent fall back to 80.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_split_lines(mut self, split_lines: bool) -> Self {
        self.split_lines = split_lines;
        self
    }

    #[must_use]
    pub fn with_indentless_sequences(mut self, indentless_sequences: bool) -> Self {
        self.indentless_sequences = indentless_sequences;
        self
    }

    #[must_use]
    pub fn with_line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    #[must_use]
    pub fn with_explicit_start(mut self, explicit_start: bool) -> Self {
        self.explicit_start = explicit_start;
        self
    }

    #[must_use]
    pub fn with_explicit_end(mut self, explicit_end: bool) -> Self {
        self.explicit_end = explicit_end;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Adds a `%TAG` directive mapping `handle` to `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::EmitterOptions;
    ///
    /// let options = EmitterOptions::new().with_tag("!e!", "tag:example.com,2024:");
    /// assert_eq!(options.tags.get("!e!").map(String::as_str), Some("tag:example.com,2024:"));
    /// ```
    #[must_use]
    pub fn with_tag(mut self, handle: &str, prefix: &str) -> Self {
        self.tags.insert(handle.to_string(), prefix.to_string());
        self
    }

    /// Enables bordered rendering for comments of at least `threshold` lines.
    #[must_use]
    pub fn with_long_comments(mut self, threshold: usize, border: &str) -> Self {
        self.long_comment_threshold = threshold;
        self.long_comment_border = border.to_string();
        self
    }

    /// Sets the right-hand border written after each line of a long comment.
    #[must_use]
    pub fn with_long_comment_right_border(mut self, right_border: &str) -> Self {
        self.long_comment_right_border = Some(right_border.to_string());
        self
    }

    /// Indentation width actually used by the emitter.
    pub(crate) fn best_indent(&self) -> usize {
        if self.indent > 1 && self.indent < 10 {
            self.indent
        } else {
            2
        }
    }

    /// Wrap column actually used by the emitter.
    pub(crate) fn best_width(&self) -> usize {
        if self.width > self.best_indent() * 2 {
            self.width
        } else {
            80
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_out_of_range_falls_back() {
        assert_eq!(EmitterOptions::new().with_indent(1).best_indent(), 2);
        assert_eq!(EmitterOptions::new().with_indent(10).best_indent(), 2);
        assert_eq!(EmitterOptions::new().with_indent(9).best_indent(), 9);
    }

    #[test]
    fn test_narrow_width_falls_back() {
        let options = EmitterOptions::new().with_indent(4).with_width(8);
        assert_eq!(options.best_width(), 80);
        let options = EmitterOptions::new().with_indent(4).with_width(9);
        assert_eq!(options.best_width(), 9);
    }
}
