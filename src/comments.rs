//! Path-scoped comments.
//!
//! A [`CommentStore`] maps a path of mapping keys, taken from the document root, to the
//! comment written above the entry at that path. The empty path addresses the document
//! itself; its comment is written at the top of the document.
//!
//! ## Examples
//!
//! ```rust
//! use serde_yaml_emit::{to_string_with_comments, CommentStore, EmitterOptions};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { host: String, port: u16 }
//!
//! let mut comments = CommentStore::new();
//! comments.insert_dotted("port", "Listen port");
//!
//! let server = Server { host: "localhost".into(), port: 8080 };
//! let yaml = to_string_with_comments(&server, &comments, EmitterOptions::new()).unwrap();
//! assert_eq!(yaml, "host: localhost\n# Listen port\nport: 8080\n");
//! ```

use crate::options::EmitterOptions;
use indexmap::IndexMap;

/// Comments keyed by root-relative path, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentStore {
    entries: IndexMap<Vec<String>, String>,
}

impl CommentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `comment` to the entry at `path`, replacing any earlier comment there.
    /// Multi-line comments are separated by `\n`.
    pub fn insert<I, S>(&mut self, path: I, comment: &str) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into_iter().map(Into::into).collect();
        self.entries.insert(path, comment.to_string())
    }

    /// Like [`insert`](Self::insert), with the path written as dot-separated keys.
    /// The empty string addresses the document root.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yaml_emit::CommentStore;
    ///
    /// let mut comments = CommentStore::new();
    /// comments.insert_dotted("server.port", "Listen port");
    /// comments.insert_dotted("", "Generated file");
    ///
    /// assert_eq!(comments.get(&["server".to_string(), "port".to_string()]), Some("Listen port"));
    /// assert_eq!(comments.get(&[]), Some("Generated file"));
    /// ```
    pub fn insert_dotted(&mut self, path: &str, comment: &str) -> Option<String> {
        if path.is_empty() {
            self.insert(Vec::<String>::new(), comment)
        } else {
            self.insert(path.split('.'), comment)
        }
    }

    #[must_use]
    pub fn get(&self, path: &[String]) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[String], &str)> {
        self.entries
            .iter()
            .map(|(path, comment)| (path.as_slice(), comment.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(Vec<S>, String)> for CommentStore {
    fn from_iter<I: IntoIterator<Item = (Vec<S>, String)>>(iter: I) -> Self {
        let mut store = CommentStore::new();
        for (path, comment) in iter {
            store.insert(path, &comment);
        }
        store
    }
}

/// Lays out a comment as output lines, without indentation or line terminators.
///
/// Comments with at least `long_comment_threshold` lines get a border above and below
/// when the threshold is non-zero and the border pattern is non-empty.
pub(crate) fn render_comment_lines(comment: &str, options: &EmitterOptions) -> Vec<String> {
    let lines: Vec<&str> = comment.split('\n').collect();
    let border = options.long_comment_border.as_str();

    let bordered = options.long_comment_threshold > 0
        && !border.is_empty()
        && lines.len() >= options.long_comment_threshold;

    if !bordered {
        return lines.iter().map(|line| plain_line(line)).collect();
    }

    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let right = options.long_comment_right_border.as_deref();
    let row = 2 + width + right.map_or(0, |rb| 1 + rb.chars().count());

    let mut edge = String::from("#");
    edge.extend(border.chars().cycle().take(row - 1));

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(edge.clone());
    for line in &lines {
        match right {
            Some(rb) => out.push(format!("# {line:<width$} {rb}")),
            None => out.push(plain_line(line)),
        }
    }
    out.push(edge);
    out
}

fn plain_line(line: &str) -> String {
    if line.is_empty() {
        "#".to_string()
    } else {
        format!("# {line}")
    }
}
