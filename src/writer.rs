//! Character-level output.
//!
//! The [`Writer`] owns the sink and the cursor state the emitter's layout decisions
//! depend on: the current column, whether the last thing written was whitespace, and
//! whether the line so far holds only indentation and indicators. Columns are counted
//! in characters, not bytes.

use crate::chars::{escape, is_break, needs_escape};
use crate::error::Result;
use crate::options::EmitterOptions;
use std::io;

pub(crate) struct Writer<W: io::Write> {
    sink: W,
    line_break: &'static str,
    best_indent: usize,
    best_width: usize,
    allow_unicode: bool,
    pub column: usize,
    pub whitespace: bool,
    pub indention: bool,
    /// The last thing written may be followed by more content of the same document, so
    /// a new document needs an explicit end marker first.
    pub open_ended: bool,
}

impl<W: io::Write> Writer<W> {
    pub fn new(sink: W, options: &EmitterOptions) -> Self {
        Writer {
            sink,
            line_break: options.line_break.as_str(),
            best_indent: options.best_indent(),
            best_width: options.best_width(),
            allow_unicode: options.allow_unicode,
            column: 0,
            whitespace: true,
            indention: true,
            open_ended: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    fn write_raw(&mut self, data: &str) -> Result<()> {
        self.column += data.chars().count();
        self.sink.write_all(data.as_bytes())?;
        Ok(())
    }

    fn write_chars(&mut self, chars: &[char]) -> Result<()> {
        let data: String = chars.iter().collect();
        self.write_raw(&data)
    }

    pub fn write_indicator(
        &mut self,
        indicator: &str,
        need_whitespace: bool,
        whitespace: bool,
        indention: bool,
    ) -> Result<()> {
        if !self.whitespace && need_whitespace {
            self.write_raw(" ")?;
        }
        self.write_raw(indicator)?;
        self.whitespace = whitespace;
        self.indention = self.indention && indention;
        self.open_ended = false;
        Ok(())
    }

    /// Moves to `indent`, starting a new line unless the cursor is still in the
    /// indentation of the current one.
    pub fn write_indent(&mut self, indent: usize) -> Result<()> {
        if !self.indention
            || self.column > indent
            || (self.column == indent && !self.whitespace)
        {
            self.write_line_break(None)?;
        }
        if self.column < indent {
            self.whitespace = true;
            let pad = " ".repeat(indent - self.column);
            self.write_raw(&pad)?;
        }
        Ok(())
    }

    /// Writes `ch` as a line break, or the configured terminator for `None`.
    pub fn write_line_break(&mut self, ch: Option<char>) -> Result<()> {
        match ch {
            Some(ch) if ch != '\n' => {
                let mut buf = [0u8; 4];
                self.sink.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            }
            _ => self.sink.write_all(self.line_break.as_bytes())?,
        }
        self.whitespace = true;
        self.indention = true;
        self.column = 0;
        Ok(())
    }

    fn write_breaks(&mut self, breaks: &[char]) -> Result<()> {
        for &br in breaks {
            self.write_line_break(Some(br))?;
        }
        Ok(())
    }

    pub fn write_version_directive(&mut self, version: &str) -> Result<()> {
        self.write_raw(&format!("%YAML {version}"))?;
        self.write_line_break(None)
    }

    pub fn write_tag_directive(&mut self, handle: &str, prefix: &str) -> Result<()> {
        self.write_raw(&format!("%TAG {handle} {prefix}"))?;
        self.write_line_break(None)
    }

    /// Writes prepared comment lines on their own lines at `indent`.
    pub fn write_comment(&mut self, lines: &[String], indent: usize) -> Result<()> {
        if self.column > 0 {
            self.write_line_break(None)?;
        }
        let pad = " ".repeat(indent);
        for line in lines {
            self.write_raw(&pad)?;
            self.write_raw(line)?;
            self.write_line_break(None)?;
        }
        Ok(())
    }

    pub fn write_plain(&mut self, text: &str, indent: usize, split: bool, root: bool) -> Result<()> {
        if root {
            self.open_ended = true;
        }
        if text.is_empty() {
            return Ok(());
        }
        if !self.whitespace {
            self.write_raw(" ")?;
        }
        self.whitespace = false;
        self.indention = false;

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut spaces = false;
        let mut breaks = false;
        let (mut start, mut end) = (0, 0);
        while end <= len {
            let ch = chars.get(end).copied();
            if spaces {
                if ch != Some(' ') {
                    if start + 1 == end && self.column > self.best_width && split {
                        self.write_indent(indent)?;
                        self.whitespace = false;
                        self.indention = false;
                    } else {
                        self.write_chars(&chars[start..end])?;
                    }
                    start = end;
                }
            } else if breaks {
                if ch.map_or(true, |c| !is_break(c)) {
                    if chars[start] == '\n' {
                        self.write_line_break(None)?;
                    }
                    self.write_breaks(&chars[start..end])?;
                    self.write_indent(indent)?;
                    self.whitespace = false;
                    self.indention = false;
                    start = end;
                }
            } else if ch.map_or(true, |c| c == ' ' || is_break(c)) {
                self.write_chars(&chars[start..end])?;
                start = end;
            }
            if let Some(c) = ch {
                spaces = c == ' ';
                breaks = is_break(c);
            }
            end += 1;
        }
        Ok(())
    }

    pub fn write_single_quoted(&mut self, text: &str, indent: usize, split: bool) -> Result<()> {
        self.write_indicator("'", true, false, false)?;

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut spaces = false;
        let mut breaks = false;
        let (mut start, mut end) = (0, 0);
        while end <= len {
            let ch = chars.get(end).copied();
            if spaces {
                if ch != Some(' ') {
                    if start + 1 == end
                        && self.column > self.best_width
                        && split
                        && start != 0
                        && end != len
                    {
                        self.write_indent(indent)?;
                    } else {
                        self.write_chars(&chars[start..end])?;
                    }
                    start = end;
                }
            } else if breaks {
                if ch.map_or(true, |c| !is_break(c)) {
                    if chars[start] == '\n' {
                        self.write_line_break(None)?;
                    }
                    self.write_breaks(&chars[start..end])?;
                    self.write_indent(indent)?;
                    start = end;
                }
            } else if ch.map_or(true, |c| c == ' ' || c == '\'' || is_break(c)) && start < end {
                self.write_chars(&chars[start..end])?;
                start = end;
            }
            if ch == Some('\'') {
                self.write_raw("''")?;
                start = end + 1;
            }
            if let Some(c) = ch {
                spaces = c == ' ';
                breaks = is_break(c);
            }
            end += 1;
        }

        self.write_indicator("'", false, false, false)
    }

    pub fn write_double_quoted(&mut self, text: &str, indent: usize, split: bool) -> Result<()> {
        self.write_indicator("\"", true, false, false)?;

        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let (mut start, mut end) = (0, 0);
        while end <= len {
            let ch = chars.get(end).copied();
            if ch.map_or(true, |c| needs_escape(c, self.allow_unicode)) {
                if start < end {
                    self.write_chars(&chars[start..end])?;
                    start = end;
                }
                if let Some(c) = ch {
                    self.write_raw(&escape(c))?;
                    start = end + 1;
                }
            }
            // `start` may run one past `end` right after an escape.
            let pending = end as isize - start as isize;
            if 0 < end
                && end + 1 < len
                && (ch == Some(' ') || start >= end)
                && self.column as isize + pending > self.best_width as isize
                && split
            {
                if start < end {
                    self.write_chars(&chars[start..end])?;
                    start = end;
                }
                self.write_raw("\\")?;
                self.write_indent(indent)?;
                self.whitespace = false;
                self.indention = false;
                if chars[start] == ' ' {
                    self.write_raw("\\")?;
                }
            }
            end += 1;
        }

        self.write_indicator("\"", false, false, false)
    }

    /// Indentation and chomping indicators for a block scalar header.
    fn block_hints(&self, chars: &[char]) -> String {
        let mut hints = String::new();
        if let (Some(&first), Some(&last)) = (chars.first(), chars.last()) {
            if first == ' ' || is_break(first) {
                hints.push_str(&self.best_indent.to_string());
            }
            if !is_break(last) {
                hints.push('-');
            } else if chars.len() == 1 || is_break(chars[chars.len() - 2]) {
                hints.push('+');
            }
        }
        hints
    }

    pub fn write_folded(&mut self, text: &str, indent: usize) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        let hints = self.block_hints(&chars);
        self.write_indicator(&format!(">{hints}"), true, false, false)?;
        if hints.ends_with('+') {
            self.open_ended = true;
        }
        self.write_line_break(None)?;

        let len = chars.len();
        let mut leading_space = true;
        let mut spaces = false;
        let mut breaks = true;
        let (mut start, mut end) = (0, 0);
        while end <= len {
            let ch = chars.get(end).copied();
            if breaks {
                if ch.map_or(true, |c| !is_break(c)) {
                    if !leading_space && ch.is_some() && ch != Some(' ') && chars.get(start) == Some(&'\n') {
                        self.write_line_break(None)?;
                    }
                    leading_space = ch == Some(' ');
                    self.write_breaks(&chars[start..end])?;
                    if ch.is_some() {
                        self.write_indent(indent)?;
                    }
                    start = end;
                }
            } else if spaces {
                if ch != Some(' ') {
                    if start + 1 == end && self.column > self.best_width {
                        self.write_indent(indent)?;
                    } else {
                        self.write_chars(&chars[start..end])?;
                    }
                    start = end;
                }
            } else if ch.map_or(true, |c| c == ' ' || is_break(c)) {
                self.write_chars(&chars[start..end])?;
                if ch.is_none() {
                    self.write_line_break(None)?;
                }
                start = end;
            }
            if let Some(c) = ch {
                breaks = is_break(c);
                spaces = c == ' ';
            }
            end += 1;
        }
        Ok(())
    }

    pub fn write_literal(&mut self, text: &str, indent: usize) -> Result<()> {
        let chars: Vec<char> = text.chars().collect();
        let hints = self.block_hints(&chars);
        self.write_indicator(&format!("|{hints}"), true, false, false)?;
        if hints.ends_with('+') {
            self.open_ended = true;
        }
        self.write_line_break(None)?;

        let len = chars.len();
        let mut breaks = true;
        let (mut start, mut end) = (0, 0);
        while end <= len {
            let ch = chars.get(end).copied();
            if breaks {
                if ch.map_or(true, |c| !is_break(c)) {
                    self.write_breaks(&chars[start..end])?;
                    if ch.is_some() {
                        self.write_indent(indent)?;
                    }
                    start = end;
                }
            } else if ch.map_or(true, is_break) {
                self.write_chars(&chars[start..end])?;
                if ch.is_none() {
                    self.write_line_break(None)?;
                }
                start = end;
            }
            if let Some(c) = ch {
                breaks = is_break(c);
            }
            end += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> Writer<Vec<u8>> {
        Writer::new(Vec::new(), &EmitterOptions::new())
    }

    fn output(w: Writer<Vec<u8>>) -> String {
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn test_single_quoted_doubles_quotes() {
        let mut w = writer();
        w.write_single_quoted("it's", 2, true).unwrap();
        assert_eq!(output(w), "'it''s'");
    }

    #[test]
    fn test_double_quoted_escapes() {
        let mut w = writer();
        w.write_double_quoted("a\tb\"c\u{1}", 2, true).unwrap();
        assert_eq!(output(w), "\"a\\tb\\\"c\\x01\"");
    }

    #[test]
    fn test_literal_chomping() {
        let mut w = writer();
        w.write_literal("line1\nline2\n", 2).unwrap();
        assert_eq!(output(w), "|\n  line1\n  line2\n");

        let mut w = writer();
        w.write_literal("line1\nline2", 2).unwrap();
        assert_eq!(output(w), "|-\n  line1\n  line2\n");

        let mut w = writer();
        w.write_literal("keep\n\n", 2).unwrap();
        assert!(w.open_ended);
        assert_eq!(output(w), "|+\n  keep\n\n");
    }

    #[test]
    fn test_literal_leading_space_gets_indent_hint() {
        let mut w = writer();
        w.write_literal("  indented\n", 2).unwrap();
        assert_eq!(output(w), "|2\n    indented\n");
    }

    #[test]
    fn test_folded_joins_with_blank_lines() {
        let mut w = writer();
        w.write_folded("one\n\ntwo\n", 2).unwrap();
        assert_eq!(output(w), ">\n  one\n\n\n  two\n");

        let mut w = writer();
        w.write_folded("one\ntwo", 2).unwrap();
        assert_eq!(output(w), ">-\n  one\n\n  two\n");
    }

    #[test]
    fn test_plain_wraps_at_width() {
        let mut w = Writer::new(Vec::new(), &EmitterOptions::new().with_width(20));
        let text = "alpha beta gamma delta epsilon zeta";
        w.write_plain(text, 2, true, false).unwrap();
        assert_eq!(output(w), "alpha beta gamma delta\n  epsilon zeta");
    }

    #[test]
    fn test_comment_starts_on_fresh_line() {
        let mut w = writer();
        w.write_plain("x", 0, true, false).unwrap();
        w.write_comment(&["# note".to_string()], 2).unwrap();
        assert_eq!(output(w), "x\n  # note\n");
    }

    #[test]
    fn test_windows_line_break() {
        let mut w = Writer::new(
            Vec::new(),
            &EmitterOptions::new().with_line_break(crate::LineBreak::Windows),
        );
        w.write_literal("a\n", 2).unwrap();
        assert_eq!(output(w), "|\r\n  a\r\n");
    }
}
