//! Scalar analysis and style selection.
//!
//! [`analyze`] scans a scalar once and reports which presentation styles can
//! represent it faithfully. [`choose_scalar_style`] combines that report with the
//! caller's requested style and the emitter's position to pick the style actually
//! written.
//!
//! ## Examples
//!
//! ```rust
//! use serde_yaml_emit::analyzer::analyze;
//!
//! let analysis = analyze("plain text", true);
//! assert!(analysis.allow_flow_plain && analysis.allow_block_plain);
//!
//! let analysis = analyze(" leading", true);
//! assert!(!analysis.allow_flow_plain && !analysis.allow_block_plain);
//!
//! let analysis = analyze("a, b", true);
//! assert!(!analysis.allow_flow_plain && analysis.allow_block_plain);
//! ```

use crate::chars::{is_ascii_printable, is_blank_or_break, is_break, is_unicode_printable};
use crate::node::ScalarStyle;

/// Which styles can represent a scalar.
///
/// Double-quoted style can represent every scalar and has no flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalarAnalysis {
    pub is_empty: bool,
    pub has_line_breaks: bool,
    pub allow_flow_plain: bool,
    pub allow_block_plain: bool,
    pub allow_single_quoted: bool,
    /// Literal and folded styles.
    pub allow_block: bool,
}

/// Analyzes `text`. With `allow_unicode` off, any non-ASCII character restricts the
/// scalar to double-quoted style.
#[must_use]
pub fn analyze(text: &str, allow_unicode: bool) -> ScalarAnalysis {
    if text.is_empty() {
        return ScalarAnalysis {
            is_empty: true,
            has_line_breaks: false,
            allow_flow_plain: false,
            allow_block_plain: true,
            allow_single_quoted: true,
            allow_block: false,
        };
    }

    let chars: Vec<char> = text.chars().collect();
    let last = chars.len() - 1;

    let mut block_indicators = false;
    let mut flow_indicators = false;
    let mut line_breaks = false;
    let mut special_characters = false;

    let mut leading_space = false;
    let mut leading_break = false;
    let mut trailing_space = false;
    let mut trailing_break = false;
    let mut break_space = false;
    let mut space_break = false;

    if text.starts_with("---") || text.starts_with("...") {
        block_indicators = true;
        flow_indicators = true;
    }

    let mut preceded_by_whitespace = true;
    let mut previous_space = false;
    let mut previous_break = false;

    for (index, &ch) in chars.iter().enumerate() {
        let followed_by_whitespace = chars.get(index + 1).map_or(true, |&c| is_blank_or_break(c));

        if index == 0 {
            match ch {
                '#' | ',' | '[' | ']' | '{' | '}' | '&' | '*' | '!' | '|' | '>' | '\'' | '"'
                | '%' | '@' | '`' => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                '?' | ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '-' if followed_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        } else {
            match ch {
                ',' | '?' | '[' | ']' | '{' | '}' => flow_indicators = true,
                ':' => {
                    flow_indicators = true;
                    if followed_by_whitespace {
                        block_indicators = true;
                    }
                }
                '#' if preceded_by_whitespace => {
                    flow_indicators = true;
                    block_indicators = true;
                }
                _ => {}
            }
        }

        if is_break(ch) {
            line_breaks = true;
        }

        if !(ch == '\n' || is_ascii_printable(ch)) && !(allow_unicode && is_unicode_printable(ch))
        {
            special_characters = true;
        }

        if ch == ' ' {
            if index == 0 {
                leading_space = true;
            }
            if index == last {
                trailing_space = true;
            }
            if previous_break {
                break_space = true;
            }
            previous_space = true;
            previous_break = false;
        } else if is_break(ch) {
            if index == 0 {
                leading_break = true;
            }
            if index == last {
                trailing_break = true;
            }
            if previous_space {
                space_break = true;
            }
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        preceded_by_whitespace = is_blank_or_break(ch);
    }

    let mut analysis = ScalarAnalysis {
        is_empty: false,
        has_line_breaks: line_breaks,
        allow_flow_plain: true,
        allow_block_plain: true,
        allow_single_quoted: true,
        allow_block: true,
    };

    if leading_space || leading_break || trailing_space || trailing_break {
        analysis.allow_flow_plain = false;
        analysis.allow_block_plain = false;
    }
    if trailing_space {
        analysis.allow_block = false;
    }
    if break_space {
        analysis.allow_flow_plain = false;
        analysis.allow_block_plain = false;
        analysis.allow_single_quoted = false;
    }
    if space_break || special_characters {
        analysis.allow_flow_plain = false;
        analysis.allow_block_plain = false;
        analysis.allow_single_quoted = false;
        analysis.allow_block = false;
    }
    if line_breaks {
        analysis.allow_flow_plain = false;
        analysis.allow_block_plain = false;
    }
    if flow_indicators {
        analysis.allow_flow_plain = false;
    }
    if block_indicators {
        analysis.allow_block_plain = false;
    }
    analysis
}

/// Where the scalar is being written.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StyleContext {
    pub in_flow: bool,
    pub simple_key: bool,
    pub canonical: bool,
}

/// Picks the style a scalar is written in.
///
/// `plain_implicit` tells whether the scalar's tag may be dropped when written plain.
pub(crate) fn choose_scalar_style(
    analysis: &ScalarAnalysis,
    requested: Option<ScalarStyle>,
    plain_implicit: bool,
    ctx: StyleContext,
) -> ScalarStyle {
    if requested == Some(ScalarStyle::DoubleQuoted) || ctx.canonical {
        return ScalarStyle::DoubleQuoted;
    }

    let unstyled = matches!(requested, None | Some(ScalarStyle::Plain));

    if unstyled
        && plain_implicit
        && !(ctx.simple_key && (analysis.is_empty || analysis.has_line_breaks))
    {
        let plain_allowed = if ctx.in_flow {
            analysis.allow_flow_plain
        } else {
            analysis.allow_block_plain
        };
        if plain_allowed {
            return ScalarStyle::Plain;
        }
    }

    if let Some(style @ (ScalarStyle::Literal | ScalarStyle::Folded)) = requested {
        if !ctx.in_flow && !ctx.simple_key && analysis.allow_block {
            return style;
        }
    }

    if (unstyled || requested == Some(ScalarStyle::SingleQuoted))
        && analysis.allow_single_quoted
        && !(ctx.simple_key && analysis.has_line_breaks)
    {
        return ScalarStyle::SingleQuoted;
    }

    ScalarStyle::DoubleQuoted
}
