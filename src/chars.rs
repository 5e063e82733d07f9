//! Character classes used by the scalar analyzer and the scalar writers.
//!
//! All predicates are pure lookups over a single `char`.

/// Line break characters recognized inside scalar text.
#[inline]
pub(crate) fn is_break(ch: char) -> bool {
    matches!(ch, '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Characters that terminate a token: NUL, space, tab, CR, and the line breaks.
#[inline]
pub(crate) fn is_blank_or_break(ch: char) -> bool {
    matches!(ch, '\0' | ' ' | '\t' | '\r') || is_break(ch)
}

/// Printable ASCII, excluding line breaks and tabs.
#[inline]
pub(crate) fn is_ascii_printable(ch: char) -> bool {
    ('\u{20}'..='\u{7E}').contains(&ch)
}

/// Printable characters outside the ASCII range that may be written unescaped when
/// unicode output is allowed.
#[inline]
pub(crate) fn is_unicode_printable(ch: char) -> bool {
    ch != '\u{FEFF}'
        && (ch == '\u{85}'
            || ('\u{A0}'..='\u{D7FF}').contains(&ch)
            || ('\u{E000}'..='\u{FFFD}').contains(&ch)
            || ('\u{10000}'..='\u{10FFFF}').contains(&ch))
}

/// Characters that must be escaped in a double-quoted scalar.
#[inline]
pub(crate) fn needs_escape(ch: char, allow_unicode: bool) -> bool {
    short_escape(ch).is_some()
        || !(is_ascii_printable(ch) || (allow_unicode && is_unicode_printable(ch)))
}

/// Short escape mnemonic for `ch`, if it has one.
///
/// ```text
/// \0 \a \b \t \n \v \f \r \e \" \\ \N \_ \L \P
/// ```
#[inline]
pub(crate) fn short_escape(ch: char) -> Option<char> {
    let escape = match ch {
        '\0' => '0',
        '\u{07}' => 'a',
        '\u{08}' => 'b',
        '\t' => 't',
        '\n' => 'n',
        '\u{0B}' => 'v',
        '\u{0C}' => 'f',
        '\r' => 'r',
        '\u{1B}' => 'e',
        '"' => '"',
        '\\' => '\\',
        '\u{85}' => 'N',
        '\u{A0}' => '_',
        '\u{2028}' => 'L',
        '\u{2029}' => 'P',
        _ => return None,
    };
    Some(escape)
}

/// Escape sequence for a character that [`needs_escape`].
pub(crate) fn escape(ch: char) -> String {
    if let Some(short) = short_escape(ch) {
        return format!("\\{short}");
    }
    let code = u32::from(ch);
    if code <= 0xFF {
        format!("\\x{code:02x}")
    } else if code <= 0xFFFF {
        format!("\\u{code:04x}")
    } else {
        format!("\\U{code:08x}")
    }
}
