//! # Markup Kinds
//!
//! Types that own the markup's syntax delimiters. The parser, encoder and
//! editing transforms read these constants; none of them hardcode `**`,
//! `\rtl` or `- ` on their own.

use super::model::TextDirection;

/// Paragraph direction directives (`\rtl`, `\ltr`).
pub struct Directive;

impl Directive {
    pub const RTL: &'static [u8; 4] = b"\\rtl";
    pub const LTR: &'static [u8; 4] = b"\\ltr";
    pub const LEN: usize = 4;

    /// Directive text for a direction, or `None` for [`TextDirection::None`].
    pub fn for_direction(direction: TextDirection) -> Option<&'static str> {
        match direction {
            TextDirection::Rtl => Some("\\rtl"),
            TextDirection::Ltr => Some("\\ltr"),
            TextDirection::None => None,
        }
    }

    /// Direction named by a directive at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Option<TextDirection> {
        if bytes.starts_with(Self::RTL) {
            Some(TextDirection::Rtl)
        } else if bytes.starts_with(Self::LTR) {
            Some(TextDirection::Ltr)
        } else {
            None
        }
    }

    /// Byte length of the run of directives at the start of `line`.
    pub fn leading_len(line: &str) -> usize {
        let bytes = line.as_bytes();
        let mut k = 0;
        while Self::parse(&bytes[k..]).is_some() {
            k += Self::LEN;
        }
        k
    }
}

/// Heading prefix: one or more `#` followed by a single space.
pub struct Heading;

impl Heading {
    pub const HASH: u8 = b'#';
    pub const SPACE: u8 = b' ';

    pub fn prefix(level: u8) -> String {
        let mut s = "#".repeat(level as usize);
        s.push(' ');
        s
    }
}

/// Bullet prefix `- `.
pub struct Bullet;

impl Bullet {
    pub const PREFIX: &'static str = "- ";
}

/// Bold (`**`) and italic (`*`) toggles.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const BOLD: &'static str = "**";
    pub const ITALIC: &'static str = "*";
    pub const BOTH: &'static str = "***";
}

/// Inline link `[label](url)`.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';
}

/// Backslash escapes.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';

    /// Characters the encoder always escapes.
    pub fn always(c: char) -> bool {
        matches!(c, '\\' | '*' | '[' | ']' | '(' | ')' | '{' | '}' | '`')
    }

    /// Characters the encoder escapes only where a line's syntax could begin.
    pub fn at_line_start(c: char) -> bool {
        matches!(c, '#' | '-')
    }

    /// Characters a backslash turns back into literal content.
    pub fn escapable(b: u8) -> bool {
        matches!(
            b,
            b'*' | b'[' | b']' | b'(' | b')' | b'#' | b'-' | b'\\' | b'{' | b'}' | b'`'
        )
    }
}
