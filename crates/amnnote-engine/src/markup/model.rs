use serde::Serialize;

use super::span::Span;

/// Paragraph direction in effect when a block was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TextDirection {
    Ltr,
    Rtl,
    /// No directive seen yet.
    #[default]
    None,
}

/// Line-level or run-level semantic style of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TextStyle {
    #[default]
    Body,
    ListItem,
    Power,
    Subtitle,
    Link,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
}

impl TextStyle {
    /// Deepest heading level the markup distinguishes.
    pub const MAX_HEADING_LEVEL: u8 = 5;

    /// Heading style for a `#` count. Counts above five coerce to
    /// [`TextStyle::Heading5`]; zero is not a heading.
    pub fn heading(level: usize) -> Option<Self> {
        match level {
            0 => None,
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            _ => Some(Self::Heading5),
        }
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            _ => None,
        }
    }
}

/// One contiguous run of text sharing formatting.
///
/// A block never spans a style boundary: any change in bold, italic, style
/// or link target starts a new block. A newline is always the last character
/// of the block it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub direction: TextDirection,
    pub bold: bool,
    pub italic: bool,
    pub style: TextStyle,
    /// Link target; empty unless `style == TextStyle::Link`.
    pub link: String,
}

impl TextBlock {
    /// Plain body text with no direction and no emphasis.
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn ends_line(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// True when both blocks carry the same direction, emphasis, style and link.
    pub fn same_format(&self, other: &Self) -> bool {
        self.direction == other.direction
            && self.bold == other.bold
            && self.italic == other.italic
            && self.style == other.style
            && self.link == other.link
    }
}

/// Parser output: a [`TextBlock`] plus where it came from in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedBlock {
    pub block: TextBlock,
    /// Bytes of the source occupied by the block's literal content.
    pub content: Option<Span>,
    /// Syntax markers owned by this block, ordered and disjoint.
    pub markers: Vec<Span>,
}

impl ParsedBlock {
    /// True when `offset` falls on the block's content or one of its markers.
    pub fn covers(&self, offset: usize) -> bool {
        self.content.is_some_and(|sp| sp.contains(offset))
            || self.markers.iter().any(|sp| sp.contains(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_coerce_to_five() {
        assert_eq!(TextStyle::heading(0), None);
        assert_eq!(TextStyle::heading(1), Some(TextStyle::Heading1));
        assert_eq!(TextStyle::heading(5), Some(TextStyle::Heading5));
        assert_eq!(TextStyle::heading(6), Some(TextStyle::Heading5));
        assert_eq!(TextStyle::heading(42), Some(TextStyle::Heading5));
    }

    #[test]
    fn heading_level_round_trips() {
        for level in 1..=TextStyle::MAX_HEADING_LEVEL {
            let style = TextStyle::heading(level as usize).unwrap();
            assert_eq!(style.heading_level(), Some(level));
        }
        assert_eq!(TextStyle::Body.heading_level(), None);
        assert_eq!(TextStyle::Link.heading_level(), None);
    }

    #[test]
    fn covers_checks_content_and_markers() {
        let parsed = ParsedBlock {
            block: TextBlock::body("b"),
            content: Some(Span::new(2, 2)),
            markers: vec![Span::new(0, 1), Span::new(3, 4)],
        };
        assert!(parsed.covers(0));
        assert!(parsed.covers(2));
        assert!(parsed.covers(4));
        assert!(!parsed.covers(5));
    }
}
