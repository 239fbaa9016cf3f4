//! # Marker Visibility
//!
//! Builds what the editor actually shows: the source markup with the syntax
//! markers of every block except the active one hidden, the styling of each
//! block reattached at displayed coordinates, and an [`OffsetMap`] that moves
//! cursor positions between the source and the displayed text.

use std::ops::Range;

use serde::Serialize;

use crate::markup::{ParsedBlock, TextDirection, TextStyle, analyze};

/// Index of the block whose content or markers contain `cursor`.
///
/// Blocks are scanned in order and the first match wins. Returns `None` for
/// an empty block list, a missing cursor or a cursor outside every block.
pub fn active_block_index(blocks: &[ParsedBlock], cursor: Option<usize>) -> Option<usize> {
    let cursor = cursor?;
    blocks.iter().position(|b| b.covers(cursor))
}

/// A typographic treatment applied to a displayed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Decoration {
    /// Semantic style of the block (heading level, link, list item, ...).
    Style(TextStyle),
    Emphasis { bold: bool, italic: bool },
    /// Paragraph direction; never emitted for [`TextDirection::None`].
    Paragraph(TextDirection),
    /// Hanging indent for list items.
    ListIndent,
    /// A marker left visible because its block is active.
    ActiveMarker,
}

/// A decoration over a half-open range of the displayed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRange {
    pub range: Range<usize>,
    pub decoration: Decoration,
}

/// Bidirectional byte offset mapping between source and displayed text.
///
/// Both tables are monotonic. Inputs outside `[0, len]` are clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    to_transformed: Vec<usize>,
    to_original: Vec<usize>,
}

impl OffsetMap {
    /// Builds the map from a per-byte hidden mask of the source.
    fn from_hidden(hidden: &[bool]) -> Self {
        let n = hidden.len();
        let mut to_transformed = Vec::with_capacity(n + 1);
        let mut dest = 0;
        for &h in hidden {
            to_transformed.push(dest);
            if !h {
                dest += 1;
            }
        }
        to_transformed.push(dest);

        // Smallest original offset whose forward mapping reaches each t.
        let mut to_original = Vec::with_capacity(dest + 1);
        let mut i = 0;
        for t in 0..=dest {
            while i < n && to_transformed[i] < t {
                i += 1;
            }
            to_original.push(i);
        }

        Self {
            to_transformed,
            to_original,
        }
    }

    /// Length of the source text.
    pub fn original_len(&self) -> usize {
        self.to_transformed.len() - 1
    }

    /// Length of the displayed text.
    pub fn transformed_len(&self) -> usize {
        self.to_original.len() - 1
    }

    pub fn original_to_transformed(&self, offset: usize) -> usize {
        self.to_transformed[offset.min(self.original_len())]
    }

    pub fn transformed_to_original(&self, offset: usize) -> usize {
        self.to_original[offset.min(self.transformed_len())]
    }
}

/// Displayed text, styling and offset map for one cursor state.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    text: String,
    offsets: OffsetMap,
    styles: Vec<StyledRange>,
}

impl MarkerView {
    /// Hides the markers of every block other than `active`.
    ///
    /// `blocks` must come from analyzing `text`; marker spans reaching past
    /// the end of `text` are clipped.
    pub fn new(text: &str, blocks: &[ParsedBlock], active: Option<usize>) -> Self {
        let n = text.len();
        let mut hidden = vec![false; n];
        for (idx, parsed) in blocks.iter().enumerate() {
            if Some(idx) == active {
                continue;
            }
            for m in &parsed.markers {
                let end = m.end_exclusive().min(n);
                if m.start < end {
                    hidden[m.start..end].fill(true);
                }
            }
        }

        let offsets = OffsetMap::from_hidden(&hidden);

        let mut shown = String::with_capacity(offsets.transformed_len());
        for (i, c) in text.char_indices() {
            if !hidden[i] {
                shown.push(c);
            }
        }

        let styles = decorate(blocks, active, &offsets, n);
        log::trace!(
            "marker view: {} -> {} bytes, active block {active:?}",
            n,
            shown.len()
        );

        Self {
            text: shown,
            offsets,
            styles,
        }
    }

    /// Analyzes `text` and shows the markers of the block under `cursor`.
    pub fn for_cursor(text: &str, cursor: Option<usize>) -> Self {
        let blocks = analyze(text);
        let active = active_block_index(&blocks, cursor);
        Self::new(text, &blocks, active)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offsets(&self) -> &OffsetMap {
        &self.offsets
    }

    pub fn styles(&self) -> &[StyledRange] {
        &self.styles
    }
}

fn decorate(
    blocks: &[ParsedBlock],
    active: Option<usize>,
    offsets: &OffsetMap,
    n: usize,
) -> Vec<StyledRange> {
    let mut styles = Vec::new();
    let mut push = |range: Range<usize>, decoration| {
        styles.push(StyledRange { range, decoration });
    };

    for (idx, parsed) in blocks.iter().enumerate() {
        let block = &parsed.block;
        if let Some(content) = parsed.content {
            let start = offsets.original_to_transformed(content.start);
            let end = offsets.original_to_transformed(content.end_exclusive());
            if start < end {
                push(start..end, Decoration::Style(block.style));
                if block.bold || block.italic {
                    push(
                        start..end,
                        Decoration::Emphasis {
                            bold: block.bold,
                            italic: block.italic,
                        },
                    );
                }
                if block.direction != TextDirection::None {
                    push(start..end, Decoration::Paragraph(block.direction));
                }
                if block.style == TextStyle::ListItem {
                    push(start..end, Decoration::ListIndent);
                }
            }
        }

        if Some(idx) == active {
            for m in &parsed.markers {
                let start = offsets.original_to_transformed(m.start.min(n));
                let end = offsets.original_to_transformed(m.end_exclusive().min(n));
                if start < end {
                    push(start..end, Decoration::ActiveMarker);
                }
            }
        }
    }
    styles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Span;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn hidden_bytes(blocks: &[ParsedBlock], active: Option<usize>) -> usize {
        blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != active)
            .flat_map(|(_, b)| b.markers.iter())
            .map(|m| m.len())
            .sum()
    }

    #[rstest]
    #[case(Some(0), Some(0))]
    #[case(Some(1), Some(0))]
    #[case(Some(5), Some(0))]
    #[case(Some(7), Some(0))]
    #[case(Some(8), Some(1))]
    #[case(Some(22), Some(2))]
    #[case(Some(23), None)]
    #[case(None, None)]
    fn active_block_follows_cursor(
        #[case] cursor: Option<usize>,
        #[case] expected: Option<usize>,
    ) {
        let blocks = analyze("**bold** plain *italic*");
        assert_eq!(active_block_index(&blocks, cursor), expected);
    }

    #[test]
    fn no_blocks_means_no_active_block() {
        assert_eq!(active_block_index(&[], Some(0)), None);
    }

    #[test]
    fn inactive_markers_are_hidden() {
        let src = "**bold** plain *italic*";
        let blocks = analyze(src);
        let view = MarkerView::new(src, &blocks, Some(2));
        assert_eq!(view.text(), "bold plain *italic*");
        assert_eq!(
            view.text().len(),
            src.len() - hidden_bytes(&blocks, Some(2))
        );
    }

    #[test]
    fn two_block_document_hides_only_the_second_blocks_markers() {
        let src = "# Title\n- **item**";
        let blocks = analyze(src);
        assert_eq!(blocks.len(), 2);
        let view = MarkerView::new(src, &blocks, Some(0));
        let second: usize = blocks[1].markers.iter().map(|m| m.len()).sum();
        assert_eq!(view.text(), "# Title\nitem");
        assert_eq!(view.text().len(), src.len() - second);
    }

    #[test]
    fn no_active_block_hides_everything() {
        let view = MarkerView::for_cursor("\\rtl## سلام [x](u)", None);
        assert_eq!(view.text(), "سلام x");
    }

    #[test]
    fn offset_map_skips_hidden_runs() {
        let src = "a**b**c";
        let blocks = analyze(src);
        let view = MarkerView::new(src, &blocks, None);
        assert_eq!(view.text(), "abc");

        let map = view.offsets();
        let forward: Vec<_> = (0..=src.len())
            .map(|o| map.original_to_transformed(o))
            .collect();
        assert_eq!(forward, vec![0, 1, 1, 1, 2, 2, 2, 3]);
        let back: Vec<_> = (0..=3).map(|t| map.transformed_to_original(t)).collect();
        assert_eq!(back, vec![0, 1, 4, 7]);
    }

    #[test]
    fn offset_map_clamps_out_of_range_input() {
        let view = MarkerView::for_cursor("*x*", None);
        assert_eq!(view.offsets().original_to_transformed(100), 1);
        assert_eq!(view.offsets().transformed_to_original(100), 2);
    }

    #[test]
    fn styles_land_on_displayed_coordinates() {
        let src = "\\rtl- **a**";
        let blocks = analyze(src);
        let view = MarkerView::new(src, &blocks, None);
        assert_eq!(view.text(), "a");
        assert_eq!(
            view.styles(),
            &[
                StyledRange {
                    range: 0..1,
                    decoration: Decoration::Style(TextStyle::ListItem)
                },
                StyledRange {
                    range: 0..1,
                    decoration: Decoration::Emphasis {
                        bold: true,
                        italic: false
                    }
                },
                StyledRange {
                    range: 0..1,
                    decoration: Decoration::Paragraph(TextDirection::Rtl)
                },
                StyledRange {
                    range: 0..1,
                    decoration: Decoration::ListIndent
                },
            ]
        );
    }

    #[test]
    fn active_markers_are_decorated() {
        let src = "x *y*";
        let blocks = analyze(src);
        let view = MarkerView::new(src, &blocks, Some(1));
        assert_eq!(view.text(), src);
        let markers: Vec<_> = view
            .styles()
            .iter()
            .filter(|s| s.decoration == Decoration::ActiveMarker)
            .map(|s| s.range.clone())
            .collect();
        assert_eq!(markers, vec![2..3, 4..5]);
    }

    #[test]
    fn marker_spans_past_the_end_are_clipped() {
        let blocks = vec![ParsedBlock {
            block: crate::markup::TextBlock::body("a"),
            content: Some(Span::new(0, 0)),
            markers: vec![Span::new(1, 9)],
        }];
        let view = MarkerView::new("a*", &blocks, None);
        assert_eq!(view.text(), "a");
    }
}
