use crate::markup::{
    model::{ParsedBlock, TextStyle},
    span::Span,
};

/// Validates analyzer output against its source.
///
/// Asserts that:
/// - All content and marker spans are within the source bounds
/// - Each block's markers are ordered, and no source byte belongs to two markers
/// - Content spans of successive blocks are ordered and start and end on
///   their block's first and last characters
/// - Link blocks carry a target and other blocks do not
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(src: &str, blocks: &[ParsedBlock]) {
    let n = src.len();
    let mut prev_content: Option<Span> = None;
    let mut all_markers: Vec<Span> = Vec::new();

    for (i, p) in blocks.iter().enumerate() {
        let Some(content) = p.content else {
            panic!("block {i} has no content span: {p:?}");
        };
        assert!(!p.block.text.is_empty(), "block {i} has empty text: {p:?}");

        for sp in p.markers.iter().chain(std::iter::once(&content)) {
            assert!(
                sp.start <= sp.end && sp.end < n,
                "block {i} span out of bounds: {sp:?} (source len: {n})"
            );
        }
        for pair in p.markers.windows(2) {
            assert!(
                pair[0].end < pair[1].start,
                "block {i} markers out of order: {:?} then {:?}",
                pair[0],
                pair[1]
            );
        }
        all_markers.extend_from_slice(&p.markers);

        if let Some(prev) = prev_content {
            assert!(
                content.start > prev.end,
                "block {i} content {content:?} does not follow {prev:?}"
            );
        }
        prev_content = Some(content);

        let text = &p.block.text;
        assert!(
            src.is_char_boundary(content.start) && src.is_char_boundary(content.end + 1),
            "block {i} content {content:?} splits a character"
        );
        let first = text.chars().next().map_or(1, char::len_utf8);
        let last = text.chars().next_back().map_or(1, char::len_utf8);
        assert_eq!(
            &src[content.start..content.start + first],
            &text[..first],
            "block {i} content does not start on its first character"
        );
        assert_eq!(
            &src[content.end + 1 - last..=content.end],
            &text[text.len() - last..],
            "block {i} content does not end on its last character"
        );

        assert_eq!(
            p.block.style == TextStyle::Link,
            !p.block.link.is_empty(),
            "block {i} link target does not match its style: {p:?}"
        );
    }

    all_markers.sort();
    for pair in all_markers.windows(2) {
        assert!(
            pair[0].end < pair[1].start,
            "markers overlap: {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}
