use std::fmt::Write;

use crate::markup::model::{ParsedBlock, TextBlock, TextDirection};

/// Renders analyzed blocks one per line:
///
/// ```text
/// 1: Link "docs" -> https://x.test content=5..=8 markers=[4..=4, 9..=25]
/// ```
///
/// Direction and emphasis are only printed when set. Text is debug-quoted so
/// newlines stay visible and no line ends in whitespace.
pub fn dump(blocks: &[ParsedBlock]) -> String {
    let mut out = String::new();
    for (i, p) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let b = &p.block;
        write!(out, "{i}: {:?}", b.style).unwrap();
        if b.direction != TextDirection::None {
            write!(out, " {:?}", b.direction).unwrap();
        }
        if b.bold {
            out.push_str(" bold");
        }
        if b.italic {
            out.push_str(" italic");
        }
        write!(out, " {:?}", b.text).unwrap();
        if !b.link.is_empty() {
            write!(out, " -> {}", b.link).unwrap();
        }
        if let Some(c) = p.content {
            write!(out, " content={}..={}", c.start, c.end).unwrap();
        }
        if !p.markers.is_empty() {
            let markers = p
                .markers
                .iter()
                .map(|m| format!("{}..={}", m.start, m.end))
                .collect::<Vec<_>>();
            write!(out, " markers=[{}]", markers.join(", ")).unwrap();
        }
    }
    out
}

/// Merges adjacent non-link blocks with identical formatting when the first
/// one does not end a line, giving the maximal-run view of a block sequence.
///
/// The parser splits runs at every marker it meets (an escape or a repeated
/// directive can start a new block with the same formatting), so comparisons
/// across a round trip are made on this view.
pub fn coalesce(blocks: &[TextBlock]) -> Vec<TextBlock> {
    let mut out: Vec<TextBlock> = Vec::with_capacity(blocks.len());
    for b in blocks {
        if let Some(last) = out.last_mut()
            && !last.ends_line()
            && last.link.is_empty()
            && b.link.is_empty()
            && last.same_format(b)
        {
            last.text.push_str(&b.text);
            continue;
        }
        out.push(b.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::analyze;

    #[test]
    fn dump_of_nothing_is_empty() {
        assert_eq!(dump(&[]), "");
    }

    #[test]
    fn dump_prints_direction_emphasis_and_link() {
        let out = dump(&analyze("\\ltr*it* [x](u)"));
        insta::assert_snapshot!(out, @r#"
        0: Body Ltr italic "it" content=5..=6 markers=[0..=3, 4..=4, 7..=7]
        1: Body Ltr " " content=8..=8
        2: Link Ltr "x" -> u content=10..=10 markers=[9..=9, 11..=14]
        "#);
    }
}
