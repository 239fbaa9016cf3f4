//! Per-line prefix transforms.
//!
//! Each transform looks at every line touched by the selection and may
//! replace one prefix region of it: the heading hashes, the bullet, the
//! indent or the direction directives. Lines that need no change are left
//! alone, and if no line changes the input value is returned as is.

use std::ops::Range;

use super::{Edit, Selection, TextValue, splice};
use crate::markup::{
    TextDirection, TextStyle,
    kinds::{Bullet, Directive, Heading},
};

const INDENT: &str = "  ";

/// A prefix replacement within one line, in line-relative bytes.
#[derive(Debug, PartialEq)]
struct LineEdit {
    at: usize,
    old_len: usize,
    new: String,
}

impl LineEdit {
    fn replace(at: usize, old_len: usize, new: impl Into<String>) -> Option<Self> {
        Some(Self {
            at,
            old_len,
            new: new.into(),
        })
    }
}

/// Sets every selected line to heading `level` (1..=5, larger levels are
/// capped). Level 0 removes an existing heading prefix.
pub fn set_heading(value: &TextValue, level: u8) -> TextValue {
    let level = level.min(TextStyle::MAX_HEADING_LEVEL);
    transform_lines(value, |line| heading_edit(line, level))
}

/// Adds `- ` to lines without a bullet and removes it from lines with one.
pub fn toggle_bullet(value: &TextValue) -> TextValue {
    transform_lines(value, bullet_edit)
}

/// Indents bulleted lines by two spaces.
pub fn indent(value: &TextValue) -> TextValue {
    transform_lines(value, |line| {
        let d = Directive::leading_len(line);
        is_bullet(&line[d..]).then(|| LineEdit {
            at: d,
            old_len: 0,
            new: INDENT.to_string(),
        })
    })
}

/// Removes up to two leading spaces from bulleted lines.
pub fn outdent(value: &TextValue) -> TextValue {
    transform_lines(value, |line| {
        let d = Directive::leading_len(line);
        let rest = &line[d..];
        if !is_bullet(rest) {
            return None;
        }
        let spaces = rest
            .bytes()
            .take(INDENT.len())
            .take_while(|&b| b == b' ')
            .count();
        (spaces > 0).then(|| LineEdit {
            at: d,
            old_len: spaces,
            new: String::new(),
        })
    })
}

/// Replaces the leading direction directives of every selected line.
///
/// A line that already carries exactly the requested directive loses it;
/// [`TextDirection::None`] clears whatever is there.
pub fn set_direction(value: &TextValue, direction: TextDirection) -> TextValue {
    transform_lines(value, |line| {
        let d = Directive::leading_len(line);
        let wanted = Directive::for_direction(direction).unwrap_or_default();
        let new = if &line[..d] == wanted { "" } else { wanted };
        (new != &line[..d]).then(|| LineEdit {
            at: 0,
            old_len: d,
            new: new.to_string(),
        })
    })
}

fn heading_edit(line: &str, level: u8) -> Option<LineEdit> {
    let d = Directive::leading_len(line);
    let rest = &line[d..];
    let ws = rest.len() - rest.trim_start().len();
    let hashes = rest[ws..]
        .bytes()
        .take_while(|&b| b == Heading::HASH)
        .count();
    let spaces = rest[ws + hashes..]
        .bytes()
        .take_while(|&b| b == Heading::SPACE)
        .count();
    let old_len = ws + hashes + spaces;

    let new = if level == 0 {
        if hashes == 0 {
            return None;
        }
        String::new()
    } else {
        Heading::prefix(level)
    };
    if rest[..old_len] == new {
        return None;
    }
    LineEdit::replace(d, old_len, new)
}

fn bullet_edit(line: &str) -> Option<LineEdit> {
    let d = Directive::leading_len(line);
    let rest = &line[d..];
    if is_bullet(rest) {
        let ws = rest.len() - rest.trim_start().len();
        LineEdit::replace(d, ws + Bullet::PREFIX.len(), "")
    } else {
        LineEdit::replace(d, 0, Bullet::PREFIX)
    }
}

fn is_bullet(rest: &str) -> bool {
    rest.trim_start().starts_with(Bullet::PREFIX)
}

/// Byte ranges (without newlines) of every line the selection touches.
fn selected_lines(text: &str, sel: Selection) -> Vec<Range<usize>> {
    let first = text[..sel.start].rfind('\n').map_or(0, |i| i + 1);
    let last = text[sel.end..]
        .find('\n')
        .map_or(text.len(), |i| sel.end + i);

    let mut lines = Vec::new();
    let mut start = first;
    for (i, b) in text[first..last].bytes().enumerate() {
        if b == b'\n' {
            lines.push(start..first + i);
            start = first + i + 1;
        }
    }
    lines.push(start..last);
    lines
}

/// Runs `f` over every selected line and applies the resulting edits in one
/// pass, remapping the selection through them.
fn transform_lines(value: &TextValue, f: impl Fn(&str) -> Option<LineEdit>) -> TextValue {
    let v = value.clamped();
    let edits: Vec<Edit> = selected_lines(&v.text, v.selection)
        .into_iter()
        .filter_map(|line| {
            let e = f(&v.text[line.clone()])?;
            let at = line.start + e.at;
            Some(Edit {
                range: at..at + e.old_len,
                insert: e.new,
            })
        })
        .collect();

    if edits.is_empty() {
        log::debug!("line transform changed nothing");
        return value.clone();
    }
    log::debug!("line transform rewrote {} line(s)", edits.len());

    TextValue {
        text: splice(&v.text, &edits),
        selection: Selection::new(
            remap(v.selection.start, &edits),
            remap(v.selection.end, &edits),
        ),
    }
}

/// Moves an old offset through ordered prefix edits.
///
/// Offsets before an edit are untouched by it. An offset inside a replaced
/// prefix lands at the same distance into the new prefix, capped at its
/// length. Offsets at or after the end of the old prefix shift by the
/// edit's length change.
fn remap(offset: usize, edits: &[Edit]) -> usize {
    let mut removed = 0;
    let mut added = 0;
    for e in edits {
        if offset < e.range.start {
            break;
        }
        if offset < e.range.end {
            let into = (offset - e.range.start).min(e.insert.len());
            return e.range.start - removed + added + into;
        }
        removed += e.range.len();
        added += e.insert.len();
    }
    offset - removed + added
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn caret(text: &str, at: usize) -> TextValue {
        TextValue::with_caret(text, at)
    }

    #[test]
    fn selected_lines_cover_the_selection() {
        let text = "one\ntwo\nthree\nfour";
        assert_eq!(
            selected_lines(text, Selection::new(5, 9)),
            vec![4..7, 8..13]
        );
        assert_eq!(selected_lines(text, Selection::caret(0)), vec![0..3]);
        assert_eq!(selected_lines(text, Selection::caret(18)), vec![14..18]);
        assert_eq!(selected_lines("a\n", Selection::caret(2)), vec![2..2]);
    }

    #[rstest]
    #[case("Title", 1, "# Title")]
    #[case("# Title", 3, "### Title")]
    #[case("  ##   Title", 2, "## Title")]
    #[case("\\rtl# Title", 2, "\\rtl## Title")]
    #[case("### Title", 0, "Title")]
    #[case("Title", 9, "##### Title")]
    fn heading_replaces_rather_than_stacks(
        #[case] input: &str,
        #[case] level: u8,
        #[case] expected: &str,
    ) {
        let out = set_heading(&caret(input, 0), level);
        assert_eq!(out.text, expected);
    }

    #[test]
    fn heading_at_the_same_level_is_identity() {
        let v = caret("## Title", 5);
        assert_eq!(set_heading(&v, 2), v);
        let plain = caret("Title", 2);
        assert_eq!(set_heading(&plain, 0), plain);
    }

    #[test]
    fn heading_keeps_the_caret_on_its_character() {
        // caret before "T"
        let out = set_heading(&caret("# Title", 2), 3);
        assert_eq!(out.text, "### Title");
        assert_eq!(out.selection, Selection::caret(4));
    }

    #[test]
    fn caret_inside_old_prefix_is_capped_to_new_prefix() {
        let out = set_heading(&caret("#### Title", 3), 1);
        assert_eq!(out.text, "# Title");
        assert_eq!(out.selection, Selection::caret(2));
    }

    #[test]
    fn bullet_toggles_each_line_independently() {
        let v = TextValue::new("a\n- b\n  - c\nd", Selection::new(0, 13));
        let out = toggle_bullet(&v);
        assert_eq!(out.text, "- a\nb\nc\n- d");
        // the start sat on the first line's content, which moved right
        assert_eq!(out.selection, Selection::new(2, 11));
    }

    #[test]
    fn bullet_goes_after_direction_directive() {
        let out = toggle_bullet(&caret("\\rtlسلام", 4));
        assert_eq!(out.text, "\\rtl- سلام");
        assert_eq!(out.selection, Selection::caret(6));
    }

    #[test]
    fn indent_only_touches_bullets() {
        let v = TextValue::new("- a\nb\n- c", Selection::new(0, 9));
        let out = indent(&v);
        assert_eq!(out.text, "  - a\nb\n  - c");
        assert_eq!(out.selection, Selection::new(2, 13));
    }

    #[test]
    fn outdent_removes_at_most_two_spaces() {
        let v = TextValue::new("     - a\n - b", Selection::new(0, 13));
        let out = outdent(&v);
        assert_eq!(out.text, "   - a\n- b");
    }

    #[test]
    fn outdent_on_unindented_bullet_is_identity() {
        let v = caret("- a", 3);
        assert_eq!(outdent(&v), v);
        let plain = caret("  a", 3);
        assert_eq!(outdent(&plain), plain);
    }

    #[test]
    fn selection_after_edited_lines_shifts_by_their_delta() {
        let v = TextValue::new("a\nb\nc", Selection::new(0, 2));
        let out = set_heading(&v, 2);
        assert_eq!(out.text, "## a\n## b\nc");
        assert_eq!(out.selection, Selection::new(3, 8));
    }

    #[rstest]
    #[case("text", TextDirection::Rtl, "\\rtltext")]
    #[case("\\ltrtext", TextDirection::Rtl, "\\rtltext")]
    #[case("\\rtltext", TextDirection::Rtl, "text")]
    #[case("\\rtl\\ltrtext", TextDirection::Ltr, "\\ltrtext")]
    #[case("\\rtltext", TextDirection::None, "text")]
    fn direction_replaces_leading_directives(
        #[case] input: &str,
        #[case] direction: TextDirection,
        #[case] expected: &str,
    ) {
        let out = set_direction(&caret(input, input.len()), direction);
        assert_eq!(out.text, expected);
        assert_eq!(out.selection, Selection::caret(expected.len()));
    }

    #[test]
    fn clearing_direction_on_plain_line_is_identity() {
        let v = caret("text", 1);
        assert_eq!(set_direction(&v, TextDirection::None), v);
    }

    #[test]
    fn remap_handles_each_region() {
        let edits = vec![Edit {
            range: 4..8,
            insert: "xy".into(),
        }];
        assert_eq!(remap(2, &edits), 2);
        assert_eq!(remap(4, &edits), 4);
        assert_eq!(remap(5, &edits), 5);
        assert_eq!(remap(7, &edits), 6);
        assert_eq!(remap(8, &edits), 6);
        assert_eq!(remap(10, &edits), 8);
    }
}
