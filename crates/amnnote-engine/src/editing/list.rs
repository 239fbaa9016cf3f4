use std::sync::OnceLock;

use regex::Regex;

use super::{Edit, Selection, TextValue, splice};
use crate::markup::kinds::Bullet;

fn bullet_line() -> &'static Regex {
    static BULLET_LINE: OnceLock<Regex> = OnceLock::new();
    BULLET_LINE.get_or_init(|| Regex::new(r"^(\s*)- (.*)$").expect("Invalid bullet regex"))
}

/// Continues or ends a bullet list after the user types a newline.
///
/// Runs only when `current` is `previous` with a single `\n` inserted before
/// a collapsed caret. If the line just completed is a bullet with text, the
/// new line gets the same indent and `- `. If the bullet was empty, the whole
/// bullet line is removed together with the new newline, ending the list.
/// Anything else returns `current` unchanged.
pub fn continue_list(previous: &TextValue, current: &TextValue) -> TextValue {
    let cur = current.clamped();
    let Some(newline) = inserted_newline(&previous.text, &cur) else {
        return current.clone();
    };

    let text = &cur.text;
    let line_start = text[..newline].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..newline];
    let Some(caps) = bullet_line().captures(line) else {
        return current.clone();
    };
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let rest = caps.get(2).map_or("", |m| m.as_str());

    if rest.trim().is_empty() {
        log::debug!("empty bullet at {line_start}, ending list");
        let edits = [Edit::delete(line_start..newline + 1)];
        TextValue {
            text: splice(text, &edits),
            selection: Selection::caret(line_start),
        }
    } else {
        let prefix = format!("{indent}{}", Bullet::PREFIX);
        let at = cur.selection.start;
        log::debug!("continuing bullet list at {at}");
        let edits = [Edit::insert(at, prefix.as_str())];
        TextValue {
            text: splice(text, &edits),
            selection: Selection::caret(at + prefix.len()),
        }
    }
}

/// Offset of the newline if `cur` is `previous` plus one `\n` typed right
/// before the caret.
fn inserted_newline(previous: &str, cur: &TextValue) -> Option<usize> {
    if !cur.selection.is_collapsed() || cur.text.len() != previous.len() + 1 {
        return None;
    }
    let newline = cur.selection.start.checked_sub(1)?;
    if cur.text.as_bytes()[newline] != b'\n' {
        return None;
    }
    let same_before = previous.get(..newline)? == &cur.text[..newline];
    let same_after = previous.get(newline..)? == &cur.text[newline + 1..];
    (same_before && same_after).then_some(newline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed_newline(before: &str, at: usize) -> (TextValue, TextValue) {
        let previous = TextValue::with_caret(before, at);
        let mut text = before.to_string();
        text.insert(at, '\n');
        (previous, TextValue::with_caret(text, at + 1))
    }

    #[test]
    fn bullet_with_text_is_continued() {
        let (prev, cur) = typed_newline("- milk", 6);
        let out = continue_list(&prev, &cur);
        assert_eq!(out.text, "- milk\n- ");
        assert_eq!(out.selection, Selection::caret(9));
    }

    #[test]
    fn indent_is_carried_over() {
        let (prev, cur) = typed_newline("a\n  - eggs\nb", 10);
        let out = continue_list(&prev, &cur);
        assert_eq!(out.text, "a\n  - eggs\n  - \nb");
        assert_eq!(out.selection, Selection::caret(15));
    }

    #[test]
    fn empty_bullet_ends_the_list() {
        let (prev, cur) = typed_newline("- milk\n- ", 9);
        let out = continue_list(&prev, &cur);
        assert_eq!(out.text, "- milk\n");
        assert_eq!(out.selection, Selection::caret(7));
    }

    #[test]
    fn whitespace_only_bullet_ends_the_list() {
        let (prev, cur) = typed_newline("x\n  -   \ny", 8);
        let out = continue_list(&prev, &cur);
        assert_eq!(out.text, "x\n\ny");
        assert_eq!(out.selection, Selection::caret(2));
    }

    #[test]
    fn plain_line_is_left_alone() {
        let (prev, cur) = typed_newline("hello", 5);
        assert_eq!(continue_list(&prev, &cur), cur);
    }

    #[test]
    fn non_newline_insertions_are_ignored() {
        let prev = TextValue::with_caret("- a", 3);
        let cur = TextValue::with_caret("- ab", 4);
        assert_eq!(continue_list(&prev, &cur), cur);
    }

    #[test]
    fn pasted_text_is_ignored() {
        let prev = TextValue::with_caret("- a", 3);
        let cur = TextValue::with_caret("- a\nb\n", 6);
        assert_eq!(continue_list(&prev, &cur), cur);
    }

    #[test]
    fn range_selection_is_ignored() {
        let prev = TextValue::with_caret("- a", 3);
        let cur = TextValue::new("- a\n", Selection::new(3, 4));
        assert_eq!(continue_list(&prev, &cur), cur);
    }
}
