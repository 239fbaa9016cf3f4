use super::{Edit, Selection, TextValue, splice};
use crate::markup::kinds::Emphasis;

pub const BOLD: &str = Emphasis::BOLD;
pub const ITALIC: &str = Emphasis::ITALIC;

/// Wraps or unwraps the selection in `marker`.
///
/// - caret: inserts a marker pair and leaves the caret between them
/// - selection already surrounded by `marker`: removes both markers
/// - otherwise: wraps the selection
///
/// The selection keeps covering the same text afterwards.
pub fn toggle_inline(value: &TextValue, marker: &str) -> TextValue {
    if marker.is_empty() {
        return value.clone();
    }
    let v = value.clamped();
    let Selection { start, end } = v.selection;
    let len = marker.len();

    if start == end {
        let edits = [Edit::insert(start, marker.repeat(2))];
        return TextValue {
            text: splice(&v.text, &edits),
            selection: Selection::caret(start + len),
        };
    }

    let surrounded = v.text[..start].ends_with(marker) && v.text[end..].starts_with(marker);
    if surrounded {
        log::debug!("unwrapping {start}..{end} from {marker:?}");
        let edits = [
            Edit::delete(start - len..start),
            Edit::delete(end..end + len),
        ];
        TextValue {
            text: splice(&v.text, &edits),
            selection: Selection::new(start - len, end - len),
        }
    } else {
        log::debug!("wrapping {start}..{end} in {marker:?}");
        let edits = [Edit::insert(start, marker), Edit::insert(end, marker)];
        TextValue {
            text: splice(&v.text, &edits),
            selection: Selection::new(start + len, end + len),
        }
    }
}
