//! # Editing Transforms
//!
//! Formatting operations over a [`TextValue`]: the raw markup of a note plus
//! the editor's selection. Every transform returns a new value whose
//! selection tracks the same logical position through the edit.
//!
//! ## Module Structure
//!
//! - **`list`**: bullet continuation when a newline is typed
//! - **`inline`**: bold / italic wrap and unwrap around the selection
//! - **`lines`**: heading, bullet, indent and direction changes on every
//!   selected line
//! - **`commands`**: the `Cmd` enum the toolbar and CLI dispatch through
//!
//! All edits are compiled to an `xi_rope` delta and applied in one pass.
//! Out-of-range offsets are clamped; a transform with nothing to change hands
//! back the input value untouched.

pub mod commands;
pub mod inline;
pub mod lines;
pub mod list;

use std::ops::Range;

use serde::Serialize;
use xi_rope::{Rope, delta::Builder};

pub use commands::{Cmd, UnknownCommand, apply};
pub use inline::{BOLD, ITALIC, toggle_inline};
pub use lines::{indent, outdent, set_direction, set_heading, toggle_bullet};
pub use list::continue_list;

/// A selection in byte offsets, normalized so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Selection between two offsets given in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A collapsed selection (a caret) at `at`.
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// Editor text together with its selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextValue {
    pub text: String,
    pub selection: Selection,
}

impl TextValue {
    /// Builds a value, clamping the selection into the text.
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        Self {
            text: text.into(),
            selection,
        }
        .clamped()
    }

    /// A value with a caret at `at`.
    pub fn with_caret(text: impl Into<String>, at: usize) -> Self {
        Self::new(text, Selection::caret(at))
    }

    /// Normalizes the selection and floors both ends onto char boundaries.
    pub fn clamped(&self) -> Self {
        let sel = Selection::new(self.selection.start, self.selection.end);
        Self {
            text: self.text.clone(),
            selection: Selection {
                start: floor_boundary(&self.text, sel.start),
                end: floor_boundary(&self.text, sel.end),
            },
        }
    }
}

/// Largest char boundary of `text` at or below `offset`.
pub(crate) fn floor_boundary(text: &str, offset: usize) -> usize {
    let mut at = offset.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

/// One replacement in the old text's coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub range: Range<usize>,
    pub insert: String,
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            insert: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            insert: String::new(),
        }
    }
}

/// Applies ordered, non-overlapping edits through a single rope delta.
pub(crate) fn splice(text: &str, edits: &[Edit]) -> String {
    let base = Rope::from(text);
    let mut builder = Builder::new(base.len());
    for edit in edits {
        if edit.range.is_empty() && edit.insert.is_empty() {
            continue;
        }
        if edit.insert.is_empty() {
            builder.delete(edit.range.clone());
        } else {
            builder.replace(edit.range.clone(), Rope::from(edit.insert.as_str()));
        }
    }
    let delta = builder.build();
    delta.apply(&base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_normalized() {
        assert_eq!(Selection::new(5, 2), Selection { start: 2, end: 5 });
        assert!(Selection::caret(3).is_collapsed());
    }

    #[test]
    fn value_is_clamped_onto_char_boundaries() {
        // "é" is two bytes
        let v = TextValue::new("aé", Selection::new(2, 99));
        assert_eq!(v.selection, Selection { start: 1, end: 3 });
    }

    #[test]
    fn splice_applies_edits_in_one_pass() {
        let edits = vec![
            Edit::insert(0, "# "),
            Edit::delete(2..4),
            Edit {
                range: 5..6,
                insert: "XY".into(),
            },
        ];
        assert_eq!(splice("abcdefg", &edits), "# abeXYg");
    }
}
