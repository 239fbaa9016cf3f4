use std::str::FromStr;

use serde::Serialize;

use super::{TextValue, inline, lines};
use crate::markup::TextDirection;

/// A formatting command from the editor toolbar or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cmd {
    Bold,
    Italic,
    /// Heading level for the selected lines; 0 removes the heading.
    Heading(u8),
    Bullet,
    Indent,
    Outdent,
    Direction(TextDirection),
}

impl Cmd {
    /// Maps a toolbar tool id to its command. Unknown ids (including tools
    /// that are not formatting commands, such as `delete`) map to `None`.
    pub fn from_tool_id(id: &str) -> Option<Self> {
        let cmd = match id {
            "ltr" => Self::Direction(TextDirection::Ltr),
            "rtl" => Self::Direction(TextDirection::Rtl),
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "heading" | "H1" => Self::Heading(1),
            "H2" => Self::Heading(2),
            "H3" => Self::Heading(3),
            "H4" => Self::Heading(4),
            "H5" => Self::Heading(5),
            "bullet" => Self::Bullet,
            _ => return None,
        };
        Some(cmd)
    }

    pub fn apply(self, value: &TextValue) -> TextValue {
        match self {
            Self::Bold => inline::toggle_inline(value, inline::BOLD),
            Self::Italic => inline::toggle_inline(value, inline::ITALIC),
            Self::Heading(level) => lines::set_heading(value, level),
            Self::Bullet => lines::toggle_bullet(value),
            Self::Indent => lines::indent(value),
            Self::Outdent => lines::outdent(value),
            Self::Direction(direction) => lines::set_direction(value, direction),
        }
    }
}

/// Applies `cmd` to `value`.
pub fn apply(value: &TextValue, cmd: Cmd) -> TextValue {
    log::debug!("applying {cmd:?}");
    cmd.apply(value)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown formatting command `{0}`")]
pub struct UnknownCommand(pub String);

/// Accepts every toolbar id case-insensitively, plus `indent`, `outdent`,
/// `h0` (remove heading) and `nodir` (remove direction).
impl FromStr for Cmd {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let cmd = match lower.as_str() {
            "indent" => Some(Self::Indent),
            "outdent" => Some(Self::Outdent),
            "h0" => Some(Self::Heading(0)),
            "nodir" => Some(Self::Direction(TextDirection::None)),
            "h1" | "h2" | "h3" | "h4" | "h5" => Self::from_tool_id(&lower.to_ascii_uppercase()),
            other => Self::from_tool_id(other),
        };
        cmd.ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
