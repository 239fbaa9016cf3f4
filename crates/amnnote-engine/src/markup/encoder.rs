use super::{
    kinds::{Bullet, Directive, Emphasis, Escape, Heading},
    model::{TextBlock, TextDirection, TextStyle},
};

/// Serializes blocks back into markup.
///
/// For any sequence produced by [`super::parse`], parsing the result yields
/// the same runs again. Hand-built sequences are encoded with the same fixed
/// rules but are not guaranteed to survive a round trip.
pub fn encode(blocks: &[TextBlock]) -> String {
    let mut enc = Encoder::default();
    for (i, block) in blocks.iter().enumerate() {
        enc.block(block, &blocks[i..]);
    }
    enc.out
}

struct Encoder {
    out: String,
    direction: TextDirection,
    bold: bool,
    italic: bool,
    start_of_line: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            out: String::new(),
            direction: TextDirection::None,
            bold: false,
            italic: false,
            start_of_line: true,
        }
    }
}

impl Encoder {
    /// Emits one block. `rest` starts with `block` and runs to the end of the
    /// document; it is only read when a line opens with a link.
    fn block(&mut self, block: &TextBlock, rest: &[TextBlock]) {
        let (text, newline) = match block.text.strip_suffix('\n') {
            Some(text) => (text, true),
            None => (block.text.as_str(), false),
        };

        // Content sits where the parser checks for a line prefix.
        let mut at_line_start = false;
        if self.start_of_line {
            if let Some(directive) = Directive::for_direction(block.direction) {
                self.out.push_str(directive);
                self.direction = block.direction;
            }
            let style = line_style(rest);
            if let Some(level) = style.heading_level() {
                self.out.push_str(&Heading::prefix(level));
            } else if style == TextStyle::ListItem {
                self.out.push_str(Bullet::PREFIX);
            } else {
                at_line_start = true;
            }
        } else if block.direction != TextDirection::None && block.direction != self.direction {
            if let Some(directive) = Directive::for_direction(block.direction) {
                self.out.push_str(directive);
            }
            self.direction = block.direction;
        }

        if self.set_emphasis(block.bold, block.italic) {
            at_line_start = false;
        }

        if block.style == TextStyle::Link && !block.link.is_empty() {
            self.out.push('[');
            escape_into(&mut self.out, text, false);
            self.out.push_str("](");
            self.out.push_str(&block.link);
            self.out.push(')');
        } else {
            escape_into(&mut self.out, text, at_line_start);
        }

        if newline {
            self.out.push('\n');
        }
        self.start_of_line = newline;
    }

    /// Emits the toggle that moves the running flags to the block's flags.
    /// Returns whether anything was written.
    fn set_emphasis(&mut self, bold: bool, italic: bool) -> bool {
        let token = match (bold != self.bold, italic != self.italic) {
            (true, true) => Emphasis::BOTH,
            (true, false) => Emphasis::BOLD,
            (false, true) => Emphasis::ITALIC,
            (false, false) => return false,
        };
        self.out.push_str(token);
        self.bold = bold;
        self.italic = italic;
        true
    }
}

/// Style that decides a line's prefix: the first non-link run on the line.
/// Link runs carry `Link` even inside heading and bullet lines.
fn line_style(rest: &[TextBlock]) -> TextStyle {
    for block in rest {
        if block.style != TextStyle::Link {
            return block.style;
        }
        if block.ends_line() {
            break;
        }
    }
    TextStyle::Body
}

/// Appends `text` with reserved characters backslash-escaped. `#` and `-` are
/// escaped only where the parser would read them as a line prefix.
fn escape_into(out: &mut String, text: &str, at_line_start: bool) {
    let mut line_start = at_line_start;
    for c in text.chars() {
        if Escape::always(c) || (line_start && Escape::at_line_start(c)) {
            out.push('\\');
        }
        out.push(c);
        line_start = c == '\n';
    }
}
