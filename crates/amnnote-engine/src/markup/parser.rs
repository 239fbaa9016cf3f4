use std::mem;
use std::ops::Range;

use super::{
    cursor::Cursor,
    kinds::{Bullet, Directive, Emphasis, Escape, Heading, Link},
    model::{ParsedBlock, TextBlock, TextDirection, TextStyle},
    span::Span,
};

/// Parses markup into styled blocks, dropping source positions.
pub fn parse(input: &str) -> Vec<TextBlock> {
    analyze(input).into_iter().map(|p| p.block).collect()
}

/// Parses markup into styled blocks with the source spans of their content
/// and markers.
///
/// The scan is a single left-to-right pass. Malformed markup never fails:
/// unmatched brackets, dangling escapes and stray toggles are read as
/// literal text.
pub fn analyze(input: &str) -> Vec<ParsedBlock> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut st = ScanState::default();
    let mut cur = Cursor::new(input);
    let mut start_of_line = true;

    while !cur.eof() {
        if start_of_line {
            start_of_line = false;
            st.begin_line(&mut cur);
            if cur.eof() {
                break;
            }
        }

        match cur.peek() {
            Some(b'\n') => {
                st.append(cur.pos(), '\n');
                st.flush();
                cur.bump_n(1);
                st.end_line();
                start_of_line = true;
            }
            Some(Escape::BACKSLASH) => scan_backslash(&mut st, &mut cur),
            Some(Link::OPEN) => scan_link(&mut st, &mut cur),
            Some(Emphasis::STAR) => scan_emphasis(&mut st, &mut cur),
            _ => st.append_at_cursor(&mut cur),
        }
    }

    st.flush();
    log::trace!(
        "analyzed {} bytes into {} blocks",
        input.len(),
        st.out.len()
    );
    st.out
}

/// Mutable state threaded through the scan.
#[derive(Default)]
struct ScanState {
    direction: TextDirection,
    bold: bool,
    italic: bool,
    /// Style established by the line prefix.
    line_style: TextStyle,
    /// Style of the run being built; `Link` inside a link label.
    current_style: TextStyle,
    current_link: String,

    buf: String,
    content_start: Option<usize>,
    content_end: usize,
    markers: Vec<Span>,
    /// Opening markers seen before the next block has any text.
    pending: Vec<Span>,

    out: Vec<ParsedBlock>,
}

impl ScanState {
    /// Consumes leading direction directives and a heading or bullet prefix.
    fn begin_line(&mut self, cur: &mut Cursor<'_>) {
        while let Some(direction) = Directive::parse(cur.rest()) {
            self.direction = direction;
            self.pending.push(Span::at(cur.pos(), Directive::LEN));
            cur.bump_n(Directive::LEN);
        }

        let hashes = cur.run_of(Heading::HASH);
        self.line_style = if hashes > 0 && cur.peek_at(hashes) == Some(Heading::SPACE) {
            self.pending.push(Span::at(cur.pos(), hashes + 1));
            cur.bump_n(hashes + 1);
            TextStyle::heading(hashes).unwrap_or_default()
        } else if cur.starts_with(Bullet::PREFIX.as_bytes()) {
            self.pending.push(Span::at(cur.pos(), Bullet::PREFIX.len()));
            cur.bump_n(Bullet::PREFIX.len());
            TextStyle::ListItem
        } else {
            TextStyle::Body
        };
        self.current_style = self.line_style;
    }

    fn end_line(&mut self) {
        self.line_style = TextStyle::Body;
        self.current_style = TextStyle::Body;
        self.current_link.clear();
        self.pending.clear();
    }

    /// Records an opening marker: queued while the buffer is empty, otherwise
    /// owned by the block being built.
    fn attach_marker(&mut self, span: Span) {
        if self.buf.is_empty() {
            self.pending.push(span);
        } else {
            self.markers.push(span);
        }
    }

    /// Records a closing marker on the block flushed last.
    fn close_marker(&mut self, span: Span) {
        match self.out.last_mut() {
            Some(last) => last.markers.push(span),
            None => self.pending.push(span),
        }
    }

    fn append(&mut self, pos: usize, c: char) {
        if self.buf.is_empty() {
            self.markers.append(&mut self.pending);
            self.content_start = Some(pos);
        }
        self.buf.push(c);
        self.content_end = pos + c.len_utf8() - 1;
    }

    fn append_at_cursor(&mut self, cur: &mut Cursor<'_>) {
        if let Some(c) = cur.peek_char() {
            self.append(cur.pos(), c);
            cur.bump_n(c.len_utf8());
        }
    }

    fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let link = if self.current_style == TextStyle::Link {
            self.current_link.clone()
        } else {
            String::new()
        };
        let block = TextBlock {
            text: mem::take(&mut self.buf),
            direction: self.direction,
            bold: self.bold,
            italic: self.italic,
            style: self.current_style,
            link,
        };
        let content = self
            .content_start
            .take()
            .map(|start| Span::new(start, self.content_end));
        self.out.push(ParsedBlock {
            block,
            content,
            markers: mem::take(&mut self.markers),
        });
    }
}

fn scan_backslash(st: &mut ScanState, cur: &mut Cursor<'_>) {
    let pos = cur.pos();
    if let Some(direction) = Directive::parse(cur.rest()) {
        st.flush();
        st.direction = direction;
        st.attach_marker(Span::at(pos, Directive::LEN));
        cur.bump_n(Directive::LEN);
        return;
    }
    match cur.peek_at(1) {
        Some(next) if Escape::escapable(next) => {
            st.attach_marker(Span::at(pos, 1));
            st.append(pos + 1, char::from(next));
            cur.bump_n(2);
        }
        _ => {
            st.append(pos, '\\');
            cur.bump_n(1);
        }
    }
}

fn scan_emphasis(st: &mut ScanState, cur: &mut Cursor<'_>) {
    let pos = cur.pos();
    let len = if cur.peek_at(1) == Some(Emphasis::STAR) {
        2
    } else {
        1
    };
    let span = Span::at(pos, len);

    st.flush();
    let closing = if len == 2 { st.bold } else { st.italic };
    if closing {
        st.close_marker(span);
    } else {
        st.attach_marker(span);
    }
    if len == 2 {
        st.bold = !st.bold;
    } else {
        st.italic = !st.italic;
    }
    cur.bump_n(len);
}

fn scan_link(st: &mut ScanState, cur: &mut Cursor<'_>) {
    let s = cur.s;
    let Some(link) = find_link(s, cur.pos()) else {
        st.append(cur.pos(), '[');
        cur.bump_n(1);
        return;
    };

    st.flush();
    st.attach_marker(Span::at(cur.pos(), 1));
    st.current_style = TextStyle::Link;
    st.current_link = link.url;

    let bytes = s.as_bytes();
    let mut j = link.label.start;
    while j < link.label.end {
        if bytes[j] == Escape::BACKSLASH
            && j + 1 < link.label.end
            && Escape::escapable(bytes[j + 1])
        {
            st.attach_marker(Span::at(j, 1));
            st.append(j + 1, char::from(bytes[j + 1]));
            j += 2;
        } else if let Some(c) = s[j..].chars().next() {
            st.append(j, c);
            j += c.len_utf8();
        } else {
            break;
        }
    }

    st.flush();
    st.close_marker(link.closing);
    st.current_style = st.line_style;
    st.current_link.clear();
    cur.seek(link.end);
}

/// A matched `[label](url)`.
#[derive(Debug, PartialEq)]
struct LinkMatch {
    /// Label bytes between the brackets.
    label: Range<usize>,
    /// Trimmed target.
    url: String,
    /// `](url)` including both delimiters.
    closing: Span,
    /// Offset just past the closing paren.
    end: usize,
}

/// Matches `[label](url)` at `start`. Neither part may cross a line and the
/// target must not be blank.
fn find_link(s: &str, start: usize) -> Option<LinkMatch> {
    let bytes = s.as_bytes();
    let close_bracket = find_in_line(bytes, start + 1, Link::CLOSE)?;
    if bytes.get(close_bracket + 1) != Some(&Link::URL_OPEN) {
        return None;
    }
    let close_paren = find_in_line(bytes, close_bracket + 2, Link::URL_CLOSE)?;

    let url = s[close_bracket + 2..close_paren].trim();
    if url.is_empty() {
        return None;
    }

    Some(LinkMatch {
        label: start + 1..close_bracket,
        url: url.to_string(),
        closing: Span::new(close_bracket, close_paren),
        end: close_paren + 1,
    })
}

/// Offset of the first `needle` at or after `from`, stopping at a newline.
fn find_in_line(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .take_while(|&&b| b != b'\n')
        .position(|&b| b == needle)
        .map(|i| from + i)
}
