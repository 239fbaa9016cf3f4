use serde::Serialize;

/// An inclusive byte range `[start, end]` into the source markup.
///
/// Both ends point at bytes that belong to the range, so a one-byte marker
/// such as `*` at offset 4 is `Span { start: 4, end: 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// First byte offset.
    pub start: usize,
    /// Last byte offset (inclusive).
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} after end {end}");
        Self { start, end }
    }

    /// Span covering `len` bytes from `start`. `len` must be non-zero.
    pub fn at(start: usize, len: usize) -> Self {
        Self::new(start, start + len - 1)
    }

    /// Number of bytes covered.
    #[must_use]
    pub fn len(self) -> usize {
        self.end + 1 - self.start
    }

    /// Inclusive spans always cover at least one byte.
    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    /// One past the last byte, for slicing.
    #[must_use]
    pub fn end_exclusive(self) -> usize {
        self.end + 1
    }

    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn as_range(self) -> std::ops::Range<usize> {
        self.start..self.end_exclusive()
    }
}
