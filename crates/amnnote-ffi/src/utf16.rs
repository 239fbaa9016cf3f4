//! Offset conversion between the engine's UTF-8 byte offsets and the UTF-16
//! code units Kotlin strings are indexed by.

/// UTF-16 layout of one string.
#[derive(Debug, Clone)]
pub(crate) struct Utf16Index {
    /// Byte offset at which each UTF-16 unit starts, then the text length.
    /// Both units of a surrogate pair share their char's start.
    starts: Vec<usize>,
}

impl Utf16Index {
    pub fn new(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len() + 1);
        for (i, c) in text.char_indices() {
            starts.extend(std::iter::repeat_n(i, c.len_utf16()));
        }
        starts.push(text.len());
        Self { starts }
    }

    fn byte_len(&self) -> usize {
        self.starts[self.starts.len() - 1]
    }

    /// UTF-16 position of a byte offset. Offsets inside a char map to its
    /// start; offsets past the end map to the end.
    pub fn to_utf16(&self, byte: usize) -> u32 {
        let byte = byte.min(self.byte_len());
        let k = self.starts.partition_point(|&s| s <= byte);
        let floored = self.starts[k - 1];
        self.starts.partition_point(|&s| s < floored) as u32
    }

    /// Byte offset of a UTF-16 position. The second unit of a surrogate pair
    /// maps to its char's start; positions past the end map to the end.
    pub fn to_byte(&self, unit: u32) -> usize {
        self.starts
            .get(unit as usize)
            .copied()
            .unwrap_or_else(|| self.byte_len())
    }
}
