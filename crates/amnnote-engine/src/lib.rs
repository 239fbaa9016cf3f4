pub mod display;
pub mod editing;
pub mod io;
pub mod markup;
pub mod models;

// Re-export key types for easier usage
pub use display::{Decoration, MarkerView, OffsetMap, StyledRange, active_block_index};
pub use editing::{Cmd, Selection, TextValue};
pub use io::IoError;
pub use markup::{ParsedBlock, Span, TextBlock, TextDirection, TextStyle, analyze, encode, parse};
pub use models::{Note, NoteDraft, NoteError};
