//! # Markup
//!
//! The note markup: a small line-oriented syntax with direction directives
//! (`\rtl`, `\ltr`), heading and bullet prefixes, `**bold**` and `*italic*`
//! toggles, `[label](url)` links and backslash escapes.
//!
//! [`analyze`] turns markup into [`ParsedBlock`]s (styled runs plus the byte
//! spans of their content and syntax markers), [`parse`] drops the spans, and
//! [`encode`] writes blocks back out.

pub mod cursor;
pub mod encoder;
pub mod kinds;
pub mod model;
pub mod parser;
pub mod snapshot;
pub mod span;

pub use encoder::encode;
pub use model::{ParsedBlock, TextBlock, TextDirection, TextStyle};
pub use parser::{analyze, parse};
pub use span::Span;

#[cfg(test)]
mod tests;
