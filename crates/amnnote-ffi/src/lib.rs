//! UniFFI bindings for the amnnote Android app
//!
//! Exposes the markup engine to Kotlin. Kotlin strings are indexed in UTF-16
//! code units, so every offset crossing this boundary is converted to and
//! from the engine's byte offsets here.

mod utf16;

use amnnote_engine::{
    Cmd, Decoration, MarkerView, NoteDraft, NoteError, ParsedBlock, Selection, StyledRange,
    TextBlock, TextDirection, TextStyle, TextValue, editing,
};
use std::str::FromStr;
use utf16::Utf16Index;

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Unknown command: {reason}")]
    UnknownCommand { reason: String },
    #[error("Cannot save note: {reason}")]
    InvalidNote { reason: String },
}

impl From<NoteError> for FfiError {
    fn from(e: NoteError) -> Self {
        Self::InvalidNote {
            reason: e.to_string(),
        }
    }
}

// ============ DTOs ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum DirectionDto {
    Ltr,
    Rtl,
    None,
}

impl From<TextDirection> for DirectionDto {
    fn from(d: TextDirection) -> Self {
        match d {
            TextDirection::Ltr => Self::Ltr,
            TextDirection::Rtl => Self::Rtl,
            TextDirection::None => Self::None,
        }
    }
}

impl From<DirectionDto> for TextDirection {
    fn from(d: DirectionDto) -> Self {
        match d {
            DirectionDto::Ltr => Self::Ltr,
            DirectionDto::Rtl => Self::Rtl,
            DirectionDto::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum StyleDto {
    Body,
    ListItem,
    Power,
    Subtitle,
    Link,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
}

impl From<TextStyle> for StyleDto {
    fn from(s: TextStyle) -> Self {
        match s {
            TextStyle::Body => Self::Body,
            TextStyle::ListItem => Self::ListItem,
            TextStyle::Power => Self::Power,
            TextStyle::Subtitle => Self::Subtitle,
            TextStyle::Link => Self::Link,
            TextStyle::Heading1 => Self::Heading1,
            TextStyle::Heading2 => Self::Heading2,
            TextStyle::Heading3 => Self::Heading3,
            TextStyle::Heading4 => Self::Heading4,
            TextStyle::Heading5 => Self::Heading5,
        }
    }
}

impl From<StyleDto> for TextStyle {
    fn from(s: StyleDto) -> Self {
        match s {
            StyleDto::Body => Self::Body,
            StyleDto::ListItem => Self::ListItem,
            StyleDto::Power => Self::Power,
            StyleDto::Subtitle => Self::Subtitle,
            StyleDto::Link => Self::Link,
            StyleDto::Heading1 => Self::Heading1,
            StyleDto::Heading2 => Self::Heading2,
            StyleDto::Heading3 => Self::Heading3,
            StyleDto::Heading4 => Self::Heading4,
            StyleDto::Heading5 => Self::Heading5,
        }
    }
}

/// A styled run of text.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TextBlockDto {
    pub text: String,
    pub direction: DirectionDto,
    pub bold: bool,
    pub italic: bool,
    pub style: StyleDto,
    /// Link target, empty unless `style` is `Link`
    pub link: String,
}

impl From<TextBlock> for TextBlockDto {
    fn from(b: TextBlock) -> Self {
        Self {
            text: b.text,
            direction: b.direction.into(),
            bold: b.bold,
            italic: b.italic,
            style: b.style.into(),
            link: b.link,
        }
    }
}

impl From<TextBlockDto> for TextBlock {
    fn from(b: TextBlockDto) -> Self {
        Self {
            text: b.text,
            direction: b.direction.into(),
            bold: b.bold,
            italic: b.italic,
            style: b.style.into(),
            link: b.link,
        }
    }
}

/// Half-open range in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct RangeDto {
    pub start: u32,
    pub end: u32,
}

impl RangeDto {
    fn from_bytes(idx: &Utf16Index, start: usize, end: usize) -> Self {
        Self {
            start: idx.to_utf16(start),
            end: idx.to_utf16(end),
        }
    }
}

/// A parsed block with the source ranges of its content and markers.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ParsedBlockDto {
    pub block: TextBlockDto,
    pub content: Option<RangeDto>,
    pub markers: Vec<RangeDto>,
}

impl ParsedBlockDto {
    fn from_engine(parsed: ParsedBlock, idx: &Utf16Index) -> Self {
        Self {
            content: parsed
                .content
                .map(|sp| RangeDto::from_bytes(idx, sp.start, sp.end_exclusive())),
            markers: parsed
                .markers
                .iter()
                .map(|sp| RangeDto::from_bytes(idx, sp.start, sp.end_exclusive()))
                .collect(),
            block: parsed.block.into(),
        }
    }
}

/// Editor text and selection, offsets in UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TextValueDto {
    pub text: String,
    pub selection_start: u32,
    pub selection_end: u32,
}

impl TextValueDto {
    fn into_engine(self) -> TextValue {
        let idx = Utf16Index::new(&self.text);
        let selection = Selection::new(
            idx.to_byte(self.selection_start),
            idx.to_byte(self.selection_end),
        );
        TextValue::new(self.text, selection)
    }

    fn from_engine(value: TextValue) -> Self {
        let idx = Utf16Index::new(&value.text);
        let selection_start = idx.to_utf16(value.selection.start);
        let selection_end = idx.to_utf16(value.selection.end);
        Self {
            text: value.text,
            selection_start,
            selection_end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum DecorationDto {
    Style { style: StyleDto },
    Emphasis { bold: bool, italic: bool },
    Paragraph { direction: DirectionDto },
    ListIndent,
    ActiveMarker,
}

impl From<Decoration> for DecorationDto {
    fn from(d: Decoration) -> Self {
        match d {
            Decoration::Style(style) => Self::Style {
                style: style.into(),
            },
            Decoration::Emphasis { bold, italic } => Self::Emphasis { bold, italic },
            Decoration::Paragraph(direction) => Self::Paragraph {
                direction: direction.into(),
            },
            Decoration::ListIndent => Self::ListIndent,
            Decoration::ActiveMarker => Self::ActiveMarker,
        }
    }
}

/// A decoration over a range of the displayed text.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct StyledRangeDto {
    pub range: RangeDto,
    pub decoration: DecorationDto,
}

impl StyledRangeDto {
    fn from_engine(styled: &StyledRange, idx: &Utf16Index) -> Self {
        Self {
            range: RangeDto::from_bytes(idx, styled.range.start, styled.range.end),
            decoration: styled.decoration.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NoteDto {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub is_encrypted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Editor state about to be saved; `id` and `created_at` are 0 for new notes.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct NoteDraftDto {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub is_encrypted: bool,
    pub created_at: i64,
}

// ============ Marker View Handle ============

/// The displayed form of a note for one cursor position.
///
/// Immutable once built; the editor builds a new one whenever the text or
/// the cursor changes.
#[derive(uniffi::Object)]
pub struct MarkerViewHandle {
    view: MarkerView,
    source: Utf16Index,
    shown: Utf16Index,
    styles: Vec<StyledRangeDto>,
}

#[uniffi::export]
impl MarkerViewHandle {
    /// Builds the view for `text` with the markers of the block under
    /// `cursor` (UTF-16) left visible. `None` hides every marker.
    #[uniffi::constructor]
    pub fn for_cursor(text: String, cursor: Option<u32>) -> Self {
        let source = Utf16Index::new(&text);
        let view = MarkerView::for_cursor(&text, cursor.map(|c| source.to_byte(c)));
        let shown = Utf16Index::new(view.text());
        let styles = view
            .styles()
            .iter()
            .map(|s| StyledRangeDto::from_engine(s, &shown))
            .collect();
        Self {
            view,
            source,
            shown,
            styles,
        }
    }

    /// Text with the inactive markers removed.
    pub fn text(&self) -> String {
        self.view.text().to_string()
    }

    pub fn styles(&self) -> Vec<StyledRangeDto> {
        self.styles.clone()
    }

    /// Maps a cursor position in the source to the displayed text.
    pub fn original_to_transformed(&self, offset: u32) -> u32 {
        let byte = self.source.to_byte(offset);
        let shown = self.view.offsets().original_to_transformed(byte);
        self.shown.to_utf16(shown)
    }

    /// Maps a cursor position in the displayed text back to the source.
    pub fn transformed_to_original(&self, offset: u32) -> u32 {
        let byte = self.shown.to_byte(offset);
        let source = self.view.offsets().transformed_to_original(byte);
        self.source.to_utf16(source)
    }
}

// ============ Standalone Functions ============

/// Parses markup into styled blocks with their source ranges (UTF-16).
#[uniffi::export]
pub fn analyze(text: String) -> Vec<ParsedBlockDto> {
    let idx = Utf16Index::new(&text);
    amnnote_engine::analyze(&text)
        .into_iter()
        .map(|p| ParsedBlockDto::from_engine(p, &idx))
        .collect()
}

/// Parses markup into styled blocks.
#[uniffi::export]
pub fn parse(text: String) -> Vec<TextBlockDto> {
    amnnote_engine::parse(&text)
        .into_iter()
        .map(Into::into)
        .collect()
}

/// Serializes styled blocks back into markup.
#[uniffi::export]
pub fn encode(blocks: Vec<TextBlockDto>) -> String {
    let blocks: Vec<TextBlock> = blocks.into_iter().map(Into::into).collect();
    amnnote_engine::encode(&blocks)
}

/// Applies a toolbar command (`bold`, `italic`, `H1`..`H5`, `bullet`,
/// `ltr`, `rtl`, `indent`, `outdent`, ...) to the editor value.
#[uniffi::export]
pub fn apply_command(value: TextValueDto, command: String) -> Result<TextValueDto, FfiError> {
    let cmd = Cmd::from_str(&command).map_err(|e| FfiError::UnknownCommand {
        reason: e.to_string(),
    })?;
    let out = editing::apply(&value.into_engine(), cmd);
    Ok(TextValueDto::from_engine(out))
}

/// Continues or ends a bullet list after a newline was typed.
#[uniffi::export]
pub fn continue_list(previous: TextValueDto, current: TextValueDto) -> TextValueDto {
    let out = editing::continue_list(&previous.into_engine(), &current.into_engine());
    TextValueDto::from_engine(out)
}

/// Validates and timestamps a note before it is stored.
#[uniffi::export]
pub fn prepare_note(draft: NoteDraftDto, now_millis: i64) -> Result<NoteDto, FfiError> {
    let note = NoteDraft {
        id: draft.id,
        title: draft.title,
        content: draft.content,
        is_encrypted: draft.is_encrypted,
        created_at: draft.created_at,
    }
    .into_note(now_millis)?;
    log::debug!("prepared note {} at {now_millis}", note.id);

    Ok(NoteDto {
        id: note.id,
        title: note.title,
        content: note.content,
        is_encrypted: note.is_encrypted,
        created_at: note.created_at,
        updated_at: note.updated_at,
    })
}
