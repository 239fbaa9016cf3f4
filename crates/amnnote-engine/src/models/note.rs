use serde::Serialize;

/// A stored note. `content` is the raw markup and is never inspected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Zero until the note has been stored.
    pub id: u64,
    pub title: String,
    pub content: String,
    pub is_encrypted: bool,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error("Cannot save empty note")]
    Empty,
}

/// Editor state about to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub is_encrypted: bool,
    pub created_at: i64,
}

impl NoteDraft {
    /// Stamps the draft for saving at `now_millis`.
    ///
    /// A draft whose title and content are both blank is rejected. A note
    /// that has never been saved (no id, no creation time) is created now;
    /// every save updates `updated_at`.
    pub fn into_note(self, now_millis: i64) -> Result<Note, NoteError> {
        if self.title.trim().is_empty() && self.content.trim().is_empty() {
            return Err(NoteError::Empty);
        }
        let created_at = if self.id == 0 && self.created_at == 0 {
            now_millis
        } else {
            self.created_at
        };
        Ok(Note {
            id: self.id,
            title: self.title,
            content: self.content,
            is_encrypted: self.is_encrypted,
            created_at,
            updated_at: now_millis,
        })
    }
}

impl From<Note> for NoteDraft {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            is_encrypted: note.is_encrypted,
            created_at: note.created_at,
        }
    }
}
