//! Inline editing rules for task titles and descriptions.

use thiserror::Error;

use crate::api::TaskDto;
use crate::task::domain::{TaskDescription, TaskTitle};

/// Placeholder shown for a task without a description.
pub const DESCRIPTION_PLACEHOLDER: &str = "Enter task description...";

/// Kind of text being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Title field. Drafts are trimmed and Enter saves.
    SingleLine,
    /// Description field. Drafts are kept verbatim and Ctrl+Enter saves.
    Multiline,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Plain Enter.
    Enter,
    /// Enter with Ctrl held.
    CtrlEnter,
    /// Escape.
    Escape,
}

/// Reasons a complete value cannot be placed in an editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The field does not accept edits.
    #[error("field is read-only")]
    ReadOnly,
    /// The value is longer than the field allows.
    #[error("value has {length} characters, the limit is {limit}")]
    TooLong {
        /// Characters in the rejected value.
        length: usize,
        /// Field limit in characters.
        limit: usize,
    },
}

/// Editing state for one field of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEditor {
    mode: EditorMode,
    value: String,
    draft: Option<String>,
    editable: bool,
    max_length: usize,
}

impl InlineEditor {
    /// Title editor for `task`.
    ///
    /// Completed tasks are read-only. A task that still needs a name starts
    /// in editing mode.
    #[must_use]
    pub fn title(task: &TaskDto, needs_naming: bool) -> Self {
        let mut editor = Self {
            mode: EditorMode::SingleLine,
            value: task.title.clone(),
            draft: None,
            editable: !task.is_completed,
            max_length: TaskTitle::MAX_LENGTH,
        };
        if needs_naming || task.title.is_empty() {
            editor.begin();
        }
        editor
    }

    /// Description editor for `task`. Completed tasks are read-only.
    #[must_use]
    pub fn description(task: &TaskDto) -> Self {
        Self {
            mode: EditorMode::Multiline,
            value: task.description.clone().unwrap_or_default(),
            draft: None,
            editable: !task.is_completed,
            max_length: TaskDescription::MAX_LENGTH,
        }
    }

    /// Field kind.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Value currently shown when not editing.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Draft text while editing.
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Whether the field accepts edits.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    /// Whether a draft is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Opens a draft seeded with the displayed value.
    ///
    /// Returns `false` for read-only fields.
    pub fn begin(&mut self) -> bool {
        if !self.editable {
            return false;
        }
        if self.draft.is_none() {
            self.draft = Some(self.value.clone());
        }
        true
    }

    /// Replaces the draft text, clipped to the field's character limit.
    ///
    /// Ignored when no draft is open.
    pub fn input(&mut self, text: &str) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = text.chars().take(self.max_length).collect();
        }
    }

    /// Opens a draft holding exactly `text`.
    ///
    /// Unlike [`Self::input`], nothing is clipped: a value over the field's
    /// limit is refused and any open draft is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ReadOnly`] for read-only fields and
    /// [`EditorError::TooLong`] when `text` exceeds the limit.
    pub fn paste(&mut self, text: &str) -> Result<(), EditorError> {
        let length = text.chars().count();
        if length > self.max_length {
            return Err(EditorError::TooLong {
                length,
                limit: self.max_length,
            });
        }
        if !self.begin() {
            return Err(EditorError::ReadOnly);
        }
        self.draft = Some(text.to_owned());
        Ok(())
    }

    /// Closes the draft and restores the displayed value.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Closes the draft and returns the value to save, if any.
    ///
    /// Single-line drafts are trimmed. `None` is returned when the normalised
    /// draft equals the displayed value, so no request is needed.
    pub fn commit(&mut self) -> Option<String> {
        let draft = self.draft.take()?;
        let normalised = match self.mode {
            EditorMode::SingleLine => draft.trim().to_owned(),
            EditorMode::Multiline => draft,
        };
        (normalised != self.value).then_some(normalised)
    }

    /// Applies a key press and returns the value to save, if any.
    pub fn handle_key(&mut self, key: EditorKey) -> Option<String> {
        match (self.mode, key) {
            (_, EditorKey::Escape) => {
                self.cancel();
                None
            }
            (EditorMode::SingleLine, EditorKey::Enter | EditorKey::CtrlEnter)
            | (EditorMode::Multiline, EditorKey::CtrlEnter) => self.commit(),
            (EditorMode::Multiline, EditorKey::Enter) => {
                let limit = self.max_length;
                if let Some(draft) = self
                    .draft
                    .as_mut()
                    .filter(|draft| draft.chars().count() < limit)
                {
                    draft.push('\n');
                }
                None
            }
        }
    }
}
