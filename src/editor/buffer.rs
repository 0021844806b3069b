//! Caret-aware text buffer edited by the keypad and the keyboard
//!
//! Offsets are measured in characters, not bytes, so that keypad glyphs such as
//! `π`, `θ` and `√` occupy exactly one caret position.

/// Caret of an [`InputBuffer`].
///
/// `anchor` is where a selection started and `head` is where the caret
/// currently sits. When both are equal the caret is collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub anchor: usize,
    pub head: usize,
}

impl Caret {
    /// A collapsed caret at `offset`
    pub fn at(offset: usize) -> Self {
        Caret {
            anchor: offset,
            head: offset,
        }
    }

    /// A selection spanning `start..end`
    pub fn range(start: usize, end: usize) -> Self {
        Caret {
            anchor: start,
            head: end,
        }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }
}

/// Edit commands understood by [`InputBuffer::apply`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// Splice a literal at the caret, replacing any selection
    Insert(String),
    /// Remove the character before the caret, or the selection if there is one
    DeleteBackward,
    /// Remove the selected text; no-op on a collapsed caret
    DeleteSelection,
    /// Empty the buffer and reset the caret
    ClearAll,
    MoveLeft { extend: bool },
    MoveRight { extend: bool },
    Home { extend: bool },
    End { extend: bool },
    SelectAll,
}

/// A single editable text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    caret: Caret,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the caret at the end
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        InputBuffer {
            text,
            caret: Caret::at(len),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Move the caret, clamping both ends into `[0, len]`
    pub fn set_caret(&mut self, caret: Caret) {
        let len = self.len();
        self.caret = Caret {
            anchor: caret.anchor.min(len),
            head: caret.head.min(len),
        };
    }

    /// Apply one edit command
    pub fn apply(&mut self, command: &EditCommand) {
        match command {
            EditCommand::Insert(literal) => self.insert(literal),
            EditCommand::DeleteBackward => self.delete_backward(),
            EditCommand::DeleteSelection => self.delete_selection(),
            EditCommand::ClearAll => self.clear(),
            EditCommand::MoveLeft { extend } => {
                let target = if !extend && !self.caret.is_collapsed() {
                    self.caret.start()
                } else {
                    self.caret.head.saturating_sub(1)
                };
                self.move_head(target, *extend);
            }
            EditCommand::MoveRight { extend } => {
                let target = if !extend && !self.caret.is_collapsed() {
                    self.caret.end()
                } else {
                    (self.caret.head + 1).min(self.len())
                };
                self.move_head(target, *extend);
            }
            EditCommand::Home { extend } => self.move_head(0, *extend),
            EditCommand::End { extend } => self.move_head(self.len(), *extend),
            EditCommand::SelectAll => self.caret = Caret::range(0, self.len()),
        }
    }

    /// Splice `literal` at the caret; a selection is replaced
    pub fn insert(&mut self, literal: &str) {
        let start = self.caret.start();
        let end = self.caret.end();
        let (byte_start, byte_end) = (self.byte_offset(start), self.byte_offset(end));
        self.text.replace_range(byte_start..byte_end, literal);
        self.caret = Caret::at(start + literal.chars().count());
    }

    /// Keypad `DEL`: delete the selection, or the character before the caret
    pub fn delete_backward(&mut self) {
        if !self.caret.is_collapsed() {
            self.delete_selection();
            return;
        }
        let position = self.caret.head;
        if position == 0 {
            return;
        }
        let byte_start = self.byte_offset(position - 1);
        let byte_end = self.byte_offset(position);
        self.text.replace_range(byte_start..byte_end, "");
        self.caret = Caret::at(position - 1);
    }

    pub fn delete_selection(&mut self) {
        if self.caret.is_collapsed() {
            return;
        }
        let start = self.caret.start();
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(self.caret.end());
        self.text.replace_range(byte_start..byte_end, "");
        self.caret = Caret::at(start);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = Caret::default();
    }

    /// Split the text around the caret: (before, selected, after)
    pub fn segments(&self) -> (&str, &str, &str) {
        let start = self.byte_offset(self.caret.start());
        let end = self.byte_offset(self.caret.end());
        (&self.text[..start], &self.text[start..end], &self.text[end..])
    }

    fn move_head(&mut self, target: usize, extend: bool) {
        self.caret.head = target;
        if !extend {
            self.caret.anchor = target;
        }
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }
}
