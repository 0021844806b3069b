//! The on-screen keypad: layout, cursor navigation and key → action mapping

use crate::editor::EditCommand;
use crate::session::Action;
use rustc_hash::FxHashMap;

/// What pressing a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Insert(&'static str),
    Delete,
    Clear,
    Execute,
}

impl KeyAction {
    pub fn to_action(self) -> Action {
        match self {
            KeyAction::Insert(literal) => Action::Edit(EditCommand::Insert(literal.to_string())),
            KeyAction::Delete => Action::Edit(EditCommand::DeleteBackward),
            KeyAction::Clear => Action::Edit(EditCommand::ClearAll),
            KeyAction::Execute => Action::Submit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCap {
    pub label: &'static str,
    pub action: KeyAction,
    /// Width in grid columns
    pub span: u16,
}

const fn key(label: &'static str, action: KeyAction) -> KeyCap {
    KeyCap {
        label,
        action,
        span: 1,
    }
}

const fn wide(label: &'static str, action: KeyAction) -> KeyCap {
    KeyCap {
        label,
        action,
        span: 2,
    }
}

const fn ins(literal: &'static str) -> KeyCap {
    key(literal, KeyAction::Insert(literal))
}

/// Number of grid columns every row fills
pub const COLUMNS: u16 = 5;

/// Keypad rows, top to bottom
pub const LAYOUT: [&[KeyCap]; 6] = [
    &[ins("A"), ins("B"), ins("C"), wide("AC", KeyAction::Clear)],
    &[
        ins("x"),
        ins("("),
        ins(")"),
        key("÷", KeyAction::Insert("/")),
        key("DEL", KeyAction::Delete),
    ],
    &[
        ins("^"),
        ins("7"),
        ins("8"),
        ins("9"),
        key("×", KeyAction::Insert("*")),
    ],
    &[ins("√"), ins("4"), ins("5"), ins("6"), ins("-")],
    &[ins("π"), ins("1"), ins("2"), ins("3"), ins("+")],
    &[ins("θ"), ins("."), ins("0"), wide("EXECUTE", KeyAction::Execute)],
];

/// Highlighted key, as (row, index within row)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeypadCursor {
    pub row: usize,
    pub col: usize,
}

impl KeypadCursor {
    pub fn key(&self) -> KeyCap {
        let row = LAYOUT[self.row.min(LAYOUT.len() - 1)];
        row[self.col.min(row.len() - 1)]
    }

    pub fn up(&mut self) {
        self.row = self.row.checked_sub(1).unwrap_or(LAYOUT.len() - 1);
        self.clamp_col();
    }

    pub fn down(&mut self) {
        self.row = (self.row + 1) % LAYOUT.len();
        self.clamp_col();
    }

    pub fn left(&mut self) {
        let len = LAYOUT[self.row].len();
        self.col = self.col.checked_sub(1).unwrap_or(len - 1);
    }

    pub fn right(&mut self) {
        self.col = (self.col + 1) % LAYOUT[self.row].len();
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(LAYOUT[self.row].len() - 1);
    }
}

/// Alt+letter shortcuts for glyphs a keyboard cannot type directly
pub struct Keypad {
    aliases: FxHashMap<char, KeyAction>,
}

impl Keypad {
    pub fn new() -> Self {
        let mut aliases = FxHashMap::default();
        aliases.insert('p', KeyAction::Insert("π"));
        aliases.insert('t', KeyAction::Insert("θ"));
        aliases.insert('r', KeyAction::Insert("√"));
        aliases.insert('c', KeyAction::Clear);
        Keypad { aliases }
    }

    pub fn alias(&self, c: char) -> Option<KeyAction> {
        self.aliases.get(&c.to_ascii_lowercase()).copied()
    }

    /// Position of the key with `label`, if it is on the pad
    pub fn find(label: &str) -> Option<KeypadCursor> {
        LAYOUT.iter().enumerate().find_map(|(row, keys)| {
            keys.iter()
                .position(|k| k.label == label)
                .map(|col| KeypadCursor { row, col })
        })
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_fills_the_grid() {
        for row in LAYOUT {
            assert_eq!(row.iter().map(|k| k.span).sum::<u16>(), COLUMNS);
        }
    }

    #[test]
    fn operator_glyphs_insert_ascii() {
        let divide = Keypad::find("÷").unwrap().key();
        assert_eq!(divide.action, KeyAction::Insert("/"));
        let times = Keypad::find("×").unwrap().key();
        assert_eq!(times.action, KeyAction::Insert("*"));
    }

    #[test]
    fn cursor_wraps_and_clamps() {
        let mut cursor = KeypadCursor { row: 1, col: 4 };
        cursor.up();
        assert_eq!(cursor, KeypadCursor { row: 0, col: 3 });
        assert_eq!(cursor.key().label, "AC");
        cursor.up();
        assert_eq!(cursor.row, 5);
        cursor.right();
        assert_eq!(cursor.col, 0);
        cursor.left();
        assert_eq!(cursor.key().label, "EXECUTE");
    }

    #[test]
    fn aliases_cover_special_glyphs() {
        let keypad = Keypad::new();
        assert_eq!(keypad.alias('P'), Some(KeyAction::Insert("π")));
        assert_eq!(keypad.alias('z'), None);
    }
}
