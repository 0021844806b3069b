//! Variable bank and literal placeholder substitution

use super::buffer::InputBuffer;
use std::fmt;
use std::str::FromStr;

/// One of the fixed placeholder keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKey {
    A,
    B,
    C,
}

impl VarKey {
    /// Substitution order
    pub const ALL: [VarKey; 3] = [VarKey::A, VarKey::B, VarKey::C];

    pub fn symbol(self) -> char {
        match self {
            VarKey::A => 'A',
            VarKey::B => 'B',
            VarKey::C => 'C',
        }
    }

    pub fn next(self) -> Self {
        match self {
            VarKey::A => VarKey::B,
            VarKey::B => VarKey::C,
            VarKey::C => VarKey::A,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            VarKey::A => VarKey::C,
            VarKey::B => VarKey::A,
            VarKey::C => VarKey::B,
        }
    }

    fn index(self) -> usize {
        match self {
            VarKey::A => 0,
            VarKey::B => 1,
            VarKey::C => 2,
        }
    }
}

impl fmt::Display for VarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for VarKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(VarKey::A),
            "B" | "b" => Ok(VarKey::B),
            "C" | "c" => Ok(VarKey::C),
            other => Err(format!("unknown variable '{}' (expected A, B or C)", other)),
        }
    }
}

/// User-editable replacement text for each [`VarKey`].
///
/// Each entry is an [`InputBuffer`] so the bank can be edited with the same
/// commands as the main fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableBank {
    entries: [InputBuffer; 3],
}

impl VariableBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: VarKey) -> &str {
        self.entries[key.index()].text()
    }

    /// Replace an entry's text, caret at the end
    pub fn set(&mut self, key: VarKey, value: impl Into<String>) {
        self.entries[key.index()] = InputBuffer::from_text(value);
    }

    pub fn buffer(&self, key: VarKey) -> &InputBuffer {
        &self.entries[key.index()]
    }

    pub fn buffer_mut(&mut self, key: VarKey) -> &mut InputBuffer {
        &mut self.entries[key.index()]
    }

    /// Entries whose value is not blank, in substitution order
    pub fn active(&self) -> impl Iterator<Item = (VarKey, &str)> {
        VarKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .filter(|(_, value)| !value.trim().is_empty())
    }
}

/// Replace every occurrence of each non-blank bank key with `(value)`.
///
/// Replacement is literal and runs A, then B, then C over the whole string, so
/// a key that appears inside an earlier value is substituted again. Callers
/// rely on this exact behaviour; it is not token-aware.
pub fn substitute(raw: &str, bank: &VariableBank) -> String {
    let mut processed = raw.to_string();
    for (key, value) in bank.active() {
        let mut key_buf = [0u8; 4];
        let pattern: &str = key.symbol().encode_utf8(&mut key_buf);
        processed = processed.replace(pattern, &format!("({})", value));
    }
    processed
}
