//! Text editing for the calculator's input fields.
//!
//! - [`buffer`]: [`InputBuffer`], a string plus a character-indexed caret, and the
//!   [`EditCommand`]s the keypad and keyboard dispatch against it
//! - [`variables`]: the `A`/`B`/`C` [`VariableBank`] and the literal
//!   [`substitute`] pass applied before a request is sent

pub mod buffer;
pub mod variables;

pub use buffer::{Caret, EditCommand, InputBuffer};
pub use variables::{substitute, VarKey, VariableBank};
