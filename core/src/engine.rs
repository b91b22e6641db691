// core/src/engine.rs
//
// Seam between the generic session/adapter layer and a language-specific
// composition engine (Telex today). The adapter only ever talks to a
// `Composer`; the rules that turn keystrokes into accented text live in the
// language crate.

use serde::{Deserialize, Serialize};

/// Outcome of feeding one keystroke to a composer.
///
/// There is no error outcome: input that matches no rule degrades to literal
/// text, so user input is never lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Composition {
    /// A rule fired and the word was rewritten.
    Transformed,
    /// No rule matched; the key was appended unmodified.
    Literal,
    /// The key repeated the last applied mark, which was rolled back.
    Undone,
}

/// Trait that composition engines implement to be driven by `ImeEngine`.
pub trait Composer {
    /// Offer a keystroke to the composer.
    ///
    /// Returns `None` when the key cannot start or continue a word; the caller
    /// must then pass the key through to the application untouched.
    fn feed(&mut self, ch: char) -> Option<Composition>;

    /// Remove `n` scalar values ending at the cursor.
    fn delete_backward(&mut self, n: usize);

    /// Remove `n` scalar values starting at the cursor.
    fn delete_forward(&mut self, n: usize);

    /// Move the cursor one scalar value to the left.
    fn move_left(&mut self);

    /// Move the cursor one scalar value to the right.
    fn move_right(&mut self);

    /// Drop the word being composed.
    fn clear(&mut self);

    /// The rendered word.
    fn text(&self) -> &str;

    /// Cursor as a byte offset into `text()`.
    fn cursor(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}
