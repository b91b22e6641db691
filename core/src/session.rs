//! IME session management.
//!
//! The `ImeSession` struct is the per-seat state: the composer holding the
//! word being typed, the composing-mode flag and what the platform told us
//! about the focused text field. Each seat owns exactly one session; nothing
//! in it is shared between seats.

use crate::context::{ImeContext, InputPurpose};
use crate::engine::Composer;

/// Whether keystrokes are routed through the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys go straight to the application
    #[default]
    Direct,
    /// Keys are composed into Vietnamese words
    Composing,
}

/// IME session state for one seat.
#[derive(Debug, Clone)]
pub struct ImeSession<C> {
    /// Word being composed
    composer: C,

    /// Current input mode
    mode: InputMode,

    /// Whether a text field currently has focus
    active: bool,

    /// Purpose reported by the focused text field
    purpose: InputPurpose,
}

impl<C: Composer> ImeSession<C> {
    /// Create a new session around an empty composer.
    pub fn new(composer: C) -> Self {
        Self {
            composer,
            mode: InputMode::Direct,
            active: true,
            purpose: InputPurpose::FreeForm,
        }
    }

    /// Get the composer.
    pub fn composer(&self) -> &C {
        &self.composer
    }

    /// Get a mutable reference to the composer.
    pub fn composer_mut(&mut self) -> &mut C {
        &mut self.composer
    }

    /// Get the current input mode.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Set the input mode.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Check whether keys are being composed.
    pub fn is_composing(&self) -> bool {
        self.mode == InputMode::Composing
    }

    /// Check whether a text field has focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Purpose of the focused text field.
    pub fn purpose(&self) -> InputPurpose {
        self.purpose
    }

    /// A text field gained focus.
    ///
    /// Moving from an inactive to an active field starts a fresh word; the
    /// previous field's half-typed word must not leak into the new one.
    pub fn activate(&mut self, purpose: InputPurpose) {
        if !self.active {
            self.composer.clear();
        }
        self.active = true;
        self.purpose = purpose;
    }

    /// The text field lost focus.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Clear the word being composed. The mode is kept.
    pub fn clear(&mut self) {
        self.composer.clear();
    }

    /// Move the composed word into the context's commit text and start a new
    /// word.
    pub fn commit(&mut self, context: &mut ImeContext) {
        context.commit_text.push_str(self.composer.text());
        self.composer.clear();
        self.sync_to_context(context);
    }

    /// Sync session state to an ImeContext for platform communication.
    pub fn sync_to_context(&self, context: &mut ImeContext) {
        context.preedit_text.clear();
        context.preedit_text.push_str(self.composer.text());
        context.preedit_cursor = self.composer.cursor();
        context.composing = self.is_composing();
        context.input_purpose = self.purpose;
    }
}
