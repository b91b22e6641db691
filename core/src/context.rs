//! IME context for platform communication.
//!
//! The `ImeContext` struct is a simple data container with public fields that
//! platforms use to communicate with the IME. After calling `process_key()` or
//! `process_action()`, the platform reads these fields to update the preview
//! shown in the text field and to commit finished words.
//!
//! Design philosophy: Zero abstraction - just data transfer. No callbacks, no
//! traits, no generics. Platform code reads/writes fields directly.

use serde::{Deserialize, Serialize};

/// Input purpose hint reported by the focused text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputPurpose {
    /// Free-form text input (default)
    #[default]
    FreeForm,
    /// Email address
    Email,
    /// URL
    Url,
    /// Password (keys are never composed)
    Password,
    /// PIN entry (keys are never composed)
    Pin,
    /// Number input (keys are never composed)
    Number,
    /// Phone number (keys are never composed)
    Phone,
    /// Terminal/command line
    Terminal,
}

impl InputPurpose {
    /// Whether Vietnamese composition makes sense for this field.
    pub fn allows_composition(self) -> bool {
        !matches!(
            self,
            InputPurpose::Password | InputPurpose::Pin | InputPurpose::Number | InputPurpose::Phone
        )
    }
}

/// IME context for platform communication.
///
/// # Fields
///
/// - `preedit_text`: Word being composed (displayed in place, underlined)
/// - `preedit_cursor`: Cursor position within preedit (byte offset)
/// - `commit_text`: Text to commit to application (consume and clear)
/// - `composing`: Snapshot of the composing-mode flag
/// - `input_purpose`: Hint about what kind of input is expected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImeContext {
    /// Word being composed
    pub preedit_text: String,

    /// Cursor position within preedit text (byte offset)
    pub preedit_cursor: usize,

    /// Text to commit to the application
    pub commit_text: String,

    /// Whether keystrokes are currently routed through the composer
    pub composing: bool,

    /// Input purpose hint for context-aware behavior
    pub input_purpose: InputPurpose,
}

impl ImeContext {
    /// Create a new empty IME context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the preview.
    /// Does NOT clear commit_text (platform should consume it first).
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.preedit_cursor = 0;
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Check if there's a visible preview.
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty()
    }

    /// Check if there's text to commit.
    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    /// Set the input purpose.
    pub fn set_input_purpose(&mut self, purpose: InputPurpose) {
        self.input_purpose = purpose;
    }
}
