//! IME engine with session management and key event processing.
//!
//! The `ImeEngine` wraps a `Composer` with session state, the composing
//! key bindings and the platform context, providing a `process_key()` method
//! that routes each key press to a binding, the composer, or back to the
//! application.

use std::borrow::Cow;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::action::{Action, ActionError};
use crate::binding::{BindingTable, Modifiers};
use crate::context::{ImeContext, InputPurpose};
use crate::engine::{Composer, Composition};
use crate::session::{ImeSession, InputMode};
use crate::Config;

/// Keysyms of keys that only change modifier state.
const MODIFIER_KEYSYMS: &[&str] = &[
    "Shift_L",
    "Shift_R",
    "Control_L",
    "Control_R",
    "Alt_L",
    "Alt_R",
    "Meta_L",
    "Meta_R",
    "Super_L",
    "Super_R",
    "Hyper_L",
    "Hyper_R",
    "Caps_Lock",
    "Shift_Lock",
    "Num_Lock",
    "ISO_Level3_Shift",
    "ISO_Level5_Shift",
    "Mode_switch",
];

/// What a key press produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A key producing one Unicode scalar
    Char(char),
    /// A key without text, by keysym name (`BackSpace`, `Left`, `Shift_L`)
    Named(String),
    /// Text that does not normalize to a single scalar
    Text(String),
}

/// A key press with the modifiers held at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn char(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers::empty(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            key: Key::Named(name.into()),
            modifiers: Modifiers::empty(),
        }
    }

    /// Build an event from the UTF-8 text a key press produced.
    ///
    /// The text is normalized to NFC first, so a decomposed `a` + U+0301
    /// arrives as the single scalar `á`. Returns `None` for empty text.
    pub fn from_utf8(text: &str, modifiers: Modifiers) -> Option<Self> {
        let normalized: String = text.nfc().collect();
        let mut chars = normalized.chars();
        let key = match (chars.next(), chars.next()) {
            (None, _) => return None,
            (Some(ch), None) => Key::Char(ch),
            _ => Key::Text(normalized),
        };
        Some(Self { key, modifiers })
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Code point of a single-scalar key.
    pub fn codepoint(&self) -> Option<u32> {
        match self.key {
            Key::Char(ch) => Some(ch as u32),
            _ => None,
        }
    }

    /// Text the key would insert; empty for named keys.
    pub fn utf8(&self) -> Cow<'_, str> {
        match &self.key {
            Key::Char(ch) => Cow::Owned(ch.to_string()),
            Key::Named(_) => Cow::Borrowed(""),
            Key::Text(text) => Cow::Borrowed(text),
        }
    }

    pub fn is_letter(&self) -> bool {
        matches!(self.key, Key::Char(ch) if ch.is_alphabetic())
    }

    /// Any key that is not a letter ends the word being composed.
    pub fn is_word_terminator(&self) -> bool {
        !self.is_letter()
    }

    pub fn is_modifier(&self) -> bool {
        matches!(&self.key, Key::Named(name) if MODIFIER_KEYSYMS.contains(&name.as_str()))
    }

    /// Name used for binding lookup.
    pub fn name(&self) -> Cow<'_, str> {
        match &self.key {
            Key::Char(' ') => Cow::Borrowed("space"),
            Key::Char(ch) => Cow::Owned(ch.to_string()),
            Key::Named(name) => Cow::Borrowed(name),
            Key::Text(text) => Cow::Borrowed(text),
        }
    }
}

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was handled by the IME
    Handled,
    /// Key was not handled (pass through to application)
    NotHandled,
}

/// Composing mode change, published for a status icon or notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeStatus {
    Enabled,
    Disabled,
}

/// IME engine with session management.
pub struct ImeEngine<C: Composer> {
    /// Session state
    session: ImeSession<C>,

    /// Context for platform communication
    context: ImeContext,

    /// Bindings consulted while a word is being composed
    bindings: BindingTable,

    /// Outcome of the last key fed to the composer
    last_composition: Option<Composition>,

    /// Mode change listener
    status: Option<Sender<ModeStatus>>,
}

impl<C: Composer> ImeEngine<C> {
    /// Create a new IME engine in direct mode.
    pub fn new(composer: C, bindings: BindingTable) -> Self {
        Self {
            session: ImeSession::new(composer),
            context: ImeContext::new(),
            bindings,
            last_composition: None,
            status: None,
        }
    }

    /// Create an IME engine from configuration.
    pub fn from_config(composer: C, config: &Config) -> Self {
        let mut engine = Self::new(composer, config.binding_table());
        if config.active_at_startup {
            engine.session.set_mode(InputMode::Composing);
            engine.session.sync_to_context(&mut engine.context);
        }
        engine
    }

    /// Get a reference to the context for reading IME state.
    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    /// Get a mutable reference to the context.
    pub fn context_mut(&mut self) -> &mut ImeContext {
        &mut self.context
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &ImeSession<C> {
        &self.session
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    pub fn last_composition(&self) -> Option<Composition> {
        self.last_composition
    }

    pub fn is_composing(&self) -> bool {
        self.session.is_composing()
    }

    /// Turn composing mode on or off. Turning it off commits the pending word.
    pub fn set_composing(&mut self, composing: bool) {
        self.context.commit_text.clear();
        let action = if composing {
            Action::Enable
        } else {
            Action::Disable
        };
        self.apply(action);
    }

    /// Receive mode changes on a channel.
    ///
    /// Only the most recent subscriber is notified. Sends never block; a
    /// dropped receiver simply stops the notifications.
    pub fn subscribe_status(&mut self) -> Receiver<ModeStatus> {
        let (tx, rx) = mpsc::channel();
        self.status = Some(tx);
        rx
    }

    /// Reset the IME to initial state. The mode is kept.
    pub fn reset(&mut self) {
        self.session.clear();
        self.context.clear();
        self.last_composition = None;
    }

    /// A text field gained focus.
    pub fn activate(&mut self, purpose: InputPurpose) {
        if !self.session.is_active() {
            self.context.clear();
            self.last_composition = None;
        }
        self.session.activate(purpose);
        self.context.set_input_purpose(purpose);
    }

    /// The focused text field went away; the half-typed word is dropped.
    pub fn deactivate(&mut self) {
        self.session.deactivate();
        self.reset();
    }

    /// Process a key event and update IME state.
    ///
    /// After calling this, the platform should read `context()` to update
    /// the preview and consume any commit text. Keys that come back as
    /// `KeyResult::NotHandled` must be forwarded to the application after
    /// the commit text.
    pub fn process_key(&mut self, key: KeyEvent) -> KeyResult {
        // Clear commit text from previous key
        self.context.commit_text.clear();
        self.last_composition = None;

        if self.session.is_composing() && !self.session.composer().is_empty() {
            if let Some(action) = self.bindings.lookup(&key.name(), key.modifiers) {
                self.apply(action);
                return KeyResult::Handled;
            }
        }

        if key.is_modifier() {
            return KeyResult::NotHandled;
        }

        if !self.session.is_composing()
            || !self.session.is_active()
            || !self.session.purpose().allows_composition()
        {
            return KeyResult::NotHandled;
        }

        if key.modifiers.contains(Modifiers::CTRL) || key.is_word_terminator() {
            self.commit_pending();
            return KeyResult::NotHandled;
        }

        let Key::Char(ch) = key.key else {
            return KeyResult::NotHandled;
        };

        match self.session.composer_mut().feed(ch) {
            Some(outcome) => {
                debug!(key = %ch, ?outcome, text = self.session.composer().text(), "composed");
                self.last_composition = Some(outcome);
                self.session.sync_to_context(&mut self.context);
                KeyResult::Handled
            }
            None => {
                debug!(key = %ch, "key passed through");
                KeyResult::NotHandled
            }
        }
    }

    /// Run an action by its configuration name.
    ///
    /// Unrecognized names are logged and returned as an error; the session
    /// is left untouched.
    pub fn process_action(&mut self, name: &str) -> Result<(), ActionError> {
        let action = name.parse::<Action>().map_err(|err| {
            warn!(%err, "action ignored");
            err
        })?;
        self.context.commit_text.clear();
        self.apply(action);
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        let was_composing = self.session.is_composing();
        action.apply(&mut self.session, &mut self.context);
        let composing = self.session.is_composing();
        if composing != was_composing {
            self.publish(if composing {
                ModeStatus::Enabled
            } else {
                ModeStatus::Disabled
            });
        }
    }

    /// End the current word. An empty word still resets the composer so
    /// onset state from passed-through keys does not leak into the next one.
    fn commit_pending(&mut self) {
        if self.session.composer().is_empty() {
            self.session.clear();
        } else {
            self.session.commit(&mut self.context);
        }
    }

    fn publish(&mut self, status: ModeStatus) {
        if let Some(tx) = &self.status {
            if tx.send(status).is_err() {
                info!("status listener went away");
                self.status = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::Echo;

    fn engine() -> ImeEngine<Echo> {
        let mut engine = ImeEngine::from_config(Echo::default(), &Config::default());
        engine.set_composing(true);
        engine
    }

    fn type_str(engine: &mut ImeEngine<Echo>, text: &str) {
        for ch in text.chars() {
            engine.process_key(KeyEvent::char(ch));
        }
    }

    #[test]
    fn test_key_event_accessors() {
        let a = KeyEvent::char('a');
        assert_eq!(a.codepoint(), Some(0x61));
        assert_eq!(a.utf8(), "a");
        assert!(a.is_letter());
        assert!(!a.is_word_terminator());

        let space = KeyEvent::char(' ');
        assert!(space.is_word_terminator());
        assert_eq!(space.name(), "space");

        let shift = KeyEvent::named("Shift_L");
        assert!(shift.is_modifier());
        assert_eq!(shift.utf8(), "");
        assert_eq!(shift.codepoint(), None);
        assert!(!KeyEvent::named("BackSpace").is_modifier());
    }

    #[test]
    fn test_from_utf8_normalizes() {
        let ev = KeyEvent::from_utf8("a\u{0301}", Modifiers::empty()).unwrap();
        assert_eq!(ev.key, Key::Char('á'));
        assert!(ev.is_letter());

        let ev = KeyEvent::from_utf8("ab", Modifiers::SHIFT).unwrap();
        assert_eq!(ev.key, Key::Text("ab".to_string()));
        assert!(ev.is_word_terminator());
        assert!(KeyEvent::from_utf8("", Modifiers::empty()).is_none());
    }

    #[test]
    fn test_direct_mode_passes_everything_through() {
        let mut engine = ImeEngine::new(Echo::default(), BindingTable::new());
        assert_eq!(engine.process_key(KeyEvent::char('a')), KeyResult::NotHandled);
        assert_eq!(engine.context().preedit_text, "");
    }

    #[test]
    fn test_letters_compose_and_terminator_commits() {
        let mut engine = engine();
        assert_eq!(engine.process_key(KeyEvent::char('x')), KeyResult::Handled);
        assert_eq!(engine.last_composition(), Some(Composition::Literal));
        type_str(&mut engine, "in");
        assert_eq!(engine.context().preedit_text, "xin");
        assert_eq!(engine.context().preedit_cursor, 3);

        assert_eq!(engine.process_key(KeyEvent::char(' ')), KeyResult::NotHandled);
        assert_eq!(engine.context().commit_text, "xin");
        assert_eq!(engine.context().preedit_text, "");

        // The next key starts with a clean commit slot
        engine.process_key(KeyEvent::char('a'));
        assert_eq!(engine.context().commit_text, "");
    }

    #[test]
    fn test_bindings_only_apply_while_word_pending() {
        let mut engine = engine();
        assert_eq!(
            engine.process_key(KeyEvent::named("BackSpace")),
            KeyResult::NotHandled
        );

        type_str(&mut engine, "ab");
        assert_eq!(engine.process_key(KeyEvent::named("BackSpace")), KeyResult::Handled);
        assert_eq!(engine.context().preedit_text, "a");

        assert_eq!(engine.process_key(KeyEvent::named("Return")), KeyResult::Handled);
        assert_eq!(engine.context().commit_text, "a");
    }

    #[test]
    fn test_modifier_keys_and_ctrl_chords() {
        let mut engine = engine();
        type_str(&mut engine, "ha");
        assert_eq!(engine.process_key(KeyEvent::named("Control_L")), KeyResult::NotHandled);
        assert_eq!(engine.context().preedit_text, "ha");

        let ctrl_c = KeyEvent::char('c').with_modifiers(Modifiers::CTRL);
        assert_eq!(engine.process_key(ctrl_c), KeyResult::NotHandled);
        assert_eq!(engine.context().commit_text, "ha");
        assert!(engine.session().composer().is_empty());
    }

    #[test]
    fn test_password_fields_bypass_composition() {
        let mut engine = engine();
        engine.activate(InputPurpose::Password);
        assert_eq!(engine.process_key(KeyEvent::char('a')), KeyResult::NotHandled);
        assert_eq!(engine.context().input_purpose, InputPurpose::Password);

        engine.activate(InputPurpose::FreeForm);
        assert_eq!(engine.process_key(KeyEvent::char('a')), KeyResult::Handled);
    }

    #[test]
    fn test_deactivate_drops_word() {
        let mut engine = engine();
        type_str(&mut engine, "mo");
        engine.deactivate();
        assert_eq!(engine.process_key(KeyEvent::char('t')), KeyResult::NotHandled);

        engine.activate(InputPurpose::FreeForm);
        engine.process_key(KeyEvent::char('t'));
        assert_eq!(engine.context().preedit_text, "t");
    }

    #[test]
    fn test_process_action() {
        let mut engine = engine();
        type_str(&mut engine, "ok");
        assert!(engine.process_action("discard").is_ok());
        assert!(engine.session().composer().is_empty());

        type_str(&mut engine, "ok");
        let err = engine.process_action("frobnicate").unwrap_err();
        assert_eq!(err, ActionError::Unrecognized("frobnicate".to_string()));
        assert_eq!(engine.context().preedit_text, "ok");
    }

    #[test]
    fn test_status_channel_reports_mode_changes() {
        let mut engine = ImeEngine::new(Echo::default(), BindingTable::new());
        let rx = engine.subscribe_status();

        engine.process_action("toggle").unwrap();
        engine.process_action("enable").unwrap();
        engine.process_action("disable").unwrap();

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(seen, [ModeStatus::Enabled, ModeStatus::Disabled]);

        drop(rx);
        engine.process_action("toggle").unwrap();
        assert!(engine.is_composing());
    }

    #[test]
    fn test_active_at_startup() {
        let config = Config {
            active_at_startup: true,
            ..Config::default()
        };
        let engine = ImeEngine::from_config(Echo::default(), &config);
        assert!(engine.is_composing());
        assert!(engine.context().composing);
        assert_eq!(engine.bindings().len(), 6);
    }
}
