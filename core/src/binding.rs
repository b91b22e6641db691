//! Key bindings for actions while a word is being composed.
//!
//! Bindings are written as `Mod+Mod+Key` strings (e.g. `Ctrl+BackSpace`),
//! using X keysym names for the key. The table is kept sorted by key and
//! modifier mask so a key press is resolved with one binary search.

use std::cmp::Ordering;

use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::action::{Action, ActionError};

bitflags! {
    /// Keyboard modifier flags, in xkb modifier order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const LOCK  = 1 << 1;
        const CTRL  = 1 << 2;
        const ALT   = 1 << 3;
        const NUM   = 1 << 4;
        const MOD3  = 1 << 5;
        const LOGO  = 1 << 6;
        const MOD5  = 1 << 7;
    }
}

impl Modifiers {
    /// Parse one modifier name as written in binding strings.
    pub fn from_binding_name(name: &str) -> Option<Self> {
        match name {
            "Shift" => Some(Modifiers::SHIFT),
            "Lock" => Some(Modifiers::LOCK),
            "Ctrl" | "Control" => Some(Modifiers::CTRL),
            "Mod1" | "Alt" => Some(Modifiers::ALT),
            "Mod2" => Some(Modifiers::NUM),
            "Mod3" => Some(Modifiers::MOD3),
            "Mod4" => Some(Modifiers::LOGO),
            "Mod5" => Some(Modifiers::MOD5),
            _ => None,
        }
    }

    /// Drop lock-style modifiers that never take part in binding lookup.
    pub fn relevant(self) -> Self {
        self - (Modifiers::LOCK | Modifiers::NUM)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("invalid binding '{0}'")]
    InvalidSyntax(String),
    #[error("invalid modifier '{0}'")]
    InvalidModifier(String),
    #[error(transparent)]
    Action(#[from] ActionError),
}

static BINDING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:[A-Za-z][A-Za-z0-9]*\+)*)([A-Za-z0-9_]+)$").expect("binding pattern is valid")
});

/// One `key + modifiers → action` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Lowercased keysym name (`backspace`, `left`, `a`)
    pub key: String,
    pub modifiers: Modifiers,
    pub action: Action,
}

impl Binding {
    /// Parse a binding string and action name.
    ///
    /// ```
    /// # use libviet_core::binding::{Binding, Modifiers};
    /// # use libviet_core::Action;
    /// let b = Binding::parse("Ctrl+BackSpace", "delete-left").unwrap();
    /// assert_eq!(b.key, "backspace");
    /// assert_eq!(b.modifiers, Modifiers::CTRL);
    /// assert_eq!(b.action, Action::DeleteLeft);
    /// ```
    pub fn parse(combo: &str, action: &str) -> Result<Self, BindingError> {
        let caps = BINDING_RE
            .captures(combo.trim())
            .ok_or_else(|| BindingError::InvalidSyntax(combo.to_string()))?;

        let mut modifiers = Modifiers::empty();
        for name in caps[1].split('+').filter(|s| !s.is_empty()) {
            modifiers |= Modifiers::from_binding_name(name)
                .ok_or_else(|| BindingError::InvalidModifier(name.to_string()))?;
        }

        Ok(Self {
            key: caps[2].to_lowercase(),
            modifiers,
            action: action.parse()?,
        })
    }

    fn cmp_key(&self, key: &str, modifiers: Modifiers) -> Ordering {
        self.key
            .as_str()
            .cmp(key)
            .then(self.modifiers.bits().cmp(&modifiers.bits()))
    }
}

/// Sorted binding table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    bindings: Vec<Binding>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(combo, action)` pairs.
    ///
    /// Invalid entries are logged and skipped; a bad line in a config file
    /// must not take the other bindings down with it.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Self::new();
        for (combo, action) in pairs {
            match Binding::parse(combo, action) {
                Ok(binding) => table.insert(binding),
                Err(err) => warn!(binding = combo, %err, "binding ignored"),
            }
        }
        table
    }

    /// Insert a binding, replacing any binding for the same key and modifiers.
    pub fn insert(&mut self, binding: Binding) {
        match self
            .bindings
            .binary_search_by(|b| b.cmp_key(&binding.key, binding.modifiers))
        {
            Ok(i) => self.bindings[i] = binding,
            Err(i) => self.bindings.insert(i, binding),
        }
    }

    /// Find the action bound to a key press.
    pub fn lookup(&self, key: &str, modifiers: Modifiers) -> Option<Action> {
        let key = key.to_lowercase();
        let modifiers = modifiers.relevant();
        self.bindings
            .binary_search_by(|b| b.cmp_key(&key, modifiers))
            .ok()
            .map(|i| self.bindings[i].action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }
}
