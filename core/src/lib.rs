//! libviet-core
//!
//! Language-agnostic input method plumbing shared by the Vietnamese
//! composition crates (libtelex).
//!
//! Public API:
//! - `Composer` - Trait a composition engine implements
//! - `ImeEngine` - Key event routing over one seat's session
//! - `ImeSession` / `ImeContext` - Per-seat state and platform data transfer
//! - `Action` - Named state transitions triggered by bindings or controllers
//! - `BindingTable` - Sorted composing key bindings
//! - `Config` - Configuration loaded from TOML
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub mod engine;
pub use engine::{Composer, Composition};

pub mod input_buffer;
pub use input_buffer::InputBuffer;

pub mod context;
pub use context::{ImeContext, InputPurpose};

pub mod session;
pub use session::{ImeSession, InputMode};

pub mod action;
pub use action::{Action, ActionError};

pub mod binding;
pub use binding::{Binding, BindingError, BindingTable, Modifiers};

pub mod ime_engine;
pub use ime_engine::{ImeEngine, Key, KeyEvent, KeyResult, ModeStatus};

/// Directory name used under the user's configuration directory.
pub const CONFIG_DIR: &str = "libtelex";

/// Generic configuration for IME core functionality.
///
/// Composition options (double-d, undo on repeat) belong in `TelexConfig`
/// in the libtelex crate, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Start in composing mode instead of direct mode
    pub active_at_startup: bool,

    /// Bindings active while a word is pending, binding string → action name
    /// (e.g. `"Ctrl+BackSpace" = "discard"`)
    pub composing_bindings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let composing_bindings = [
            ("BackSpace", "delete-left"),
            ("Delete", "delete-right"),
            ("Left", "move-left"),
            ("Right", "move-right"),
            ("Return", "accept"),
            ("Escape", "discard"),
        ]
        .into_iter()
        .map(|(combo, action)| (combo.to_string(), action.to_string()))
        .collect();

        Self {
            active_at_startup: false,
            composing_bindings,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// `$XDG_CONFIG_HOME/libtelex/config.toml`, falling back to
    /// `$HOME/.config/libtelex/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        config_path_from(
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            std::env::var_os("HOME").map(PathBuf::from),
        )
    }

    /// Load the file at `path`, or the defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_toml(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse the composing bindings. Invalid entries are logged and skipped.
    pub fn binding_table(&self) -> BindingTable {
        BindingTable::from_pairs(
            self.composing_bindings
                .iter()
                .map(|(combo, action)| (combo.as_str(), action.as_str())),
        )
    }
}

fn config_path_from(xdg: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = match xdg.filter(|p| p.is_absolute()) {
        Some(dir) => dir,
        None => home?.join(".config"),
    };
    Some(base.join(CONFIG_DIR).join("config.toml"))
}
