use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Telex-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libviet_core::Config` (flattened via serde)
/// - Telex composition switches
///
/// # Example
///
/// ```rust
/// use libtelex::TelexConfig;
///
/// let config = TelexConfig::from_toml_str("double_d = false\n").unwrap();
/// assert!(!config.double_d);
/// assert!(config.undo_on_repeat);
/// assert_eq!(config.base().composing_bindings.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelexConfig {
    /// Base configuration fields (startup mode, composing bindings)
    #[serde(flatten)]
    pub base: libviet_core::Config,

    /// `dd` → `đ`
    pub double_d: bool,

    /// Pressing the last mark key again removes the mark (`a s s` → `as`)
    pub undo_on_repeat: bool,
}

impl Default for TelexConfig {
    fn default() -> Self {
        Self {
            base: libviet_core::Config::default(),
            double_d: true,
            undo_on_repeat: true,
        }
    }
}

impl TelexConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Load the file at `path`, or the defaults when it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_toml(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libviet_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libviet_core::Config {
        &mut self.base
    }

    pub fn into_base(self) -> libviet_core::Config {
        self.base
    }
}
