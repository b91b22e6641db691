//! Telex input method engine
//!
//! Factories that wire a `CompositionBuffer` into the generic
//! `libviet_core::ImeEngine`, configured from a `TelexConfig`.

use std::path::Path;

use anyhow::Context;
use libviet_core::ImeEngine;
use tracing::info;

use crate::buffer::CompositionBuffer;
use crate::config::TelexConfig;

/// The engine type platforms drive.
pub type TelexEngine = ImeEngine<CompositionBuffer>;

/// Create an IME engine from configuration.
///
/// # Example
///
/// ```
/// use libtelex::{create_ime_engine, KeyEvent, TelexConfig};
///
/// let mut engine = create_ime_engine(&TelexConfig::default());
/// engine.set_composing(true);
/// for ch in "vieetj".chars() {
///     engine.process_key(KeyEvent::char(ch));
/// }
/// // `v` went straight to the application
/// assert_eq!(engine.context().preedit_text, "iệt");
/// ```
pub fn create_ime_engine(config: &TelexConfig) -> TelexEngine {
    ImeEngine::from_config(CompositionBuffer::with_config(config), &config.base)
}

/// Create an IME engine from a TOML file. A missing file gives the defaults.
pub fn create_ime_engine_from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<TelexEngine> {
    let path = path.as_ref();
    let config = TelexConfig::load_or_default(path)
        .with_context(|| format!("loading {}", path.display()))?;
    info!(path = %path.display(), "engine configured");
    Ok(create_ime_engine(&config))
}
