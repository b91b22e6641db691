//! libtelex crate root
//!
//! This crate provides the Telex composition engine for Vietnamese: the
//! code point classifier, the accent tables, the `CompositionBuffer` that
//! turns keystrokes into accented words, and factories that plug the buffer
//! into the shared `libviet-core` session and key routing.
//!
//! Public API exported here:
//! - `CompositionBuffer` and `OnsetTag` from `buffer`
//! - `TelexConfig` from `config`
//! - `create_ime_engine` / `create_ime_engine_from_path` from `engine`

pub mod accents;
pub mod buffer;
pub mod classifier;
pub mod config;
pub mod engine;

// Re-export IME components from core
pub use libviet_core::{
    Action, ActionError, Composer, Composition, ImeContext, ImeEngine, ImeSession, InputMode,
    InputPurpose, Key, KeyEvent, KeyResult, ModeStatus, Modifiers,
};

// Convenience re-exports for common types used by callers.
pub use accents::Tone;
pub use buffer::{CompositionBuffer, OnsetTag};
pub use classifier::{is_quality_key, is_tone_key, is_vowel, placement_class, PlacementClass};
pub use config::TelexConfig;
pub use engine::{create_ime_engine, create_ime_engine_from_path, TelexEngine};
