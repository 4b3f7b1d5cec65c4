//! Silentium - Ambient Tone Engine
//!
//! Silentium generates sustained meditation tones: a single carrier
//! frequency (432, 528 or 639 Hz) shaped by a selectable waveform, with a
//! live volume control and a count-up session timer.
//!
//! # Architecture
//!
//! The crate splits into two halves:
//! - `engine`: the tone-selection state machine ([`ToneEngine`]) and the
//!   session timer. Pure state transitions; every side effect goes through
//!   the backend seam.
//! - `audio`: the [`AudioBackend`] seam and its implementations (live cpal
//!   device, inert null device, recording mock), the oscillator that
//!   synthesizes the four waveform shapes, and the offline WAV renderer.
//!
//! A host (the bundled CLI, or any UI shell) forwards user intents to the
//! engine and re-renders from [`EngineSnapshot`] after each operation.

pub mod audio;
pub mod cli;
pub mod engine;
pub mod error;

pub use audio::{AudioBackend, CpalBackend, MockBackend, NullBackend, Waveform};
pub use engine::{EngineSnapshot, SessionTimer, ToneEngine, ToneVariant, VolumeLevel};
pub use error::{Result, SilentiumError};
