//! Engine Module
//!
//! The tone-selection state machine and the session timer.

pub mod timer;
pub mod tone;

pub use timer::{format_time, SessionTimer};
pub use tone::{
    gain_for_volume, EngineSnapshot, ToneEngine, ToneVariant, VolumeLevel, WaveformSet,
    AUDIBLE_TONES, PEAK_GAIN,
};
