//! Audio Module
//!
//! Everything that touches samples or the output device:
//! - Waveform shapes and the band-limited oscillator
//! - The `AudioBackend` seam and its implementations
//! - Offline tone rendering to WAV

pub mod backend;
pub mod device;
pub mod oscillator;
pub mod render;

pub use backend::{AudioBackend, MockBackend, MockVoice, NullBackend, OscillatorId};
pub use device::CpalBackend;
pub use oscillator::{Oscillator, Waveform, CANONICAL_WAVEFORMS};
pub use render::{render_tone, RenderFormat};
