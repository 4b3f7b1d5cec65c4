//! The audio device seam.
//!
//! [`AudioBackend`] captures the only capabilities the engine needs from the
//! host platform: an availability probe, a live-settable shared gain, and
//! start-once/stop-once oscillator voices identified by opaque handles.
//! [`CpalBackend`](crate::audio::CpalBackend) implements it against the real
//! output device; [`NullBackend`] stands in when no device exists; and
//! [`MockBackend`] records every graph operation for the test suite.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audio::oscillator::Waveform;
use crate::error::{Result, SilentiumError};

/// Opaque handle for a live oscillator voice.
///
/// A voice is started once and stopped once; after stopping, its handle is
/// dead and a fresh voice gets a fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OscillatorId(Uuid);

impl OscillatorId {
    pub(crate) fn new() -> Self {
        OscillatorId(Uuid::new_v4())
    }
}

/// Host audio capabilities consumed by the engine.
pub trait AudioBackend {
    /// Whether an output device was successfully opened.
    ///
    /// A backend that reports `false` here does so for the whole session;
    /// the engine treats it as a permanently silent sink.
    fn is_available(&self) -> bool;

    /// Set the shared output gain (linear, [0, 1] after volume mapping).
    ///
    /// Applies immediately to the live voice as well, so a playing tone
    /// changes loudness without being rebuilt.
    fn set_gain(&mut self, gain: f32);

    /// Start a new oscillator voice.
    ///
    /// The previous voice, if any, must already have been stopped by the
    /// caller; backends may assume at most one voice is live.
    fn start_oscillator(
        &mut self,
        waveform: Waveform,
        frequency_hz: f32,
        gain: f32,
    ) -> Result<OscillatorId>;

    /// Stop and discard a voice. Unknown or stale handles are ignored.
    fn stop_oscillator(&mut self, id: OscillatorId);
}

// ============================================================================
// Null Backend
// ============================================================================

/// Backend for hosts without an audio device.
///
/// Reports unavailable forever; every operation is inert. The engine checks
/// availability before starting voices, so `start_oscillator` is never
/// reached in normal use and fails defensively if it is.
#[derive(Debug, Default)]
pub struct NullBackend;

impl NullBackend {
    pub fn new() -> Self {
        NullBackend
    }
}

impl AudioBackend for NullBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn set_gain(&mut self, _gain: f32) {}

    fn start_oscillator(
        &mut self,
        _waveform: Waveform,
        _frequency_hz: f32,
        _gain: f32,
    ) -> Result<OscillatorId> {
        Err(SilentiumError::DeviceUnavailable)
    }

    fn stop_oscillator(&mut self, _id: OscillatorId) {}
}

// ============================================================================
// Mock Backend
// ============================================================================

/// A voice as recorded by [`MockBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockVoice {
    pub id: OscillatorId,
    pub waveform: Waveform,
    pub frequency_hz: f32,
    pub gain: f32,
}

/// In-memory backend that records graph operations instead of making sound.
///
/// Used by the test suite to observe what the engine does to the audio
/// graph: which voices were started with which parameters, which were
/// stopped, and what the shared gain is.
#[derive(Debug, Default)]
pub struct MockBackend {
    live: Vec<MockVoice>,
    shared_gain: f32,
    started: usize,
    stopped: usize,
}

impl MockBackend {
    pub fn new() -> Self {
        MockBackend::default()
    }

    /// Voices currently live (the engine should never let this exceed one).
    pub fn live_voices(&self) -> &[MockVoice] {
        &self.live
    }

    /// The single live voice, if any.
    pub fn live_voice(&self) -> Option<&MockVoice> {
        self.live.first()
    }

    /// Current shared gain value.
    pub fn shared_gain(&self) -> f32 {
        self.shared_gain
    }

    /// Total voices started over the backend's lifetime.
    pub fn started_count(&self) -> usize {
        self.started
    }

    /// Total voices stopped over the backend's lifetime.
    pub fn stopped_count(&self) -> usize {
        self.stopped
    }
}

impl AudioBackend for MockBackend {
    fn is_available(&self) -> bool {
        true
    }

    fn set_gain(&mut self, gain: f32) {
        self.shared_gain = gain;
        for voice in &mut self.live {
            voice.gain = gain;
        }
    }

    fn start_oscillator(
        &mut self,
        waveform: Waveform,
        frequency_hz: f32,
        gain: f32,
    ) -> Result<OscillatorId> {
        let id = OscillatorId::new();
        self.live.push(MockVoice {
            id,
            waveform,
            frequency_hz,
            gain,
        });
        self.started += 1;
        Ok(id)
    }

    fn stop_oscillator(&mut self, id: OscillatorId) {
        let before = self.live.len();
        self.live.retain(|v| v.id != id);
        if self.live.len() < before {
            self.stopped += 1;
        }
    }
}
