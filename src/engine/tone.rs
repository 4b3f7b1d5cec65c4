//! Tone selection engine.
//!
//! Owns the audio-graph lifecycle for the single ambient tone: which
//! carrier frequency is selected, which waveform shape drives it, which
//! shapes are selectable at all, and how loud the output is. All state
//! transitions are synchronous; the only side effects are calls through the
//! [`AudioBackend`] seam.
//!
//! Lifecycle rules:
//! - At most one oscillator voice is ever live. Changing frequency or shape
//!   replaces the voice (stop, then start a fresh one); voices are never
//!   mutated in place.
//! - A tone can only sound while its shape is a member of the enabled set.
//!   Selections that violate this fall back to silence.
//! - A backend that reports unavailable keeps the engine silent and inert;
//!   no operation fails because of it.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::audio::backend::{AudioBackend, OscillatorId};
use crate::audio::oscillator::{Waveform, CANONICAL_WAVEFORMS};
use crate::engine::timer::SessionTimer;
use crate::error::{Result, SilentiumError};

// ============================================================================
// Volume mapping
// ============================================================================

/// Device gain at full volume.
///
/// Normalized volume maps linearly onto [0, `PEAK_GAIN`]. The raw
/// oscillator is far too loud for an ambient tone, so full volume sits at a
/// small linear gain; the Low/Medium/High presets land at 0.0005, 0.001 and
/// 0.002 respectively.
pub const PEAK_GAIN: f32 = 0.002;

/// Map a normalized volume in [0, 1] to the linear device gain.
pub fn gain_for_volume(volume: f32) -> f32 {
    volume.clamp(0.0, 1.0) * PEAK_GAIN
}

/// Preset volume steps offered by the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLevel {
    Low,
    Medium,
    High,
}

impl VolumeLevel {
    /// The normalized volume this preset maps to.
    pub fn normalized(&self) -> f32 {
        match self {
            VolumeLevel::Low => 0.25,
            VolumeLevel::Medium => 0.5,
            VolumeLevel::High => 1.0,
        }
    }
}

impl FromStr for VolumeLevel {
    type Err = SilentiumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(VolumeLevel::Low),
            "medium" => Ok(VolumeLevel::Medium),
            "high" => Ok(VolumeLevel::High),
            other => Err(SilentiumError::InvalidVolume {
                value: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Tone variants
// ============================================================================

/// The selectable carrier frequencies, including the silent option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneVariant {
    /// No tone; the engine is silent
    #[default]
    None,
    #[serde(rename = "432")]
    Hz432,
    #[serde(rename = "528")]
    Hz528,
    #[serde(rename = "639")]
    Hz639,
}

/// The audible variants, in presentation order.
pub const AUDIBLE_TONES: [ToneVariant; 3] =
    [ToneVariant::Hz432, ToneVariant::Hz528, ToneVariant::Hz639];

impl ToneVariant {
    /// Carrier frequency in Hz; `None` for the silent variant.
    pub fn frequency_hz(&self) -> Option<f32> {
        match self {
            ToneVariant::None => None,
            ToneVariant::Hz432 => Some(432.0),
            ToneVariant::Hz528 => Some(528.0),
            ToneVariant::Hz639 => Some(639.0),
        }
    }

    /// Look up a variant by its whole frequency.
    pub fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            432 => Some(ToneVariant::Hz432),
            528 => Some(ToneVariant::Hz528),
            639 => Some(ToneVariant::Hz639),
            _ => None,
        }
    }

    /// Short display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ToneVariant::None => "No Frequency",
            ToneVariant::Hz432 => "Natural Freq",
            ToneVariant::Hz528 => "Healing Freq",
            ToneVariant::Hz639 => "Heart Freq",
        }
    }

    /// One-line description shown while the tone plays
    pub fn description(&self) -> Option<&'static str> {
        match self {
            ToneVariant::None => None,
            ToneVariant::Hz432 => {
                Some("Harmonizes with the natural vibration of the universe")
            }
            ToneVariant::Hz528 => Some("Known for its regenerative properties"),
            ToneVariant::Hz639 => Some("Promotes connection and harmony"),
        }
    }
}

impl fmt::Display for ToneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency_hz() {
            Some(hz) => write!(f, "{}Hz", hz as u32),
            None => write!(f, "None"),
        }
    }
}

// ============================================================================
// Enabled-waveform set
// ============================================================================

/// The set of waveform shapes currently offered for selection.
///
/// Iteration always follows the canonical shape order, which is what makes
/// the disable-fallback deterministic. The set may become empty; nothing
/// enforces a minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformSet {
    enabled: [bool; 4],
}

impl Default for WaveformSet {
    /// All four shapes enabled.
    fn default() -> Self {
        WaveformSet {
            enabled: [true; 4],
        }
    }
}

impl WaveformSet {
    /// Set with every shape enabled.
    pub fn all() -> Self {
        WaveformSet::default()
    }

    /// Whether `shape` is currently enabled
    pub fn contains(&self, shape: Waveform) -> bool {
        self.enabled[shape.canonical_index()]
    }

    /// Enable `shape`
    pub fn insert(&mut self, shape: Waveform) {
        self.enabled[shape.canonical_index()] = true;
    }

    /// Disable `shape`
    pub fn remove(&mut self, shape: Waveform) {
        self.enabled[shape.canonical_index()] = false;
    }

    /// First enabled shape in canonical order, if any
    pub fn first(&self) -> Option<Waveform> {
        CANONICAL_WAVEFORMS.into_iter().find(|w| self.contains(*w))
    }

    /// Enabled shapes in canonical order
    pub fn iter(&self) -> impl Iterator<Item = Waveform> + '_ {
        CANONICAL_WAVEFORMS.into_iter().filter(|w| self.contains(*w))
    }

    /// Number of enabled shapes
    pub fn len(&self) -> usize {
        self.enabled.iter().filter(|e| **e).count()
    }

    /// Whether no shape is enabled
    pub fn is_empty(&self) -> bool {
        !self.enabled.iter().any(|e| *e)
    }
}

// ============================================================================
// Engine snapshot
// ============================================================================

/// Serializable view of the engine state, for hosts to re-render from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub tone: ToneVariant,
    pub waveform: Option<Waveform>,
    pub enabled_waveforms: Vec<Waveform>,
    pub volume: f32,
    pub is_timer_active: bool,
    pub elapsed_seconds: u64,
    pub formatted_time: String,
}

impl EngineSnapshot {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Tone Engine
// ============================================================================

/// The tone engine: selection state plus the live audio-graph handle.
///
/// Generic over the backend so transition logic runs against
/// [`MockBackend`](crate::audio::MockBackend) in tests and against
/// [`CpalBackend`](crate::audio::CpalBackend) in a real host.
///
/// # Example
/// ```
/// use silentium::audio::MockBackend;
/// use silentium::engine::{ToneEngine, ToneVariant};
///
/// let mut engine = ToneEngine::new(MockBackend::new());
/// engine.select_tone(ToneVariant::Hz432);
/// assert_eq!(engine.tone(), ToneVariant::Hz432);
/// engine.select_tone(ToneVariant::None);
/// assert_eq!(engine.tone(), ToneVariant::None);
/// ```
#[derive(Debug)]
pub struct ToneEngine<B: AudioBackend> {
    backend: B,
    tone: ToneVariant,
    /// Selected shape; `None` only when every shape has been disabled
    waveform: Option<Waveform>,
    enabled: WaveformSet,
    /// Normalized volume in [0, 1]
    volume: f32,
    /// Handle of the live voice, if one is sounding
    active: Option<OscillatorId>,
    timer: SessionTimer,
}

impl<B: AudioBackend> ToneEngine<B> {
    /// Create an engine over the given backend.
    ///
    /// Starts silent: no tone, sine selected, all shapes enabled, volume at
    /// the low preset. The initial gain is pushed to the backend right away
    /// so the shared gain control never disagrees with engine state.
    pub fn new(backend: B) -> Self {
        let mut engine = ToneEngine {
            backend,
            tone: ToneVariant::None,
            waveform: Some(Waveform::Sine),
            enabled: WaveformSet::all(),
            volume: VolumeLevel::Low.normalized(),
            active: None,
            timer: SessionTimer::new(),
        };
        if engine.backend.is_available() {
            engine.backend.set_gain(gain_for_volume(engine.volume));
        }
        engine
    }

    // ========================================================================
    // State queries
    // ========================================================================

    /// Currently selected tone
    pub fn tone(&self) -> ToneVariant {
        self.tone
    }

    /// Currently selected waveform shape, if any shape is enabled
    pub fn waveform(&self) -> Option<Waveform> {
        self.waveform
    }

    /// The enabled-shape set
    pub fn enabled_waveforms(&self) -> &WaveformSet {
        &self.enabled
    }

    /// Normalized volume in [0, 1]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether a voice is currently sounding
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Seconds elapsed on the session timer
    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    /// Whether the session timer is counting
    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// The backend, for hosts that need device details
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the full state for re-rendering.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            tone: self.tone,
            waveform: self.waveform,
            enabled_waveforms: self.enabled.iter().collect(),
            volume: self.volume,
            is_timer_active: self.timer.is_active(),
            elapsed_seconds: self.timer.elapsed_seconds(),
            formatted_time: self.timer.formatted(),
        }
    }

    // ========================================================================
    // Volume
    // ========================================================================

    /// Set the normalized volume.
    ///
    /// Clamped to [0, 1]. The mapped gain is applied immediately, so a
    /// playing tone changes loudness without being rebuilt.
    pub fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
        if self.backend.is_available() {
            self.backend.set_gain(gain_for_volume(self.volume));
        }
        debug!("volume set to {:.3}", self.volume);
    }

    /// Set the volume from a preset step.
    pub fn set_volume_level(&mut self, level: VolumeLevel) {
        self.set_volume(level.normalized());
    }

    // ========================================================================
    // Tone selection
    // ========================================================================

    /// Select a tone, replacing whatever is currently sounding.
    ///
    /// The previous voice is always stopped first. The engine falls back to
    /// silence when the silent variant is chosen, when the selected shape is
    /// disabled (or no shape is selected), or when the device is
    /// unavailable.
    pub fn select_tone(&mut self, variant: ToneVariant) {
        self.stop_active_voice();

        let shape = match self.waveform {
            Some(w) if self.enabled.contains(w) => w,
            _ => {
                self.tone = ToneVariant::None;
                return;
            }
        };

        let frequency_hz = match variant.frequency_hz() {
            Some(hz) => hz,
            None => {
                self.tone = ToneVariant::None;
                return;
            }
        };

        if !self.backend.is_available() {
            self.tone = ToneVariant::None;
            return;
        }

        match self
            .backend
            .start_oscillator(shape, frequency_hz, gain_for_volume(self.volume))
        {
            Ok(id) => {
                self.active = Some(id);
                self.tone = variant;
                debug!("tone started: {} as {}", variant, shape);
            }
            Err(e) => {
                warn!("failed to start tone {}: {}", variant, e);
                self.tone = ToneVariant::None;
            }
        }
    }

    /// Select a waveform shape.
    ///
    /// No-op for disabled shapes. If a tone is playing, its voice is
    /// rebuilt with the new shape at the same frequency.
    pub fn select_waveform(&mut self, shape: Waveform) {
        if !self.enabled.contains(shape) {
            return;
        }
        self.waveform = Some(shape);
        debug!("waveform selected: {}", shape);
        if self.tone != ToneVariant::None {
            self.select_tone(self.tone);
        }
    }

    /// Flip whether a shape is offered for selection.
    ///
    /// Disabling the currently selected shape reselects the first remaining
    /// enabled shape in canonical order (or clears the selection if none
    /// remain); a tone playing at that moment is silenced immediately, since
    /// its shape is no longer offered. Enabling a shape never affects
    /// playback.
    pub fn toggle_waveform(&mut self, shape: Waveform) {
        if self.enabled.contains(shape) {
            self.enabled.remove(shape);
            debug!("waveform disabled: {}", shape);
            if self.waveform == Some(shape) {
                self.waveform = self.enabled.first();
                if self.tone != ToneVariant::None {
                    self.stop_active_voice();
                    self.tone = ToneVariant::None;
                }
            }
        } else {
            self.enabled.insert(shape);
            debug!("waveform enabled: {}", shape);
        }
    }

    fn stop_active_voice(&mut self) {
        if let Some(id) = self.active.take() {
            self.backend.stop_oscillator(id);
        }
    }

    // ========================================================================
    // Session timer
    // ========================================================================

    /// Start (or resume) the session timer.
    pub fn start_timer(&mut self) {
        self.timer.start();
    }

    /// Pause the session timer, preserving the elapsed value.
    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    /// Reset the session timer to zero and stop it.
    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// Advance the session timer by one second, if active.
    ///
    /// The host calls this once per real-time second.
    pub fn tick(&mut self) {
        self.timer.tick();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
