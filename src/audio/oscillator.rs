//! Waveform shapes and the sample-level oscillator.
//!
//! The oscillator is a plain phase accumulator. Square and sawtooth get a
//! PolyBLEP correction at their discontinuities so the rendered tone stays
//! free of aliasing buzz at the carrier frequencies used here.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SilentiumError;

/// Supported waveform shapes.
///
/// The declaration order is the canonical order used everywhere a "first
/// available shape" has to be picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// All shapes, in canonical order.
pub const CANONICAL_WAVEFORMS: [Waveform; 4] = [
    Waveform::Sine,
    Waveform::Square,
    Waveform::Triangle,
    Waveform::Sawtooth,
];

impl Waveform {
    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Triangle => "Triangle",
            Waveform::Sawtooth => "Sawtooth",
        }
    }

    /// Index of this shape within the canonical order
    pub fn canonical_index(&self) -> usize {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Triangle => 2,
            Waveform::Sawtooth => 3,
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Waveform {
    type Err = SilentiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "triangle" => Ok(Waveform::Triangle),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            other => Err(SilentiumError::UnknownWaveform {
                name: other.to_string(),
            }),
        }
    }
}

/// A band-limited oscillator producing one of the four shapes at a fixed
/// frequency.
///
/// Phase runs in [0, 1). Output samples are in [-1, 1] (the PolyBLEP
/// correction can overshoot slightly at the discontinuities).
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    frequency_hz: f32,
    sample_rate: f32,
    phase: f32,
}

impl Oscillator {
    /// Create an oscillator for the given shape and frequency.
    ///
    /// # Arguments
    /// * `waveform` - Shape to generate
    /// * `frequency_hz` - Carrier frequency in Hz
    /// * `sample_rate` - Output sample rate in Hz
    pub fn new(waveform: Waveform, frequency_hz: f32, sample_rate: f32) -> Self {
        Oscillator {
            waveform,
            frequency_hz,
            sample_rate,
            phase: 0.0,
        }
    }

    /// The shape this oscillator generates
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// The carrier frequency in Hz
    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// Phase increment per sample
    fn phase_inc(&self) -> f32 {
        self.frequency_hz / self.sample_rate
    }

    /// Generate the next sample and advance the phase.
    pub fn next_sample(&mut self) -> f32 {
        let inc = self.phase_inc();
        let sample = match self.waveform {
            Waveform::Sine => (2.0 * PI * self.phase).sin(),
            Waveform::Square => self.square(inc),
            Waveform::Triangle => self.triangle(),
            Waveform::Sawtooth => self.sawtooth(inc),
        };

        self.phase += inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }

    /// Square via two PolyBLEP-corrected edges, one per half-cycle.
    fn square(&self, inc: f32) -> f32 {
        let mut value = if self.phase < 0.5 { 1.0 } else { -1.0 };
        value += poly_blep(self.phase, inc);
        value -= poly_blep((self.phase + 0.5) % 1.0, inc);
        value
    }

    /// Piecewise-linear triangle: -1 → +1 over [0, 0.5], back down over
    /// [0.5, 1). Continuous, so no edge correction is needed.
    fn triangle(&self) -> f32 {
        if self.phase < 0.5 {
            4.0 * self.phase - 1.0
        } else {
            3.0 - 4.0 * self.phase
        }
    }

    /// Rising sawtooth with the wrap discontinuity corrected.
    fn sawtooth(&self, inc: f32) -> f32 {
        let naive = 2.0 * self.phase - 1.0;
        naive - poly_blep(self.phase, inc)
    }

    /// Reset the phase to the start of the cycle.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// PolyBLEP (polynomial band-limited step) correction.
///
/// `t` is the phase in [0, 1), `dt` the phase increment per sample. Returns
/// a correction to apply around a step discontinuity, zero elsewhere.
fn poly_blep(t: f32, dt: f32) -> f32 {
    if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}
