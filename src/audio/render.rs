//! Offline tone rendering.
//!
//! Writes a configured tone selection to a mono WAV file. The same
//! oscillator feeds the live device and this renderer, so an exported file
//! is exactly what the speakers would play. A short linear fade at both
//! edges keeps the file free of start/stop clicks.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::audio::oscillator::{Oscillator, Waveform};
use crate::engine::tone::{gain_for_volume, ToneVariant};
use crate::error::{Result, SilentiumError};

/// Edge fade length in seconds.
const FADE_SECS: f64 = 0.01;

/// Render format configuration
#[derive(Debug, Clone)]
pub struct RenderFormat {
    /// Target sample rate (default: 48000)
    pub sample_rate: u32,
    /// Bit depth: 16, 24, or 32 (default: 24)
    pub bit_depth: u16,
}

impl Default for RenderFormat {
    fn default() -> Self {
        RenderFormat {
            sample_rate: 48000,
            bit_depth: 24,
        }
    }
}

impl RenderFormat {
    /// Create a render format with the given sample rate and bit depth
    pub fn new(sample_rate: u32, bit_depth: u16) -> Self {
        RenderFormat {
            sample_rate,
            bit_depth,
        }
    }

    /// CD quality (44.1kHz, 16-bit)
    pub fn cd_quality() -> Self {
        RenderFormat {
            sample_rate: 44100,
            bit_depth: 16,
        }
    }
}

/// Render a tone selection to a mono WAV file.
///
/// # Arguments
/// * `variant` - Carrier frequency to render; the silent variant is an error
/// * `waveform` - Shape to render
/// * `volume` - Normalized volume in [0, 1], mapped to gain like live playback
/// * `duration_secs` - Length of the rendered file
/// * `path` - Output file path
/// * `format` - Sample rate and bit depth
///
/// # Errors
/// * `NoToneSelected` - If `variant` is the silent variant
/// * `UnsupportedBitDepth` - If the bit depth is not 16, 24, or 32
/// * `Io` - If the file cannot be written
pub fn render_tone(
    variant: ToneVariant,
    waveform: Waveform,
    volume: f32,
    duration_secs: f64,
    path: &Path,
    format: RenderFormat,
) -> Result<()> {
    let frequency_hz = variant
        .frequency_hz()
        .ok_or(SilentiumError::NoToneSelected)?;

    if !matches!(format.bit_depth, 16 | 24 | 32) {
        return Err(SilentiumError::UnsupportedBitDepth {
            bits: format.bit_depth,
        });
    }

    let total_frames = (duration_secs * format.sample_rate as f64).round() as usize;
    let fade_frames = ((FADE_SECS * format.sample_rate as f64) as usize).min(total_frames / 2);
    let gain = gain_for_volume(volume);

    let mut osc = Oscillator::new(waveform, frequency_hz, format.sample_rate as f32);

    let spec = WavSpec {
        channels: 1,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format: if format.bit_depth == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let mut writer = WavWriter::create(path, spec).map_err(io_error)?;

    for frame in 0..total_frames {
        let mut sample = osc.next_sample() * gain;

        // Linear edge fades
        if frame < fade_frames {
            sample *= frame as f32 / fade_frames as f32;
        } else if frame >= total_frames - fade_frames {
            sample *= (total_frames - frame) as f32 / fade_frames as f32;
        }

        match format.bit_depth {
            16 => {
                let scaled = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer.write_sample(scaled).map_err(io_error)?;
            }
            24 => {
                let scaled = (sample * 8388607.0).clamp(-8388608.0, 8388607.0) as i32;
                writer.write_sample(scaled).map_err(io_error)?;
            }
            32 => {
                writer.write_sample(sample).map_err(io_error)?;
            }
            _ => unreachable!("bit depth validated above"),
        }
    }

    writer.finalize().map_err(io_error)?;

    info!(
        "rendered {} Hz {} for {:.1}s to {}",
        frequency_hz,
        waveform,
        duration_secs,
        path.display()
    );

    Ok(())
}

fn io_error(e: hound::Error) -> SilentiumError {
    SilentiumError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        e.to_string(),
    ))
}
