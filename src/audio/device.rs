//! cpal-backed realtime output.
//!
//! The output stream is opened once, on construction, and stays alive for
//! the backend's lifetime. The audio callback synthesizes the live voice
//! directly from shared state: the voice sits behind a `parking_lot` mutex
//! (locked only to swap voices in and out), and the gain is an atomic
//! bit-cast f32 so volume changes never touch the lock. When no voice is
//! live the callback fills silence.
//!
//! Hosts without a usable output device get a backend that reports
//! unavailable for the whole session; construction itself never fails.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::audio::backend::{AudioBackend, OscillatorId};
use crate::audio::oscillator::{Oscillator, Waveform};
use crate::error::{Result, SilentiumError};

/// The live voice as seen by the audio callback.
struct Voice {
    id: OscillatorId,
    osc: Oscillator,
}

/// State shared between the control side and the audio callback.
struct Shared {
    voice: Mutex<Option<Voice>>,
    /// Linear gain, stored as f32 bits.
    gain: AtomicU32,
}

impl Shared {
    fn new() -> Self {
        Shared {
            voice: Mutex::new(None),
            gain: AtomicU32::new(0.0f32.to_bits()),
        }
    }
}

/// Audio output backend using the default cpal host.
pub struct CpalBackend {
    /// Holds the audio thread alive; `None` when no device could be opened.
    stream: Option<Stream>,
    shared: Arc<Shared>,
    sample_rate: u32,
}

impl CpalBackend {
    /// Open the default output device.
    ///
    /// If no device exists, the stream cannot be built, or the device does
    /// not take f32 samples, the failure is logged and the backend comes up
    /// permanently unavailable instead of erroring.
    pub fn new() -> Self {
        let shared = Arc::new(Shared::new());
        match Self::open_stream(Arc::clone(&shared)) {
            Ok((stream, sample_rate)) => {
                info!("audio device ready at {} Hz", sample_rate);
                CpalBackend {
                    stream: Some(stream),
                    shared,
                    sample_rate,
                }
            }
            Err(e) => {
                warn!("audio device unavailable, staying silent: {}", e);
                CpalBackend {
                    stream: None,
                    shared,
                    sample_rate: 0,
                }
            }
        }
    }

    /// Output sample rate, 0 when unavailable.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn open_stream(shared: Arc<Shared>) -> Result<(Stream, u32)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(SilentiumError::DeviceUnavailable)?;

        let config = device
            .default_output_config()
            .map_err(|e| SilentiumError::StreamBuild {
                reason: e.to_string(),
            })?;

        if config.sample_format() != SampleFormat::F32 {
            return Err(SilentiumError::UnsupportedSampleFormat {
                format: format!("{:?}", config.sample_format()),
            });
        }

        let sample_rate = config.sample_rate().0;
        let stream_config: StreamConfig = config.into();
        let channels = stream_config.channels as usize;

        debug!(
            "opening output stream: {} ch, {} Hz",
            channels, sample_rate
        );

        let callback_shared = Arc::clone(&shared);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let gain = f32::from_bits(callback_shared.gain.load(Ordering::Relaxed));
                    let mut voice = callback_shared.voice.lock();
                    match voice.as_mut() {
                        Some(v) => {
                            for frame in data.chunks_mut(channels) {
                                let sample = v.osc.next_sample() * gain;
                                for out in frame.iter_mut() {
                                    *out = sample;
                                }
                            }
                        }
                        None => data.fill(0.0),
                    }
                },
                |err| warn!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| SilentiumError::StreamBuild {
                reason: e.to_string(),
            })?;

        stream.play().map_err(|e| SilentiumError::StreamBuild {
            reason: format!("failed to start playback: {}", e),
        })?;

        Ok((stream, sample_rate))
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn is_available(&self) -> bool {
        self.stream.is_some()
    }

    fn set_gain(&mut self, gain: f32) {
        // One knob serves as both the idle gain and the live voice's gain,
        // so a volume change is heard without rebuilding the voice.
        self.shared.gain.store(gain.to_bits(), Ordering::Relaxed);
    }

    fn start_oscillator(
        &mut self,
        waveform: Waveform,
        frequency_hz: f32,
        gain: f32,
    ) -> Result<OscillatorId> {
        if self.stream.is_none() {
            return Err(SilentiumError::DeviceUnavailable);
        }

        let id = OscillatorId::new();
        let osc = Oscillator::new(waveform, frequency_hz, self.sample_rate as f32);
        self.shared.gain.store(gain.to_bits(), Ordering::Relaxed);
        *self.shared.voice.lock() = Some(Voice { id, osc });
        debug!("voice started: {} at {} Hz", waveform, frequency_hz);
        Ok(id)
    }

    fn stop_oscillator(&mut self, id: OscillatorId) {
        let mut voice = self.shared.voice.lock();
        if voice.as_ref().map(|v| v.id) == Some(id) {
            *voice = None;
            debug!("voice stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // CI machines frequently have no audio device; exercise both branches
    // without assuming either.
    #[test]
    fn construction_never_fails() {
        let mut backend = CpalBackend::new();
        backend.set_gain(0.001);

        if backend.is_available() {
            assert!(backend.sample_rate() > 0);
            let id = backend
                .start_oscillator(Waveform::Sine, 432.0, 0.001)
                .unwrap();
            backend.stop_oscillator(id);
        } else {
            assert_eq!(backend.sample_rate(), 0);
            let result = backend.start_oscillator(Waveform::Sine, 432.0, 0.001);
            assert!(matches!(result, Err(SilentiumError::DeviceUnavailable)));
        }
    }
}
