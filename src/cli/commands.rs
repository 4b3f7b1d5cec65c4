//! CLI command handlers.

use std::path::Path;
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::audio::backend::AudioBackend;
use crate::audio::{render_tone, CpalBackend, RenderFormat, Waveform, CANONICAL_WAVEFORMS};
use crate::engine::{ToneEngine, ToneVariant, VolumeLevel, AUDIBLE_TONES};
use crate::error::{Result, SilentiumError};

/// Parse a volume argument: a preset name or a bare number in [0, 1].
pub fn parse_volume(value: &str) -> Result<f32> {
    if let Ok(level) = value.parse::<VolumeLevel>() {
        return Ok(level.normalized());
    }
    match value.parse::<f32>() {
        Ok(v) if (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(SilentiumError::InvalidVolume {
            value: value.to_string(),
        }),
    }
}

fn parse_frequency(hz: u32) -> Result<ToneVariant> {
    ToneVariant::from_hz(hz).ok_or(SilentiumError::UnsupportedFrequency { hz })
}

/// Play a tone live for the given number of seconds, ticking the session
/// timer once per second.
pub fn play(frequency: u32, waveform: &str, volume: &str, duration_secs: u64) -> Result<()> {
    let variant = parse_frequency(frequency)?;
    let shape: Waveform = waveform.parse()?;
    let volume = parse_volume(volume)?;

    let mut engine = ToneEngine::new(CpalBackend::new());
    if !engine.backend().is_available() {
        warn!("no audio device available; the session will be silent");
    }

    engine.set_volume(volume);
    engine.select_waveform(shape);
    engine.select_tone(variant);

    if engine.tone() != ToneVariant::None {
        println!(
            "Playing {} ({}) as {} for {}s",
            variant,
            variant.display_name(),
            shape,
            duration_secs
        );
        if let Some(desc) = variant.description() {
            println!("{}", desc);
        }
    }

    engine.start_timer();
    for _ in 0..duration_secs {
        thread::sleep(Duration::from_secs(1));
        engine.tick();
        info!("session at {}", engine.snapshot().formatted_time);
    }
    engine.pause_timer();
    engine.select_tone(ToneVariant::None);

    println!("Session complete: {}", engine.snapshot().formatted_time);
    Ok(())
}

/// Render a tone to a WAV file.
pub fn export(
    frequency: u32,
    output: &Path,
    waveform: &str,
    volume: &str,
    duration_secs: f64,
    bit_depth: u16,
) -> Result<()> {
    let variant = parse_frequency(frequency)?;
    let shape: Waveform = waveform.parse()?;
    let volume = parse_volume(volume)?;

    render_tone(
        variant,
        shape,
        volume,
        duration_secs,
        output,
        RenderFormat::new(48000, bit_depth),
    )?;

    println!(
        "Wrote {} as {} ({:.1}s) to {}",
        variant,
        shape,
        duration_secs,
        output.display()
    );
    Ok(())
}

/// List the available frequencies and waveform shapes.
pub fn list() -> Result<()> {
    println!("Frequencies:");
    for tone in AUDIBLE_TONES {
        println!(
            "  {:<7} {:<14} {}",
            tone.to_string(),
            tone.display_name(),
            tone.description().unwrap_or_default()
        );
    }
    println!();
    println!("Waveforms:");
    for shape in CANONICAL_WAVEFORMS {
        println!("  {}", shape);
    }
    println!();
    println!("Volume presets:");
    for level in [VolumeLevel::Low, VolumeLevel::Medium, VolumeLevel::High] {
        println!("  {:?} ({:.2})", level, level.normalized());
    }
    Ok(())
}
