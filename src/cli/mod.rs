//! CLI Module
//!
//! Command-line host for the Silentium tone engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Silentium - ambient meditation tones
#[derive(Parser, Debug)]
#[command(name = "silentium")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a tone on the default audio device
    #[command(name = "play")]
    Play {
        /// Carrier frequency in Hz (432, 528 or 639)
        frequency: u32,

        /// Waveform shape: sine, square, triangle or sawtooth
        #[arg(short, long, default_value = "sine")]
        waveform: String,

        /// Volume: low, medium, high, or a number in 0..1
        #[arg(long, default_value = "low")]
        volume: String,

        /// Session length in seconds
        #[arg(short, long, default_value_t = 60)]
        duration: u64,
    },

    /// Render a tone to a WAV file
    #[command(name = "export")]
    Export {
        /// Carrier frequency in Hz (432, 528 or 639)
        frequency: u32,

        /// Output WAV path
        output: PathBuf,

        /// Waveform shape: sine, square, triangle or sawtooth
        #[arg(short, long, default_value = "sine")]
        waveform: String,

        /// Volume: low, medium, high, or a number in 0..1
        #[arg(long, default_value = "high")]
        volume: String,

        /// Length of the rendered file in seconds
        #[arg(short, long, default_value_t = 30.0)]
        duration: f64,

        /// Output bit depth: 16, 24 or 32
        #[arg(long, default_value_t = 24)]
        bit_depth: u16,
    },

    /// List the available frequencies and waveform shapes
    #[command(name = "list")]
    List,
}
