//! Silentium CLI - Ambient Tone Engine
//!
//! Command-line host for the Silentium tone engine.

use clap::Parser;
use env_logger::Env;
use log::info;

use silentium::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Silentium v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd)?,
        None => {
            println!("Silentium v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
        }
    }

    Ok(())
}

fn handle_command(cmd: Commands) -> silentium::Result<()> {
    match cmd {
        Commands::Play {
            frequency,
            waveform,
            volume,
            duration,
        } => commands::play(frequency, &waveform, &volume, duration),
        Commands::Export {
            frequency,
            output,
            waveform,
            volume,
            duration,
            bit_depth,
        } => commands::export(frequency, &output, &waveform, &volume, duration, bit_depth),
        Commands::List => commands::list(),
    }
}
